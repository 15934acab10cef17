//! `drytoml export` and `drytoml explain` through the binary

use super::test_utils::{parse, stderr, stdout, Workspace};

#[test]
fn test_export_default_file_in_current_directory() {
    let ws = Workspace::new();
    ws.write("base.toml", "[tool.black]\nline-length = 100\n");
    ws.write(
        "sub/pyproject.toml",
        "[project]\nname = \"demo\"\n\n[tool.black]\n__extends = \"../base.toml\"\n",
    );
    ws.write("pyproject.toml", "__extends = \"sub/pyproject.toml\"\n");

    let output = ws.run(&["export"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        parse(&stdout(&output)),
        parse("[project]\nname = \"demo\"\n[tool.black]\nline-length = 100\n")
    );
}

#[test]
fn test_export_with_custom_key() {
    let ws = Workspace::new();
    ws.write("base.toml", "a = 1\n");
    let file = ws.write("custom.toml", "__inherit = \"base.toml\"\nb = 2\n");

    let output = ws.run(&["export", file.to_str().unwrap(), "--key", "__inherit"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(parse(&stdout(&output)), parse("b = 2\na = 1\n"));
}

#[test]
fn test_export_missing_reference_fails() {
    let ws = Workspace::new();
    ws.write("pyproject.toml", "__extends = \"nowhere.toml\"\n");

    let output = ws.run(&["export"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Referenced file not found"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_explain_json() {
    let ws = Workspace::new();
    ws.write("t2.toml", "[tool.black]\nline-length = 100\n");
    ws.write("t1.toml", "[tool.black]\n__extends = \"t2.toml\"\n");
    ws.write("pyproject.toml", "__extends = \"t1.toml\"\n");

    let output = ws.run(&["explain", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["level"], 0);
    assert_eq!(steps[0]["target"], serde_json::json!([]));
    assert_eq!(steps[1]["level"], 1);
    assert_eq!(steps[1]["target"], serde_json::json!(["tool", "black"]));
    assert!(steps[1]["reference"].as_str().unwrap().ends_with("t2.toml"));
}
