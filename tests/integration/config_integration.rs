//! Configuration layers as seen by the binary

use super::test_utils::{parse, stderr, stdout, Workspace};

#[test]
fn test_extend_key_from_config_file() {
    let ws = Workspace::new();
    ws.write("base.toml", "a = 1\n");
    ws.write("pyproject.toml", "__base = \"base.toml\"\nb = 2\n");
    let config = ws.write("drytoml.toml", "extend_key = \"__base\"\n");

    let output = ws.run(&["--config", config.to_str().unwrap(), "export"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(parse(&stdout(&output)), parse("b = 2\na = 1\n"));
}

#[test]
fn test_extend_key_from_global_config() {
    let ws = Workspace::new();
    ws.write("base.toml", "a = 1\n");
    ws.write("pyproject.toml", "__global = \"base.toml\"\n");
    ws.write("config-home/drytoml/config.toml", "extend_key = \"__global\"\n");

    let output = ws.run(&["export"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(parse(&stdout(&output)), parse("a = 1\n"));
}

#[test]
fn test_environment_overrides_config_file() {
    let ws = Workspace::new();
    ws.write("base.toml", "a = 1\n");
    ws.write("pyproject.toml", "__env = \"base.toml\"\n__base = \"missing.toml\"\n");
    let config = ws.write("drytoml.toml", "extend_key = \"__base\"\n");

    let output = ws
        .command()
        .env("DRYTOML_EXTEND_KEY", "__env")
        .args(["--config", config.to_str().unwrap(), "export"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        parse(&stdout(&output)),
        parse("__base = \"missing.toml\"\na = 1\n")
    );
}

#[test]
fn test_missing_config_file_is_an_error() {
    let ws = Workspace::new();
    let output = ws.run(&["--config", "absent.toml", "cache", "show"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let ws = Workspace::new();
    ws.write("base.toml", "a = 1\n");
    ws.write("pyproject.toml", "__extends = \"base.toml\"\n");

    let output = ws.run(&["--verbose", "export"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Transcluding"));
    assert_eq!(parse(&stdout(&output)), parse("a = 1\n"));
}
