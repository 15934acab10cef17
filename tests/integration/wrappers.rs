//! Wrapped tools through the binary

use super::test_utils::{stderr, Workspace};

#[test]
fn test_unknown_tool_is_rejected() {
    let ws = Workspace::new();
    let output = ws.run(&["definitely-not-a-tool", "--check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid command definitely-not-a-tool"));
}

#[cfg(unix)]
mod unix {
    use super::super::test_utils::{stderr, Workspace};

    const FLAG_TOOL: &str = "[tools.check]\nprogram = \"sh\"\nflags = [\"--config\"]\n";
    const ENV_TOOL: &str =
        "[tools.check]\nprogram = \"sh\"\nenvs = [\"CHECK_CONFIG\", \"CHECK_RC\"]\n";

    fn workspace_with_tool(tool: &str) -> (Workspace, String) {
        let ws = Workspace::new();
        ws.write("base.toml", "[tool.demo]\nline-length = 79\n");
        ws.write("pyproject.toml", "[tool.demo]\n__extends = \"base.toml\"\n");
        let config = ws.write("tools.toml", tool);
        let config = config.to_string_lossy().into_owned();
        (ws, config)
    }

    #[test]
    fn test_flag_tool_receives_resolved_file() {
        let (ws, config) = workspace_with_tool(FLAG_TOOL);
        let script = concat!(
            "case \"$2\" in */drytoml.*.toml) ;; *) exit 9;; esac; ",
            "grep -q 'line-length = 79' \"$2\" && ! grep -q __extends \"$2\"",
        );

        let output = ws.run(&["--config", &config, "check", "-c", script, "sh"]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    #[test]
    fn test_env_tool_receives_resolved_file() {
        let (ws, config) = workspace_with_tool(ENV_TOOL);
        let script = concat!(
            "test \"$CHECK_CONFIG\" = \"$CHECK_RC\" && ",
            "grep -q 'line-length = 79' \"$CHECK_CONFIG\"",
        );

        let output = ws
            .command()
            .env_remove("CHECK_CONFIG")
            .args(["--config", &config, "check", "-c", script])
            .output()
            .unwrap();
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    #[test]
    fn test_tool_exit_code_is_propagated() {
        let (ws, config) = workspace_with_tool(FLAG_TOOL);
        let output = ws.run(&["--config", &config, "check", "-c", "exit 7", "sh"]);
        assert_eq!(output.status.code(), Some(7));
    }

    #[test]
    fn test_temporary_file_is_removed_after_run() {
        let (ws, config) = workspace_with_tool(FLAG_TOOL);
        let output = ws.run(&["--config", &config, "check", "-c", "true", "sh"]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));

        let leftovers: Vec<_> = std::fs::read_dir(ws.root())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("drytoml."))
            .collect();
        assert!(leftovers.is_empty());
    }
}
