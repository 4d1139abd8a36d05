//! Runs the `setup-env` binary the way a workflow step does.

use std::process::{Command, Output};

fn run_setup_env(inputs: &[(&str, &str)], args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_setup-env"))
        .env_clear()
        .envs(inputs.iter().copied())
        .args(args)
        .output()
        .expect("failed to run setup-env")
}

#[test]
fn test_state_stdout_is_json_when_stop_warns() {
    // No BROWSERSTACK_LOCAL_IDENTIFIER, so construction logs a warning.
    let output = run_setup_env(
        &[
            ("INPUT_USERNAME", "alice"),
            ("INPUT_ACCESS-KEY", "key123"),
            ("INPUT_LOCAL-TESTING", "stop"),
        ],
        &["state"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let state: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {stdout:?}"));
    assert_eq!(
        state,
        serde_json::json!({
            "accessKey": "key123",
            "localTesting": "stop",
            "localArgs": null,
            "localIdentifier": null,
            "localLoggingLevel": null,
        })
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BROWSERSTACK_LOCAL_IDENTIFIER"));
}

#[test]
fn test_state_reads_identifier_exported_by_start_step() {
    let output = run_setup_env(
        &[
            ("INPUT_USERNAME", "alice"),
            ("INPUT_ACCESS-KEY", "key123"),
            ("INPUT_LOCAL-TESTING", "stop"),
            ("BROWSERSTACK_LOCAL_IDENTIFIER", "GitHubAction-abc"),
        ],
        &["state", "--pretty"],
    );
    assert!(output.status.success());

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["localIdentifier"], "GitHubAction-abc");
}

#[test]
fn test_rejected_key_flag_is_not_echoed() {
    let output = run_setup_env(
        &[
            ("INPUT_USERNAME", "alice"),
            ("INPUT_ACCESS-KEY", "key123"),
            ("INPUT_LOCAL-TESTING", "start"),
            ("INPUT_LOCAL-ARGS", "--force-local --key=SUPERSECRETKEY"),
        ],
        &["validate"],
    );
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("::error::"), "stdout: {stdout}");
    assert!(stdout.contains("--key"));
    assert!(!stdout.contains("SUPERSECRETKEY"), "stdout: {stdout}");
    assert!(!stderr.contains("SUPERSECRETKEY"), "stderr: {stderr}");
}
