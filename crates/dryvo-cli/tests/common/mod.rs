use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary against `api_url` with an isolated credential store.
pub fn run_cli(args: &[&str], store: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dryvo"));
    cmd.args(args);
    cmd.env("DRYVO_API_URL", api_url);
    cmd.env("DRYVO_STORE", store);
    cmd.env("RUST_LOG", "off");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], store: &Path, api_url: &str) -> String {
    let output = run_cli(args, store, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], store: &Path, api_url: &str) -> String {
    let output = run_cli(args, store, api_url);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Read the stored credential entries.
pub fn stored_entries(store: &Path) -> serde_json::Value {
    match std::fs::read_to_string(store) {
        Ok(json) => serde_json::from_str(&json).expect("store is valid JSON"),
        Err(_) => serde_json::json!({}),
    }
}
