//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// The sample dataset shipped with the crate
pub fn sample_dataset() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/practices.json")
}

/// Run the practices binary in `dir`
///
/// Colors are disabled so assertions can match plain text.
pub fn run_practices_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_practices"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PRACTICES_ASCII")
        .output()
        .expect("Failed to execute practices binary")
}

/// Run the practices binary against the sample dataset
pub fn run_on_sample(dir: &Path, args: &[&str]) -> Output {
    let data = sample_dataset();
    let data = data.to_str().expect("manifest path should be UTF-8");
    let mut full = vec!["--data", data];
    full.extend_from_slice(args);
    run_practices_in_dir(dir, &full)
}

/// Captured stdout as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
