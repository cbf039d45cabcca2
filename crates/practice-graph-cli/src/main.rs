//! Practices CLI binary.

use practices::cli::{Cli, exit_code};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Main entry point for the practices CLI.
///
/// Uses tokio's current_thread runtime; the only async work is reading files.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Controlled via RUST_LOG, e.g. RUST_LOG=practices=debug,practice_graph=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("practices=info,practice_graph=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting practices CLI");

    let cli = Cli::parse_args();
    match cli.execute().await {
        Ok(()) => {
            tracing::debug!("Practices CLI completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
