use std::process::ExitCode;

use clap::Parser;
use nanobanana::config::setup_logging;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = nanobanana::cli::CliOptions::parse();

    let _ = setup_logging(cli.debug);

    match nanobanana::run(&cli).await {
        Ok(path) => {
            debug!("Done: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            if let Some(response) = err.diagnostic() {
                eprintln!("Response: {response}");
            }
            ExitCode::FAILURE
        }
    }
}
