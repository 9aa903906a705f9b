//! Admission server entry point.

use admission_server::Args;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match admission_server::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("admission-server: {err}");
            ExitCode::FAILURE
        }
    }
}
