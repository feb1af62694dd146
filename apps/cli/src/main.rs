//! # `lnf` Entry Point
//!
//! The actual setup lives in lib.rs so the command tree can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    lnf_cli::run().await
}
