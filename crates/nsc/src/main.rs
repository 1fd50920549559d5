//! nscache - Entry Point
//!
//! Binary entry point for the `nsc` cache client. Lives in the `nsc` facade
//! crate next to the library it drives.

use clap::Parser;
use nsc::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match run(cli).await? {
        Some(output) => {
            println!("{}", output);
            Ok(())
        }
        None => std::process::exit(1),
    }
}
