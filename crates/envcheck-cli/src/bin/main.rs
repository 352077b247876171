//! envcheck CLI
//!
//! # Usage
//!
//! ```bash
//! envcheck create -o schema.yaml
//! envcheck validate -s schema.yaml --strict
//! envcheck version
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - validation passed
//! - 1: Validation failed
//! - 3: Invalid input, arguments or settings
//! - 4: Schema or .env file not found or inaccessible
//! - 5: Schema could not be parsed
//! - 10: Internal error

use clap::Parser;
use envcheck_cli::{run_cli, EnvCheckCli};

fn main() {
    // Logs go to stderr; RUST_LOG raises verbosity
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = EnvCheckCli::parse();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
