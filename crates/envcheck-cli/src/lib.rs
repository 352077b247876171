//! envcheck command-line interface
//!
//! A pre-flight check that validates environment variables against a YAML
//! schema before an application starts.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Generate a starter schema
//! envcheck create --output schema.yaml
//!
//! # Validate the current environment
//! envcheck validate --schema schema.yaml
//!
//! # Also reject undeclared APP_* variables and print every value
//! envcheck validate -s schema.yaml --strict --verbose
//!
//! # Machine-readable results
//! envcheck validate --format json
//! ```
//!
//! Values from a `.env` file in the working directory fill in variables the
//! process environment does not set. Defaults for the flags can be kept in a
//! `.envcheck.yaml` settings file (see [`settings`]).

pub mod cli;
pub mod settings;

pub use cli::{EnvCheckCli, EnvCheckCommands, ExitCode, OutputFormat};
pub use settings::Settings;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from, when provided at build time
pub const COMMIT: &str = match option_env!("ENVCHECK_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

/// Build date, when provided at build time
pub const BUILD_DATE: &str = match option_env!("ENVCHECK_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

/// Run the CLI and return the process exit code
///
/// Errors are printed to stderr and mapped to an [`ExitCode`].
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use envcheck_cli::{run_cli, EnvCheckCli};
///
/// fn main() {
///     let cli = EnvCheckCli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: EnvCheckCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = ExitCode::from_error(&e);
            tracing::debug!(code = i32::from(code), user_error = e.is_user_error(), "Command failed");
            code
        }
    }
}
