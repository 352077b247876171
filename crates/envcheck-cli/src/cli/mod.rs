//! CLI module for envcheck
//!
//! Wires parsed arguments, the settings file and the captured environment into
//! the validate, create and version commands.

pub mod commands;
pub mod output;

pub use commands::{
    CreateArgs, EnvCheckCli, EnvCheckCommands, EnvFileSource, ValidateArgs, ValidateConfig,
};
pub use output::{OutputFormat, ValidationOutput};

use envcheck_core::{EnvCheckError, DEFAULT_PREFIX};

use crate::settings::Settings;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution, all validations passed
    Success = 0,
    /// Validation failed
    ValidationFailed = 1,
    /// Invalid input, arguments or settings
    InvalidInput = 3,
    /// Schema or `.env` file not found or inaccessible
    FileError = 4,
    /// Schema could not be parsed
    SchemaError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from validation result
    pub fn from_validation_result(passed: bool) -> Self {
        if passed {
            ExitCode::Success
        } else {
            ExitCode::ValidationFailed
        }
    }

    /// Map a command error to its exit code
    pub fn from_error(error: &EnvCheckError) -> Self {
        match error {
            EnvCheckError::SchemaUnreadable { .. } | EnvCheckError::FileError(_) => {
                ExitCode::FileError
            }
            EnvCheckError::SchemaParse { .. } | EnvCheckError::SchemaInvalid(_) => {
                ExitCode::SchemaError
            }
            EnvCheckError::InvalidInput(_)
            | EnvCheckError::SettingsError(_)
            | EnvCheckError::InvalidTemplate(_) => ExitCode::InvalidInput,
            EnvCheckError::Serialization(_) => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: EnvCheckCli) -> Result<ExitCode, EnvCheckError> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = Settings::load(cli.config.as_deref())?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match &cli.command {
        EnvCheckCommands::Validate(args) => {
            let config = ValidateConfig::resolve(args, &settings);
            let env = EnvFileSource::resolve(&cli, &settings).snapshot()?;
            tracing::debug!(
                schema = %config.schema.display(),
                strict = config.strict,
                variables = env.len(),
                "Running validation"
            );
            commands::execute_validate(&config, &env, &mut out, &mut err)
        }
        EnvCheckCommands::Create(args) => {
            let prefix = args
                .prefix
                .as_deref()
                .or(settings.prefix.as_deref())
                .unwrap_or(DEFAULT_PREFIX);
            commands::execute_create(&args.output, args.force, prefix, &mut out)
        }
        EnvCheckCommands::Version => commands::execute_version(&mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::ValidationFailed), 1);
        assert_eq!(i32::from(ExitCode::InvalidInput), 3);
        assert_eq!(i32::from(ExitCode::FileError), 4);
        assert_eq!(i32::from(ExitCode::SchemaError), 5);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_validation_result() {
        assert_eq!(ExitCode::from_validation_result(true), ExitCode::Success);
        assert_eq!(
            ExitCode::from_validation_result(false),
            ExitCode::ValidationFailed
        );
    }

    #[test]
    fn test_exit_code_from_error() {
        let unreadable = EnvCheckError::schema_unreadable(
            "schema.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(ExitCode::from_error(&unreadable), ExitCode::FileError);
        assert_eq!(
            ExitCode::from_error(&EnvCheckError::schema_parse("schema.yaml", "bad")),
            ExitCode::SchemaError
        );
        assert_eq!(
            ExitCode::from_error(&EnvCheckError::SchemaInvalid("empty name".into())),
            ExitCode::SchemaError
        );
        assert_eq!(
            ExitCode::from_error(&EnvCheckError::SettingsError("bad".into())),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&EnvCheckError::Serialization("bad".into())),
            ExitCode::InternalError
        );
    }
}
