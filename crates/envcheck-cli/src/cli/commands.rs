//! CLI command definitions for envcheck
//!
//! Provides Clap-based command definitions for validating the environment
//! against a schema, generating a starter schema and printing version
//! information.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use envcheck_core::{
    template, DotEnvFile, EnvCheckError, EnvSnapshot, Schema, ValidationEngine,
    ValidationOptions, DEFAULT_PREFIX,
};

use super::output::{render_table, write_error, OutputFormat, ValidationOutput};
use super::ExitCode;
use crate::settings::Settings;

/// Default schema file name
pub const DEFAULT_SCHEMA: &str = "schema.yaml";

/// Default `.env` file name
pub const DEFAULT_ENV_FILE: &str = ".env";

/// envcheck CLI
///
/// Validate environment variables against a schema before your application
/// starts.
#[derive(Parser, Debug)]
#[command(name = "envcheck")]
#[command(about = "Validate environment variables against a schema", long_about = None)]
#[command(version)]
pub struct EnvCheckCli {
    /// Settings file (default: .envcheck.yaml in the working directory or $HOME)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// .env file whose values fill in unset variables (default: .env)
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,

    /// Do not read any .env file
    #[arg(long, global = true)]
    pub no_env_file: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: EnvCheckCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum EnvCheckCommands {
    /// Validate current environment variables against a schema file
    ///
    /// Checks that required variables are set, that values match their
    /// declared types (string, int, bool) and applies defaults. Exits 0 when
    /// every check passes and 1 when any fails.
    Validate(ValidateArgs),

    /// Generate a template schema file
    ///
    /// The template declares a database URL, a port and a debug flag. Edit it
    /// to match your application's needs.
    Create(CreateArgs),

    /// Print version information
    Version,
}

/// Flags for `envcheck validate`
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Schema file path (default: schema.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Fail if variables with the reserved prefix are not declared in the schema
    #[arg(short = 't', long, overrides_with = "no_strict")]
    pub strict: bool,

    /// Turn strict mode off even if the settings file enables it
    #[arg(long, overrides_with = "strict")]
    pub no_strict: bool,

    /// Show the resolved value of every variable
    #[arg(short, long, overrides_with = "no_verbose")]
    pub verbose: bool,

    /// Turn verbose output off even if the settings file enables it
    #[arg(long, overrides_with = "verbose")]
    pub no_verbose: bool,

    /// Reserved variable prefix used by strict mode (default: APP_)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Flags for `envcheck create`
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_SCHEMA, value_name = "PATH")]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,

    /// Prefix for the generated variable names (default: APP_)
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Settings for one validation run after merging flags and the settings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateConfig {
    pub schema: PathBuf,
    pub strict: bool,
    pub verbose: bool,
    pub prefix: String,
    pub format: OutputFormat,
}

impl ValidateConfig {
    /// Merge command-line flags over settings-file values
    pub fn resolve(args: &ValidateArgs, settings: &Settings) -> Self {
        Self {
            schema: args
                .schema
                .clone()
                .or_else(|| settings.schema.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA)),
            strict: flag(args.strict, args.no_strict)
                .or(settings.strict)
                .unwrap_or(false),
            verbose: flag(args.verbose, args.no_verbose)
                .or(settings.verbose)
                .unwrap_or(false),
            prefix: args
                .prefix
                .clone()
                .or_else(|| settings.prefix.clone())
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            format: args.format,
        }
    }
}

/// Value of a `--flag`/`--no-flag` pair, `None` when neither was given
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Where `.env` values should come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileSource {
    /// Do not read a `.env` file
    Disabled,
    /// Read this file; it must exist
    Required(PathBuf),
    /// Read this file if it exists
    Optional(PathBuf),
}

impl EnvFileSource {
    /// Pick the `.env` source from flags and settings
    pub fn resolve(cli: &EnvCheckCli, settings: &Settings) -> Self {
        if cli.no_env_file {
            EnvFileSource::Disabled
        } else if let Some(path) = cli.env_file.clone().or_else(|| settings.env_file.clone()) {
            EnvFileSource::Required(path)
        } else {
            EnvFileSource::Optional(PathBuf::from(DEFAULT_ENV_FILE))
        }
    }

    /// Capture the process environment and merge `.env` values into it
    pub fn snapshot(&self) -> Result<EnvSnapshot, EnvCheckError> {
        let env = EnvSnapshot::capture();
        let file = match self {
            EnvFileSource::Disabled => return Ok(env),
            EnvFileSource::Required(path) => DotEnvFile::load(path)?,
            EnvFileSource::Optional(path) => DotEnvFile::load_optional(path)?,
        };
        Ok(env.with_fallbacks(file.into_vars()))
    }
}

/// Execute the validate command against an already captured environment
pub fn execute_validate(
    config: &ValidateConfig,
    env: &EnvSnapshot,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ExitCode, EnvCheckError> {
    let options = ValidationOptions::new()
        .with_strict_mode(config.strict)
        .with_prefix(config.prefix.clone());
    options.check()?;

    let schema = Schema::from_file(&config.schema)?;
    for warning in schema.authoring_warnings() {
        tracing::warn!(schema = %config.schema.display(), "{}", warning);
    }

    let report = ValidationEngine::new(options).validate(&schema, env);

    match config.format {
        OutputFormat::Table => render_table(&report, config.verbose, out, err)?,
        OutputFormat::Json => {
            ValidationOutput::from_report(&report, &config.schema, config.strict, config.verbose)
                .render_json(out)?
        }
        OutputFormat::Yaml => {
            ValidationOutput::from_report(&report, &config.schema, config.strict, config.verbose)
                .render_yaml(out)?
        }
    }

    Ok(ExitCode::from_validation_result(report.passed()))
}

/// Execute the create command
pub fn execute_create(
    output: &Path,
    force: bool,
    prefix: &str,
    out: &mut dyn Write,
) -> Result<ExitCode, EnvCheckError> {
    if output.exists() && !force {
        return Err(EnvCheckError::invalid_input(format!(
            "'{}' already exists; use --force to overwrite it",
            output.display()
        )));
    }

    let yaml = template::render_starter(prefix)?;

    std::fs::write(output, &yaml).map_err(|e| {
        EnvCheckError::file_error(format!(
            "Failed to write schema file '{}': {}",
            output.display(),
            e
        ))
    })?;
    tracing::info!(path = %output.display(), "Wrote schema template");

    writeln!(out, "Successfully generated schema file: {}", output.display())
        .map_err(write_error)?;
    writeln!(out, "--- Generated YAML ---").map_err(write_error)?;
    write!(out, "{}", yaml).map_err(write_error)?;

    Ok(ExitCode::Success)
}

/// Execute the version command
pub fn execute_version(out: &mut dyn Write) -> Result<ExitCode, EnvCheckError> {
    writeln!(out, "envcheck version {}", crate::VERSION).map_err(write_error)?;
    writeln!(out, "commit: {}", crate::COMMIT).map_err(write_error)?;
    writeln!(out, "built: {}", crate::BUILD_DATE).map_err(write_error)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> EnvCheckCli {
        EnvCheckCli::try_parse_from(std::iter::once("envcheck").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_validate_flags() {
        let cli = parse(&["validate", "-s", "prod.yaml", "-t", "-v", "--format", "json"]);
        let EnvCheckCommands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.schema, Some(PathBuf::from("prod.yaml")));
        assert!(args.strict);
        assert!(args.verbose);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_create_defaults() {
        let cli = parse(&["create"]);
        let EnvCheckCommands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.output, PathBuf::from("schema.yaml"));
        assert!(!args.force);
    }

    #[test]
    fn test_env_file_flags_conflict() {
        let result = EnvCheckCli::try_parse_from([
            "envcheck",
            "--env-file",
            "x.env",
            "--no-env-file",
            "version",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            schema: Some(PathBuf::from("from-settings.yaml")),
            strict: Some(true),
            verbose: None,
            prefix: Some("SVC_".to_string()),
            env_file: None,
        };
        let args = ValidateArgs {
            schema: Some(PathBuf::from("from-flag.yaml")),
            ..Default::default()
        };

        let config = ValidateConfig::resolve(&args, &settings);
        assert_eq!(config.schema, PathBuf::from("from-flag.yaml"));
        assert!(config.strict);
        assert!(!config.verbose);
        assert_eq!(config.prefix, "SVC_");
    }

    #[test]
    fn test_negated_flags_override_settings() {
        let settings = Settings {
            strict: Some(true),
            verbose: Some(true),
            ..Default::default()
        };

        let cli = parse(&["validate", "--no-strict", "--no-verbose"]);
        let EnvCheckCommands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        let config = ValidateConfig::resolve(&args, &settings);
        assert!(!config.strict);
        assert!(!config.verbose);

        let config = ValidateConfig::resolve(&ValidateArgs::default(), &settings);
        assert!(config.strict);
        assert!(config.verbose);
    }

    #[test]
    fn test_last_of_flag_pair_wins() {
        let cli = parse(&["validate", "--strict", "--no-strict"]);
        let EnvCheckCommands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert!(!args.strict);
        assert!(args.no_strict);

        let cli = parse(&["validate", "--no-strict", "-t"]);
        let EnvCheckCommands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        let config = ValidateConfig::resolve(
            &args,
            &Settings {
                strict: Some(false),
                ..Default::default()
            },
        );
        assert!(config.strict);
    }

    #[test]
    fn test_defaults_without_settings() {
        let config = ValidateConfig::resolve(&ValidateArgs::default(), &Settings::default());
        assert_eq!(config.schema, PathBuf::from(DEFAULT_SCHEMA));
        assert!(!config.strict);
        assert_eq!(config.prefix, DEFAULT_PREFIX);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_env_file_source_resolution() {
        let settings = Settings {
            env_file: Some(PathBuf::from(".env.settings")),
            ..Default::default()
        };

        let cli = parse(&["--no-env-file", "version"]);
        assert_eq!(EnvFileSource::resolve(&cli, &settings), EnvFileSource::Disabled);

        let cli = parse(&["--env-file", ".env.flag", "version"]);
        assert_eq!(
            EnvFileSource::resolve(&cli, &settings),
            EnvFileSource::Required(PathBuf::from(".env.flag"))
        );

        let cli = parse(&["version"]);
        assert_eq!(
            EnvFileSource::resolve(&cli, &settings),
            EnvFileSource::Required(PathBuf::from(".env.settings"))
        );
        assert_eq!(
            EnvFileSource::resolve(&cli, &Settings::default()),
            EnvFileSource::Optional(PathBuf::from(DEFAULT_ENV_FILE))
        );
    }

    #[test]
    fn test_version_output() {
        let mut out = Vec::new();
        execute_version(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&format!("envcheck version {}\n", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("commit: "));
        assert!(text.contains("built: "));
    }
}
