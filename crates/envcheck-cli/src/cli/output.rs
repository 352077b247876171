//! Output formatting for the envcheck CLI
//!
//! Human-readable output goes to two streams: confirmations and verbose detail
//! to stdout, failure blocks and tips to stderr. JSON and YAML documents are
//! written to stdout whether or not validation passed.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use envcheck_core::{
    EnvCheckError, ResolvedVariable, UnexpectedVariable, ValidationError, ValidationReport,
};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Validation output structure for machine-readable rendering
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutput<'a> {
    /// Overall validation status
    pub valid: bool,
    /// Schema file that was validated
    pub schema: String,
    /// Whether strict mode was on
    pub strict: bool,
    /// Number of rules evaluated
    pub rules_evaluated: usize,
    /// Failed rules
    pub errors: &'a [ValidationError],
    /// Undeclared prefixed variables
    pub unexpected: &'a [UnexpectedVariable],
    /// Passing rules with their values, only in verbose mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<&'a [ResolvedVariable]>,
    /// Summary message
    pub summary: String,
}

impl<'a> ValidationOutput<'a> {
    /// Create output from a validation report
    pub fn from_report(
        report: &'a ValidationReport,
        schema: &Path,
        strict: bool,
        verbose: bool,
    ) -> Self {
        Self {
            valid: report.passed(),
            schema: schema.display().to_string(),
            strict,
            rules_evaluated: report.rules_evaluated,
            errors: &report.errors,
            unexpected: &report.unexpected,
            resolved: verbose.then_some(report.resolved.as_slice()),
            summary: summary(report),
        }
    }

    /// Render as JSON
    pub fn render_json(&self, out: &mut dyn Write) -> Result<(), EnvCheckError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EnvCheckError::Serialization(e.to_string()))?;
        writeln!(out, "{}", json).map_err(write_error)
    }

    /// Render as YAML
    pub fn render_yaml(&self, out: &mut dyn Write) -> Result<(), EnvCheckError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| EnvCheckError::Serialization(e.to_string()))?;
        write!(out, "{}", yaml).map_err(write_error)
    }
}

/// One-line summary of a report
pub fn summary(report: &ValidationReport) -> String {
    if report.passed() {
        "All environment variables validated successfully".to_string()
    } else {
        let mut parts = Vec::new();
        if !report.errors.is_empty() {
            parts.push(format!("{} invalid variable(s)", report.errors.len()));
        }
        if !report.unexpected.is_empty() {
            parts.push(format!("{} unexpected variable(s)", report.unexpected.len()));
        }
        format!("Validation failed: {}", parts.join(", "))
    }
}

/// Render a report in human-readable form
pub fn render_table(
    report: &ValidationReport,
    verbose: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), EnvCheckError> {
    if verbose {
        for resolved in &report.resolved {
            render_resolved(resolved, out)?;
        }
    }

    if report.passed() {
        writeln!(out).map_err(write_error)?;
        writeln!(out, "{} {}", "✓".green(), summary(report)).map_err(write_error)?;
        return out.flush().map_err(write_error);
    }

    for error in &report.errors {
        writeln!(err).map_err(write_error)?;
        write!(err, "{} {}", "✗".red(), error).map_err(write_error)?;
    }

    if !report.unexpected.is_empty() {
        writeln!(err).map_err(write_error)?;
        for unexpected in &report.unexpected {
            writeln!(err, "{} {}", "✗".red(), unexpected).map_err(write_error)?;
        }
    }

    writeln!(err).map_err(write_error)?;
    writeln!(err, "{}", summary(report).red().bold()).map_err(write_error)?;
    writeln!(
        err,
        "{} Run 'envcheck validate --verbose' to see more details",
        "Tip:".cyan()
    )
    .map_err(write_error)?;
    writeln!(
        err,
        "{} Check your .env file or export variables manually",
        "Tip:".cyan()
    )
    .map_err(write_error)?;

    err.flush().map_err(write_error)
}

/// Verbose detail for one passing variable
fn render_resolved(resolved: &ResolvedVariable, out: &mut dyn Write) -> Result<(), EnvCheckError> {
    writeln!(out, "{} {}", "✓".green(), resolved.name.bold()).map_err(write_error)?;

    let written = match &resolved.value {
        Some(value) if resolved.from_default => {
            writeln!(out, "   Value: {} {}", value, "(from default)".dimmed())
        }
        Some(value) => writeln!(out, "   Value: {}", value),
        None => writeln!(out, "   Value: {}", "(unset)".dimmed()),
    };
    written.map_err(write_error)?;

    writeln!(out, "   Type: {}", resolved.type_tag).map_err(write_error)
}

pub(crate) fn write_error(e: std::io::Error) -> EnvCheckError {
    EnvCheckError::file_error(format!("Failed to write output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use envcheck_core::{EnvSnapshot, Schema, ValidationEngine, ValidationOptions, VariableRule};

    fn report(strict: bool, pairs: &[(&str, &str)]) -> ValidationReport {
        let schema = Schema::new(vec![
            VariableRule::new("APP_PORT", "int").required(),
            VariableRule::new("APP_DEBUG", "bool").with_default("false"),
        ]);
        let env: EnvSnapshot = pairs.iter().copied().collect();
        ValidationEngine::new(ValidationOptions::new().with_strict_mode(strict))
            .validate(&schema, &env)
    }

    fn render(report: &ValidationReport, verbose: bool) -> (String, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let mut err = Vec::new();
        render_table(report, verbose, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&report(false, &[("APP_PORT", "1")])),
            "All environment variables validated successfully"
        );
        assert_eq!(
            summary(&report(true, &[("APP_EXTRA", "1")])),
            "Validation failed: 1 invalid variable(s), 1 unexpected variable(s)"
        );
    }

    #[test]
    fn test_table_success_goes_to_stdout() {
        let (out, err) = render(&report(false, &[("APP_PORT", "8080")]), false);
        assert!(out.contains("All environment variables validated successfully"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_table_verbose_lists_variables() {
        let (out, _) = render(&report(false, &[("APP_PORT", "8080")]), true);
        assert!(out.contains("APP_PORT\n   Value: 8080\n   Type: int\n"));
        assert!(out.contains("APP_DEBUG\n   Value: false (from default)\n   Type: bool\n"));
    }

    #[test]
    fn test_table_failure_goes_to_stderr() {
        let (out, err) = render(&report(true, &[("APP_PORT", "x"), ("APP_EXTRA", "1")]), false);
        assert!(out.is_empty());
        assert!(err.contains("Invalid variable: APP_PORT"));
        assert!(err.contains("unknown variable: APP_EXTRA"));
        assert!(err.contains("Tip: Run 'envcheck validate --verbose'"));
    }

    #[test]
    fn test_json_output() {
        let report = report(false, &[]);
        let output = ValidationOutput::from_report(&report, Path::new("schema.yaml"), false, false);
        let mut buf = Vec::new();
        output.render_json(&mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["schema"], "schema.yaml");
        assert_eq!(value["errors"][0]["var_name"], "APP_PORT");
        assert_eq!(value["errors"][0]["kind"], "missing");
        assert!(value.get("resolved").is_none());
    }

    #[test]
    fn test_yaml_output_includes_resolved_when_verbose() {
        let report = report(false, &[("APP_PORT", "80")]);
        let output = ValidationOutput::from_report(&report, Path::new("s.yaml"), true, true);
        let mut buf = Vec::new();
        output.render_yaml(&mut buf).unwrap();

        let yaml = String::from_utf8(buf).unwrap();
        assert!(yaml.contains("valid: true"));
        assert!(yaml.contains("resolved:"));
        assert!(yaml.contains("from_default: true"));
    }
}
