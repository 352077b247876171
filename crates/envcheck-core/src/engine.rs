//! Validation engine
//!
//! Runs every rule of a schema against an environment and aggregates the
//! outcome into a [`ValidationReport`]. All rules are evaluated even after a
//! failure so one run shows every problem.

use std::fmt::Write as _;

use serde::Serialize;

use crate::diagnostic::{UnexpectedVariable, ValidationError};
use crate::env::{EnvLookup, EnvSnapshot};
use crate::error::{EnvCheckError, Result};
use crate::schema::Schema;
use crate::strict::{find_unexpected, DEFAULT_PREFIX};
use crate::validator::{validate_variable, ResolvedVariable};

/// Options for a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject prefixed variables the schema does not declare
    pub strict: bool,
    /// Prefix that marks application variables for strict mode
    pub prefix: String,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strict: false,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl ValidationOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the reserved prefix
    ///
    /// An empty prefix would match every variable. With strict mode on,
    /// [`ValidationOptions::check`] rejects it and [`ValidationEngine::validate`]
    /// skips the strict scan instead of flagging the whole environment.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Reject option combinations that cannot produce a meaningful run
    pub fn check(&self) -> Result<()> {
        if self.strict && self.prefix.is_empty() {
            return Err(EnvCheckError::invalid_input(
                "strict mode needs a non-empty prefix",
            ));
        }
        Ok(())
    }
}

/// Outcome of validating a schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed
    pub valid: bool,
    /// Number of rules evaluated
    pub rules_evaluated: usize,
    /// Failed rules, in schema order
    pub errors: Vec<ValidationError>,
    /// Strict-mode findings, sorted by name
    pub unexpected: Vec<UnexpectedVariable>,
    /// Rules that passed, in schema order
    pub resolved: Vec<ResolvedVariable>,
}

impl ValidationReport {
    /// True when no rule failed and strict mode found nothing
    pub fn passed(&self) -> bool {
        self.errors.is_empty() && self.unexpected.is_empty()
    }

    /// Total number of problems
    pub fn problem_count(&self) -> usize {
        self.errors.len() + self.unexpected.len()
    }

    /// Render every problem as plain text
    ///
    /// Output is deterministic: the same schema and environment always produce
    /// the same bytes.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for error in &self.errors {
            let _ = writeln!(out, "{}", error);
        }
        for unexpected in &self.unexpected {
            let _ = writeln!(out, "{}", unexpected);
        }
        out
    }
}

/// Validates schemas against environments
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    options: ValidationOptions,
}

impl ValidationEngine {
    /// Create an engine with the given options
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate `schema` against `env`
    ///
    /// This method is deterministic and never modifies the environment.
    pub fn validate<E>(&self, schema: &Schema, env: &E) -> ValidationReport
    where
        E: EnvLookup + ?Sized,
    {
        let mut report = ValidationReport::default();

        for rule in &schema.variables {
            report.rules_evaluated += 1;
            match validate_variable(rule, env) {
                Ok(resolved) => report.resolved.push(resolved),
                Err(error) => {
                    tracing::debug!(name = %rule.name, kind = %error.kind, "Variable failed validation");
                    report.errors.push(error);
                }
            }
        }

        if self.options.strict {
            if self.options.prefix.is_empty() {
                tracing::warn!("Strict mode has an empty prefix, skipping the undeclared variable scan");
            } else {
                report.unexpected = find_unexpected(schema, &self.options.prefix, env);
            }
        }

        report.valid = report.passed();

        tracing::info!(
            rules = report.rules_evaluated,
            errors = report.errors.len(),
            unexpected = report.unexpected.len(),
            strict = self.options.strict,
            valid = report.valid,
            "Validation complete"
        );

        report
    }

    /// Validate `schema` against a snapshot of the current process environment
    pub fn validate_process_env(&self, schema: &Schema) -> ValidationReport {
        let env = EnvSnapshot::capture();
        self.validate(schema, &env)
    }
}
