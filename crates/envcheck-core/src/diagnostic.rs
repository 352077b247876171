//! Validation failures and their human-readable rendering
//!
//! A [`ValidationError`] describes one rule that did not hold. Its `Display`
//! implementation renders the multi-line block shown to users:
//!
//! ```text
//! Invalid variable: APP_PORT
//!    Expected type: int
//!    Got: "eighty"
//!    Set the variable to a value of the declared type
//!
//!    Example: export APP_PORT=8080
//! ```
//!
//! Strict-mode findings are a separate type, [`UnexpectedVariable`], since they
//! are not tied to any rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::VarType;

/// Indentation used for every line after the header
const INDENT: &str = "   ";

/// What went wrong with a variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Required variable resolved to an empty value
    Missing,
    /// Value does not parse as the declared type
    TypeMismatch { expected: VarType },
    /// Value has the right type but an unusable shape
    InvalidFormat,
    /// The rule names a type the validator does not know
    UnknownType { type_tag: String },
}

impl ValidationErrorKind {
    /// Stable short code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::Missing => "missing",
            ValidationErrorKind::TypeMismatch { .. } => "type_mismatch",
            ValidationErrorKind::InvalidFormat => "invalid_format",
            ValidationErrorKind::UnknownType { .. } => "unknown_type",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Name of the variable the rule describes
    pub var_name: String,
    /// Failure kind and its kind-specific data
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
    /// The offending value, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,
    /// Guidance on how to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Sample value for the `export` line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl ValidationError {
    fn new(var_name: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            var_name: var_name.into(),
            kind,
            actual_value: None,
            hint: None,
            example: None,
        }
    }

    /// Required variable is missing
    pub fn missing(var_name: impl Into<String>) -> Self {
        Self::new(var_name, ValidationErrorKind::Missing)
    }

    /// Value does not parse as `expected`
    pub fn type_mismatch(
        var_name: impl Into<String>,
        expected: VarType,
        actual_value: impl Into<String>,
    ) -> Self {
        Self::new(var_name, ValidationErrorKind::TypeMismatch { expected })
            .with_actual(actual_value)
    }

    /// Value is malformed
    pub fn invalid_format(var_name: impl Into<String>, actual_value: impl Into<String>) -> Self {
        Self::new(var_name, ValidationErrorKind::InvalidFormat).with_actual(actual_value)
    }

    /// The rule's type tag is not recognized
    pub fn unknown_type(var_name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self::new(
            var_name,
            ValidationErrorKind::UnknownType {
                type_tag: type_tag.into(),
            },
        )
    }

    /// Record the value that failed
    pub fn with_actual(mut self, actual_value: impl Into<String>) -> Self {
        self.actual_value = Some(actual_value.into());
        self
    }

    /// Add a hint line
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add an example value
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    fn actual(&self) -> &str {
        self.actual_value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Invalid variable: {}", self.var_name)?;

        match &self.kind {
            ValidationErrorKind::Missing => {
                writeln!(f, "{INDENT}Status: Required variable is missing")?;
                // Spacer lines carry no indentation
                writeln!(f)?;
                writeln!(
                    f,
                    "{INDENT}This variable must be set for the application to run."
                )?;
            }
            ValidationErrorKind::TypeMismatch { expected } => {
                writeln!(f, "{INDENT}Expected type: {}", expected)?;
                writeln!(f, "{INDENT}Got: \"{}\"", self.actual())?;
            }
            ValidationErrorKind::InvalidFormat => {
                writeln!(f, "{INDENT}Value: \"{}\"", self.actual())?;
            }
            ValidationErrorKind::UnknownType { type_tag } => {
                writeln!(f, "{INDENT}Unknown type: {}", type_tag)?;
                writeln!(f, "{INDENT}Supported types: {}", VarType::supported_list())?;
            }
        }

        if let Some(hint) = &self.hint {
            writeln!(f, "{INDENT}{}", hint)?;
        }

        if let Some(example) = &self.example {
            writeln!(f)?;
            writeln!(f, "{INDENT}Example: export {}={}", self.var_name, example)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A prefixed variable in the environment that the schema does not declare
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnexpectedVariable {
    /// Variable name
    pub name: String,
}

impl UnexpectedVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for UnexpectedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variable: {}", self.name)
    }
}
