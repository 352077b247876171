//! Single-variable validation
//!
//! [`validate_variable`] checks one rule against an environment:
//!
//! 1. resolve the value, falling back to the rule's default when the variable
//!    is unset or empty;
//! 2. fail with `Missing` if the rule is required and nothing resolved;
//! 3. check the resolved value against the rule's type. An unset optional
//!    variable skips this step, except that an unknown type tag is always
//!    reported.
//!
//! The first failing step wins, so each rule yields at most one error.

use serde::Serialize;

use crate::diagnostic::ValidationError;
use crate::env::EnvLookup;
use crate::example::example_value;
use crate::schema::{VarType, VariableRule};

/// Hint attached to missing variables
pub const MISSING_HINT: &str = "Set this variable in your environment or .env file";

/// Hint attached to type errors
pub const TYPE_HINT: &str = "Set the variable to a value of the declared type";

/// A rule that passed, with the value it was checked against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariable {
    /// Variable name
    pub name: String,
    /// Type tag from the rule
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Value used for checking; `None` for an unset optional variable
    pub value: Option<String>,
    /// Whether the value came from the rule's default
    pub from_default: bool,
}

/// Validate one rule against `env`
pub fn validate_variable<E>(rule: &VariableRule, env: &E) -> Result<ResolvedVariable, ValidationError>
where
    E: EnvLookup + ?Sized,
{
    let live = env.get(&rule.name).filter(|v| !v.is_empty());

    let (value, from_default) = match (live, rule.effective_default()) {
        (Some(v), _) => (Some(v), false),
        (None, Some(default)) => (Some(default), true),
        (None, None) => (None, false),
    };

    let Some(value) = value else {
        if rule.required {
            return Err(ValidationError::missing(&rule.name)
                .with_hint(MISSING_HINT)
                .with_example(example_value(rule)));
        }
        // An unknown tag is a schema problem, reported even without a value
        if rule.var_type().is_none() {
            return Err(unknown_type(rule, None));
        }
        tracing::debug!(name = %rule.name, "Optional variable is unset");
        return Ok(ResolvedVariable {
            name: rule.name.clone(),
            type_tag: rule.type_tag.clone(),
            value: None,
            from_default: false,
        });
    };

    check_type(rule, value)?;

    tracing::debug!(
        name = %rule.name,
        value = %value,
        from_default,
        type_tag = %rule.type_tag,
        "Variable is valid"
    );

    Ok(ResolvedVariable {
        name: rule.name.clone(),
        type_tag: rule.type_tag.clone(),
        value: Some(value.to_string()),
        from_default,
    })
}

/// Check a non-empty resolved value against the rule's type tag
fn check_type(rule: &VariableRule, value: &str) -> Result<(), ValidationError> {
    let Some(var_type) = rule.var_type() else {
        return Err(unknown_type(rule, Some(value)));
    };

    let ok = match var_type {
        VarType::String => true,
        VarType::Int => parse_int(value).is_some(),
        VarType::Bool => parse_bool(value).is_some(),
    };

    if ok {
        Ok(())
    } else {
        Err(ValidationError::type_mismatch(&rule.name, var_type, value)
            .with_hint(TYPE_HINT)
            .with_example(example_value(rule)))
    }
}

fn unknown_type(rule: &VariableRule, value: Option<&str>) -> ValidationError {
    let err = ValidationError::unknown_type(&rule.name, &rule.type_tag)
        .with_hint(format!(
            "Change the type of {} in the schema to one of: {}",
            rule.name,
            VarType::supported_list()
        ))
        .with_example(example_value(rule));

    match value {
        Some(value) => err.with_actual(value),
        None => err,
    }
}

/// Parse a base-10 integer with an optional sign and no surrounding whitespace
pub fn parse_int(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}

/// Parse a boolean token: `true`/`false`, `t`/`f` or `1`/`0`, any case
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}
