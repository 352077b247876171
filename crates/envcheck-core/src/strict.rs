//! Strict-mode scanning for undeclared variables
//!
//! The default reserved prefix is `APP_`, underscore included. A variable such
//! as `APPLE_ID` is therefore not flagged; pass `"APP"` as the prefix to also
//! catch names that merely start with those letters.

use std::collections::HashSet;

use crate::diagnostic::UnexpectedVariable;
use crate::env::EnvLookup;
use crate::schema::Schema;

/// Prefix reserved for application variables unless configured otherwise
pub const DEFAULT_PREFIX: &str = "APP_";

/// Find variables in `env` that carry `prefix` but are not declared in `schema`
///
/// Results are sorted by name. Names without the prefix are never reported.
pub fn find_unexpected<E>(schema: &Schema, prefix: &str, env: &E) -> Vec<UnexpectedVariable>
where
    E: EnvLookup + ?Sized,
{
    let declared: HashSet<&str> = schema.variables.iter().map(|r| r.name.as_str()).collect();

    let mut unexpected: Vec<UnexpectedVariable> = env
        .names()
        .filter(|name| name.starts_with(prefix) && !declared.contains(name))
        .map(UnexpectedVariable::new)
        .collect();

    unexpected.sort();
    unexpected.dedup();

    if !unexpected.is_empty() {
        tracing::debug!(
            prefix,
            count = unexpected.len(),
            "Found undeclared prefixed variables"
        );
    }

    unexpected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvSnapshot;
    use crate::schema::VariableRule;

    fn schema() -> Schema {
        Schema::new(vec![VariableRule::new("APP_PORT", "int")])
    }

    #[test]
    fn test_only_prefixed_undeclared_are_flagged() {
        let env: EnvSnapshot = [
            ("APP_PORT", "8080"),
            ("APP_SECRET", "s3cr3t"),
            ("OTHER_VAR", "x"),
        ]
        .into_iter()
        .collect();

        let found = find_unexpected(&schema(), DEFAULT_PREFIX, &env);
        assert_eq!(found, vec![UnexpectedVariable::new("APP_SECRET")]);
    }

    #[test]
    fn test_results_are_sorted() {
        let env: EnvSnapshot = [("APP_ZETA", "1"), ("APP_ALPHA", "2"), ("APP_MID", "3")]
            .into_iter()
            .collect();

        let names: Vec<_> = find_unexpected(&schema(), DEFAULT_PREFIX, &env)
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["APP_ALPHA", "APP_MID", "APP_ZETA"]);
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let env: EnvSnapshot = [("app_lower", "1")].into_iter().collect();
        assert!(find_unexpected(&schema(), DEFAULT_PREFIX, &env).is_empty());
    }

    #[test]
    fn test_default_prefix_requires_underscore() {
        let env: EnvSnapshot = [("APPLE_ID", "1"), ("APP_TOKEN", "2")].into_iter().collect();

        let found = find_unexpected(&schema(), DEFAULT_PREFIX, &env);
        assert_eq!(found, vec![UnexpectedVariable::new("APP_TOKEN")]);

        let found = find_unexpected(&schema(), "APP", &env);
        assert_eq!(
            found,
            vec![UnexpectedVariable::new("APPLE_ID"), UnexpectedVariable::new("APP_TOKEN")]
        );
    }

    #[test]
    fn test_custom_prefix() {
        let env: EnvSnapshot = [("SVC_TOKEN", "1"), ("APP_TOKEN", "2")].into_iter().collect();
        let found = find_unexpected(&schema(), "SVC_", &env);
        assert_eq!(found, vec![UnexpectedVariable::new("SVC_TOKEN")]);
    }

    #[test]
    fn test_declared_only_env_is_clean() {
        let env: EnvSnapshot = [("APP_PORT", "8080")].into_iter().collect();
        assert!(find_unexpected(&schema(), DEFAULT_PREFIX, &env).is_empty());
    }
}
