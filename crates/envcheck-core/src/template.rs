//! Starter schema used by `envcheck create`

use crate::error::{EnvCheckError, Result};
use crate::schema::{Schema, VariableRule};

/// Build the starter schema for variables namespaced with `prefix`
///
/// Every generated name must carry the prefix; a prefix that does not produce
/// valid names is rejected.
pub fn starter_schema(prefix: &str) -> Result<Schema> {
    if prefix.is_empty() {
        return Err(EnvCheckError::invalid_input("prefix must not be empty"));
    }

    let schema = Schema::new(vec![
        VariableRule::new(format!("{prefix}DATABASE_URL"), "string")
            .required()
            .with_description("PostgreSQL connection string"),
        VariableRule::new(format!("{prefix}PORT"), "int")
            .with_default("8080")
            .with_description("Server port"),
        VariableRule::new(format!("{prefix}DEBUG"), "bool")
            .with_default("false")
            .with_description("Enable debug mode"),
    ]);

    check_prefix(&schema, prefix)?;
    Ok(schema)
}

/// Ensure every rule in `schema` is namespaced with `prefix`
pub fn check_prefix(schema: &Schema, prefix: &str) -> Result<()> {
    let offenders: Vec<&str> = schema
        .variables
        .iter()
        .map(|r| r.name.as_str())
        .filter(|name| !name.starts_with(prefix))
        .collect();

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(EnvCheckError::InvalidTemplate(format!(
            "{} should be a prefix of: {}",
            prefix,
            offenders.join(", ")
        )))
    }
}

/// Render the starter schema as YAML
pub fn render_starter(prefix: &str) -> Result<String> {
    starter_schema(prefix)?.to_yaml()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::VarType;

    #[test]
    fn test_starter_schema_contents() {
        let schema = starter_schema("APP_").unwrap();
        let names: Vec<_> = schema.variables.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["APP_DATABASE_URL", "APP_PORT", "APP_DEBUG"]);

        let db = schema.rule("APP_DATABASE_URL").unwrap();
        assert!(db.required);
        assert_eq!(db.default, None);

        let port = schema.rule("APP_PORT").unwrap();
        assert_eq!(port.var_type(), Some(VarType::Int));
        assert_eq!(port.default.as_deref(), Some("8080"));
    }

    #[test]
    fn test_custom_prefix() {
        let schema = starter_schema("SVC_").unwrap();
        assert!(schema.contains("SVC_PORT"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(matches!(
            starter_schema(""),
            Err(EnvCheckError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_check_prefix_reports_offenders() {
        let schema = Schema::new(vec![
            VariableRule::new("APP_PORT", "int"),
            VariableRule::new("DATABASE_URL", "string"),
        ]);
        let err = check_prefix(&schema, "APP_").unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
        assert!(!err.to_string().contains("APP_PORT,"));
    }

    #[test]
    fn test_render_reloads() {
        let yaml = render_starter("APP_").unwrap();
        assert!(yaml.starts_with("variables:"));
        let reloaded = Schema::from_yaml_str(&yaml).unwrap();
        assert_eq!(reloaded, starter_schema("APP_").unwrap());
    }
}
