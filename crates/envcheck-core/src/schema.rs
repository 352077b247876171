//! Schema model and loading
//!
//! A schema is an ordered list of [`VariableRule`]s read from a YAML document:
//!
//! ```yaml
//! variables:
//!   - name: APP_PORT
//!     description: Server port
//!     type: int
//!     required: false
//!     default: "8080"
//! ```
//!
//! The `type` tag is kept verbatim. Unrecognized tags load fine and are
//! reported by the validator, so a typo in one rule never hides the results
//! for the others.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnvCheckError, Result};

/// Value types the validator knows how to check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    /// Any string, including the empty string
    String,
    /// Base-10 signed 64-bit integer
    Int,
    /// Boolean token (`true`, `false`, `t`, `f`, `1`, `0`)
    Bool,
}

impl VarType {
    /// All recognized types, in the order they are listed to users
    pub const ALL: [VarType; 3] = [VarType::String, VarType::Int, VarType::Bool];

    /// Look up a schema type tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(VarType::String),
            "int" => Some(VarType::Int),
            "bool" => Some(VarType::Bool),
            _ => None,
        }
    }

    /// The tag used for this type in schema documents
    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Int => "int",
            VarType::Bool => "bool",
        }
    }

    /// Comma separated list of supported tags
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(VarType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One schema entry describing a single environment variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRule {
    /// Variable name, e.g. `APP_PORT`
    pub name: String,
    /// Free-text documentation
    #[serde(default)]
    pub description: String,
    /// Raw type tag as written in the schema
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Whether the variable must resolve to a non-empty value
    #[serde(default)]
    pub required: bool,
    /// Value used when the environment does not define the variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl VariableRule {
    /// Create a rule with no description, not required and without a default
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            type_tag: type_tag.into(),
            required: false,
            default: None,
        }
    }

    /// Mark the rule as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The recognized type, if the tag is one of `string`, `int`, `bool`
    pub fn var_type(&self) -> Option<VarType> {
        VarType::from_tag(&self.type_tag)
    }

    /// The default value, treating an empty string as no default
    pub fn effective_default(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }
}

/// Ordered set of variable rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Rules in document order
    pub variables: Vec<VariableRule>,
}

impl Schema {
    /// Build a schema from rules, keeping their order
    pub fn new(variables: Vec<VariableRule>) -> Self {
        Self { variables }
    }

    /// Parse a schema from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<inline>")
    }

    /// Read and parse a schema file
    ///
    /// Fails with [`EnvCheckError::SchemaUnreadable`] when the file cannot be
    /// read and [`EnvCheckError::SchemaParse`] when it is not a schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EnvCheckError::schema_unreadable(path, e))?;

        let schema = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            rules = schema.variables.len(),
            "Loaded schema"
        );
        Ok(schema)
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        let schema: Schema = serde_yaml::from_str(content)
            .map_err(|e| EnvCheckError::schema_parse(origin, e.to_string()))?;

        for (index, rule) in schema.variables.iter().enumerate() {
            if rule.name.trim().is_empty() {
                return Err(EnvCheckError::SchemaInvalid(format!(
                    "variable #{} in '{}' has an empty name",
                    index + 1,
                    origin
                )));
            }
        }

        Ok(schema)
    }

    /// Serialize the schema back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Look up a rule by name
    pub fn rule(&self, name: &str) -> Option<&VariableRule> {
        self.variables.iter().find(|r| r.name == name)
    }

    /// Whether the schema declares a variable called `name`
    pub fn contains(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True when the schema has no rules
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Notes for schema authors about rules that load fine but are probably
    /// not what was intended
    pub fn authoring_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for rule in &self.variables {
            if rule.required {
                if let Some(default) = rule.effective_default() {
                    warnings.push(format!(
                        "{} is required but has default \"{}\"; it can never be reported as missing",
                        rule.name, default
                    ));
                }
            }
            if !seen.insert(rule.name.as_str()) {
                warnings.push(format!(
                    "{} is declared more than once; every declaration is checked",
                    rule.name
                ));
            }
        }

        warnings
    }
}
