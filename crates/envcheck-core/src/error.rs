//! Error types for envcheck
//!
//! These cover the boundary around the validation engine: reading and parsing
//! the schema document, `.env` files and the starter template. Per-variable
//! failures are not errors in this sense; they live in [`crate::diagnostic`]
//! and are collected into a report.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for envcheck operations
#[derive(Error, Debug)]
pub enum EnvCheckError {
    /// The schema file could not be read
    #[error("Cannot read schema file '{}': {source}", path.display())]
    SchemaUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema document is not valid YAML or does not match the schema shape
    #[error("Cannot parse schema '{path}': {message}")]
    SchemaParse { path: String, message: String },

    /// The schema parsed but contains an entry that cannot be validated
    #[error("Invalid schema: {0}")]
    SchemaInvalid(String),

    /// Settings file error
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// File access or I/O error outside of schema loading
    #[error("File error: {0}")]
    FileError(String),

    /// The starter template violates the naming convention
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EnvCheckError {
    /// Create a schema-unreadable error for `path`
    pub fn schema_unreadable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        EnvCheckError::SchemaUnreadable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a schema parse error
    pub fn schema_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        EnvCheckError::SchemaParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        EnvCheckError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        EnvCheckError::FileError(msg.into())
    }

    /// True when the schema could not be loaded at all
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            EnvCheckError::SchemaUnreadable { .. }
                | EnvCheckError::SchemaParse { .. }
                | EnvCheckError::SchemaInvalid(_)
        )
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        !matches!(self, EnvCheckError::Serialization(_))
    }
}

impl From<serde_yaml::Error> for EnvCheckError {
    fn from(err: serde_yaml::Error) -> Self {
        EnvCheckError::Serialization(format!("YAML error: {}", err))
    }
}

/// Result type alias for envcheck operations
pub type Result<T> = std::result::Result<T, EnvCheckError>;
