//! Environment sources
//!
//! The engine never calls `std::env` itself. It reads through [`EnvLookup`],
//! normally an [`EnvSnapshot`] captured once before validation starts, so every
//! rule in a run sees the same environment.
//!
//! `.env` files are supported through [`DotEnvFile`], parsed with `dotenvy`
//! without touching the process environment. Their entries are merged into a
//! snapshot as fallbacks: a variable already present in the process
//! environment always wins.
//!
//! # File Format
//!
//! ```text
//! # Comment
//! APP_PORT=8080
//! export APP_DEBUG=true
//! APP_GREETING="hello\nworld"
//! APP_RAW='no $escapes\n here'
//! APP_URL="https://example.com" # trailing comments are dropped
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{EnvCheckError, Result};

/// Read-only view of a set of environment variables
pub trait EnvLookup {
    /// Value of `name`, if defined
    fn get(&self, name: &str) -> Option<&str>;

    /// Every defined variable name
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

/// Immutable, ordered copy of an environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let mut vars = BTreeMap::new();
        for (name, value) in std::env::vars_os() {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => {
                    vars.insert(name, value);
                }
                (Ok(name), Err(_)) => {
                    tracing::warn!(%name, "Skipping environment variable with non UTF-8 value");
                }
                (Err(name), _) => {
                    tracing::warn!(name = ?name, "Skipping environment variable with non UTF-8 name");
                }
            }
        }
        tracing::debug!(count = vars.len(), "Captured process environment");
        Self { vars }
    }

    /// Add entries for names that are not already present
    pub fn with_fallbacks<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in entries {
            self.vars.entry(name.into()).or_insert_with(|| value.into());
        }
        self
    }

    /// Set a variable, replacing any existing value
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True when no variables are defined
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvLookup for EnvSnapshot {
    fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.vars.keys().map(String::as_str))
    }
}

/// Parsed contents of a `.env` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotEnvFile {
    /// Path the entries were read from, if any
    pub path: Option<PathBuf>,
    /// `(name, value)` pairs in file order; later duplicates are kept
    pub entries: Vec<(String, String)>,
}

impl DotEnvFile {
    /// Read and parse a `.env` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            EnvCheckError::file_error(format!(
                "Failed to read env file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut file = Self::collect(iter);
        file.path = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            entries = file.entries.len(),
            "Loaded env file"
        );
        Ok(file)
    }

    /// Read `path` if it exists; a missing file yields no entries
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No env file found");
            Ok(Self::default())
        }
    }

    /// Parse `.env` text
    pub fn parse(content: &str) -> Self {
        Self::collect(dotenvy::from_read_iter(content.as_bytes()))
    }

    /// Entries with duplicates resolved so the last assignment wins
    pub fn into_vars(self) -> BTreeMap<String, String> {
        self.entries.into_iter().collect()
    }

    // Lines dotenvy cannot parse are skipped so one bad line does not hide
    // the rest of the file
    fn collect<R: Read>(iter: dotenvy::Iter<R>) -> Self {
        let mut entries = Vec::new();
        for item in iter {
            match item {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(error = %e, "Ignoring unparsable env file line"),
            }
        }

        Self {
            path: None,
            entries,
        }
    }
}
