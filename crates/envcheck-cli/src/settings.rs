//! `.envcheck.yaml` settings file
//!
//! Optional per-project (or per-user) defaults for the command-line flags:
//!
//! ```yaml
//! schema: config/schema.yaml
//! strict: true
//! verbose: false
//! prefix: APP_
//! env_file: .env.local
//! ```
//!
//! The file is searched in the working directory first, then in `$HOME`.
//! Flags given on the command line always override it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use envcheck_core::{EnvCheckError, Result};

/// File names looked up in each search directory, in order
pub const SETTINGS_FILE_NAMES: [&str; 2] = [".envcheck.yaml", ".envcheck.yml"];

/// Defaults read from a settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Schema file path
    pub schema: Option<PathBuf>,
    /// Strict mode
    pub strict: Option<bool>,
    /// Verbose output
    pub verbose: Option<bool>,
    /// Reserved variable prefix
    pub prefix: Option<String>,
    /// `.env` file to load
    pub env_file: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self> {
        // An empty file is a valid, empty settings document
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| {
            EnvCheckError::SettingsError(format!("Invalid settings file '{}': {}", origin.display(), e))
        })
    }

    /// Read settings from `path`, which must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EnvCheckError::SettingsError(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let settings = Self::from_yaml_str(&content, path)?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }

    /// Candidate settings paths for the given directories, in priority order
    pub fn search_paths(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
        let mut dirs = vec![cwd.to_path_buf()];
        if let Some(home) = home {
            if home != cwd {
                dirs.push(home.to_path_buf());
            }
        }

        dirs.iter()
            .flat_map(|dir| SETTINGS_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .collect()
    }

    /// Load the first settings file found in `cwd` or `home`
    ///
    /// Returns default settings when none exists.
    pub fn discover_in(cwd: &Path, home: Option<&Path>) -> Result<Self> {
        match Self::search_paths(cwd, home).into_iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from an explicit path or by searching the working
    /// directory and `$HOME`
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let cwd = std::env::current_dir().map_err(|e| {
            EnvCheckError::SettingsError(format!("Cannot determine working directory: {}", e))
        })?;
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::discover_in(&cwd, home.as_deref())
    }
}
