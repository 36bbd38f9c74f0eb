//! Planner configuration loaded from TOML with environment overrides.
//!
//! ```toml
//! [store]
//! project_id = "sprintplanner"
//! application_id = "1:000000000000:web:0000"
//! api_key = "key"
//!
//! [planning]
//! assignees = ["Ada", "Grace"]
//! ```
//!
//! `SPRINT_PLANNER_PROJECT_ID`, `SPRINT_PLANNER_APPLICATION_ID`, and
//! `SPRINT_PLANNER_API_KEY` replace the matching `[store]` values.

use crate::planning::domain::UNASSIGNED;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding [`StoreConfig::project_id`].
pub const PROJECT_ID_ENV: &str = "SPRINT_PLANNER_PROJECT_ID";
/// Environment variable overriding [`StoreConfig::application_id`].
pub const APPLICATION_ID_ENV: &str = "SPRINT_PLANNER_APPLICATION_ID";
/// Environment variable overriding [`StoreConfig::api_key`].
pub const API_KEY_ENV: &str = "SPRINT_PLANNER_API_KEY";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required credential is empty after overrides.
    #[error("missing store setting: {0}")]
    Missing(&'static str),
}

/// Credentials identifying the remote document database.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StoreConfig {
    /// Database project identifier.
    #[serde(default)]
    pub project_id: String,
    /// Client application identifier.
    #[serde(default)]
    pub application_id: String,
    /// Client API key.
    #[serde(default)]
    pub api_key: String,
}

/// Planning defaults offered by the screens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PlanningConfig {
    /// Team members tasks can be assigned to.
    #[serde(default)]
    pub assignees: Vec<String>,
}

/// Complete planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PlannerConfig {
    /// Remote store credentials.
    #[serde(default)]
    pub store: StoreConfig,
    /// Planning defaults.
    #[serde(default)]
    pub planning: PlanningConfig,
}

impl PlannerConfig {
    /// Parses configuration from TOML text without applying overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid TOML for
    /// this schema.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads a TOML file, applies environment overrides, and validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or a
    /// credential is empty.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content)?.with_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        tracing::debug!(path = %path.display(), project_id = %config.store.project_id, "configuration loaded");
        Ok(config)
    }

    /// Replaces store credentials with values returned by `lookup`.
    ///
    /// Blank values leave the file setting in place.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let targets = [
            (PROJECT_ID_ENV, &mut self.store.project_id),
            (APPLICATION_ID_ENV, &mut self.store.application_id),
            (API_KEY_ENV, &mut self.store.api_key),
        ];
        for (name, target) in targets {
            if let Some(value) = lookup(name).filter(|value| !value.trim().is_empty()) {
                *target = value;
            }
        }
        self
    }

    /// Checks that every store credential is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first empty credential.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("project_id", &self.store.project_id),
            ("application_id", &self.store.application_id),
            ("api_key", &self.store.api_key),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some(&(name, _)) => Err(ConfigError::Missing(name)),
            None => Ok(()),
        }
    }

    /// Returns the assignee roster with [`UNASSIGNED`] first.
    ///
    /// Blank and repeated names are dropped.
    #[must_use]
    pub fn roster(&self) -> Vec<String> {
        let mut roster = vec![UNASSIGNED.to_owned()];
        for name in &self.planning.assignees {
            let trimmed = name.trim();
            if !trimmed.is_empty() && !roster.iter().any(|known| known == trimmed) {
                roster.push(trimmed.to_owned());
            }
        }
        roster
    }
}
