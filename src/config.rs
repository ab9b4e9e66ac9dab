//! Configuration file (`debtquest.toml`).
//!
//! All fields are optional; a missing file means defaults everywhere.
//! The database location can also come from `--db` or `DQ_DATABASE`,
//! which take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "debtquest.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: PathBuf,
    pub analysis: AnalysisConfig,
    pub linters: LintersConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Extension (without the dot) of the files handed to the linters.
    pub source_extension: String,
    /// Directory names never descended into, in addition to hidden ones.
    pub skip_dirs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintersConfig {
    pub pylint: String,
    pub flake8: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Points deducted per structured (pylint) finding.
    pub structured_penalty: f64,
    /// Points deducted per line-oriented (flake8) finding.
    pub text_penalty: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("debtquest.db"),
            analysis: AnalysisConfig::default(),
            linters: LintersConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_extension: "py".to_string(),
            skip_dirs: vec!["venv".to_string()],
        }
    }
}

impl Default for LintersConfig {
    fn default() -> Self {
        Self {
            pylint: "pylint".to_string(),
            flake8: "flake8".to_string(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            structured_penalty: 1.0,
            text_penalty: 0.5,
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist; otherwise the
    /// default file is read when present and defaults are used when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let ScoringConfig {
            structured_penalty,
            text_penalty,
        } = self.scoring;
        let valid = |p: f64| p.is_finite() && p >= 0.0;
        if !(valid(structured_penalty) && valid(text_penalty)) {
            return Err(Error::Config(
                "scoring penalties must be finite, non-negative numbers".to_string(),
            ));
        }
        let ext = &self.analysis.source_extension;
        if ext.is_empty() || ext.starts_with('.') {
            return Err(Error::Config(format!(
                "source_extension must be a bare extension like \"py\", got {ext:?}"
            )));
        }
        Ok(())
    }

    /// Apply the database override from the command line or environment.
    pub fn with_database(mut self, database: Option<PathBuf>) -> Self {
        if let Some(db) = database {
            self.database = db;
        }
        self
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
