//! Configuration types and parsing for tidemark.yml

use crate::error::{CoreError, CoreResult};
use crate::stage::StageName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names looked up in a project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["tidemark.yml", "tidemark.yaml"];

/// Project configuration from tidemark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Migration file extension, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Ledger table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Stages run by `up`/`down` when none are given, and the sections
    /// written into new migration files
    #[serde(default = "default_stages")]
    pub stages: Vec<StageName>,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, or `:memory:`
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            extension: default_extension(),
            table: default_table(),
            stages: default_stages(),
            database: DatabaseConfig::default(),
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_extension() -> String {
    "sql".to_string()
}

fn default_table() -> String {
    "migrations".to_string()
}

fn default_stages() -> Vec<StageName> {
    ["up", "script", "seed"]
        .into_iter()
        .filter_map(|s| StageName::parse(s).ok())
        .collect()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for tidemark.yml or tidemark.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map(|path| Self::load(&path))
            .unwrap_or_else(|| {
                Err(CoreError::ConfigNotFound {
                    path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                })
            })
    }

    /// Load from a project directory, falling back to defaults when the
    /// directory has no config file.
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::load_from_dir(dir) {
            Err(CoreError::ConfigNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "extension must be non-empty and given without a leading dot, got '{}'",
                    self.extension
                ),
            });
        }

        if self.stages.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one stage must be specified".to_string(),
            });
        }

        if !is_identifier(&self.table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "table '{}' must be a plain SQL identifier (letters, digits, '_')",
                    self.table
                ),
            });
        }

        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get absolute migrations directory relative to a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Database path resolved against the project root.
    ///
    /// `:memory:` and absolute paths are returned unchanged.
    pub fn database_path(&self, root: &Path) -> Option<String> {
        self.database.path.as_deref().map(|p| {
            if p == ":memory:" || Path::new(p).is_absolute() {
                p.to_string()
            } else {
                root.join(p).display().to_string()
            }
        })
    }
}

/// Whether `name` is safe to splice into SQL as an unquoted identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
