//! Error types for tm-core

use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Migrations directory missing or not a directory
    #[error("[C003] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// C004: Failed to read a migration file or directory
    #[error("[C004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C005: Migration file content is not valid UTF-8
    #[error("[C005] Migration file '{path}' is not valid UTF-8")]
    InvalidUtf8 { path: String },

    /// C006: Embedded bundle listed a file it could not return
    #[error("[C006] Embedded migration '{path}' could not be loaded")]
    EmbeddedMissing { path: String },

    /// C007: Migration name slugifies to nothing
    #[error("[C007] Invalid migration name '{name}'")]
    InvalidMigrationName { name: String },

    /// C008: Stage name is empty, too long, or has illegal characters
    #[error("[C008] Invalid stage name '{name}': {reason}")]
    InvalidStageName { name: String, reason: String },

    /// C009: Migration file already exists
    #[error("[C009] Migration file already exists: {path}")]
    MigrationExists { path: String },

    /// C010: Schema/YAML parse error
    #[error("[C010] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
