//! tm-core - Core library for Tidemark
//!
//! This crate provides the migration file model and its section parser, file
//! discovery from directories and embedded bundles, stage names, project
//! configuration, and new-file scaffolding. It has no database dependency;
//! `tm-engine` consumes it to drive migrations.

pub mod config;
pub mod error;
pub mod file;
pub mod name;
mod newtype_string;
pub mod scaffold;
pub mod source;
pub mod stage;

pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use file::MigrationFile;
pub use name::{humanize, normalize_filter_name, slugify, MigrationSlug};
pub use scaffold::{migration_template, new_migration_file};
pub use source::FileSource;
pub use stage::{Direction, StageName};
