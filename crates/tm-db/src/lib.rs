//! tm-db - Database abstraction layer for Tidemark
//!
//! This crate provides the `Database` trait the migration engine executes
//! against, a DuckDB implementation, and a transaction helper.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod transaction;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use transaction::with_transaction;
