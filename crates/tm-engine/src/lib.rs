//! tm-engine - Migration engine for Tidemark
//!
//! Tracks which (migration, stage) pairs have been applied in a ledger
//! table and applies or reverses pending stages transactionally. Files come
//! from `tm-core`; SQL runs through the `tm-db` [`Database`](tm_db::Database)
//! trait.

pub mod driver;
pub mod error;
pub mod ledger;

pub use driver::{MigrationStatus, Migrator};
pub use error::{EngineError, EngineResult};
pub use ledger::{Ledger, LedgerEntry, Summary};
