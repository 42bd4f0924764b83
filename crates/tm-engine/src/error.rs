//! Error types for the migration engine.

use thiserror::Error;
use tm_core::{CoreError, Direction};
use tm_db::DbError;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Ledger table name is not a plain identifier (M001).
    #[error("[M001] Invalid ledger table name '{table}'")]
    InvalidTable { table: String },

    /// Creating the ledger table failed (M002).
    #[error("[M002] Failed to create ledger table '{table}': {source}")]
    LedgerSchema {
        table: String,
        #[source]
        source: DbError,
    },

    /// Reading the ledger failed (M003).
    #[error("[M003] Failed to read ledger table '{table}': {source}")]
    LedgerQuery {
        table: String,
        #[source]
        source: DbError,
    },

    /// A ledger row could not be decoded (M004).
    #[error("[M004] Malformed ledger row in '{table}': {message}")]
    LedgerRow { table: String, message: String },

    /// A stage script or its ledger write failed; the batch was rolled back (M005).
    #[error("[M005] [{file}] ({direction} {stage}): {source}")]
    StageFailed {
        file: String,
        direction: Direction,
        stage: String,
        #[source]
        source: DbError,
    },

    /// BEGIN or COMMIT failed (M006).
    #[error("[M006] Migration transaction failed: {0}")]
    TransactionError(String),

    /// Error from migration discovery or configuration (M007).
    #[error("[M007] {0}")]
    Core(#[from] CoreError),

    /// Any other database error (M008).
    #[error("[M008] Database error: {0}")]
    Db(DbError),
}

/// Result type alias for [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::TransactionError(msg) => EngineError::TransactionError(msg),
            other => EngineError::Db(other),
        }
    }
}
