//! Database trait definition

use crate::error::DbResult;

/// SQL execution surface used by the migration engine.
///
/// Calls are blocking and issued in sequence on one connection. Parameters
/// are bound positionally to `?` placeholders.
pub trait Database: Send + Sync {
    /// Execute a single statement with bound parameters, returns affected rows
    fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize>;

    /// Execute a script of one or more statements as one unit
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return every row with each column rendered as text
    fn query_strings(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Open a transaction
    fn begin(&self) -> DbResult<()> {
        self.execute_batch("BEGIN TRANSACTION")
    }

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()> {
        self.execute_batch("COMMIT")
    }

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()> {
        self.execute_batch("ROLLBACK")
    }
}
