//! Transaction helper shared by everything that writes through [`Database`].

use crate::error::DbError;
use crate::traits::Database;

/// Run `body` between `BEGIN` and `COMMIT`, rolling back if it fails.
///
/// A failed COMMIT is rolled back as well and reported as a
/// [`DbError::TransactionError`]. A failed ROLLBACK is only logged so the
/// error from `body` reaches the caller.
pub fn with_transaction<D, T, E, F>(db: &D, body: F) -> Result<T, E>
where
    D: Database + ?Sized,
    E: From<DbError>,
    F: FnOnce(&D) -> Result<T, E>,
{
    db.begin()
        .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

    match body(db) {
        Ok(value) => {
            if let Err(commit_err) = db.commit() {
                rollback_quietly(db);
                return Err(DbError::TransactionError(format!("COMMIT failed: {commit_err}")).into());
            }
            Ok(value)
        }
        Err(err) => {
            rollback_quietly(db);
            Err(err)
        }
    }
}

fn rollback_quietly<D: Database + ?Sized>(db: &D) {
    if let Err(e) = db.rollback() {
        log::warn!("ROLLBACK failed on {}: {e}", db.db_type());
    }
}

#[cfg(test)]
#[path = "transaction_test.rs"]
mod tests;
