//! Persisted record of applied (migration, stage) pairs.
//!
//! One row per pair. Up inserts the row and Down deletes it, each in the
//! same transaction as the script that caused it. Rows are never updated.

use crate::error::{EngineError, EngineResult};
use chrono::NaiveDateTime;
use serde::Serialize;
use tm_core::config::is_identifier;
use tm_core::StageName;
use tm_db::{Database, DbResult};

/// Layout of `CAST(created_at AS VARCHAR)`; the fraction is optional.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One applied (migration, stage) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// Migration display name
    pub name: String,
    /// Stage the migration was applied for
    pub stage: String,
    /// Server-assigned time of application
    pub applied_at: NaiveDateTime,
}

/// Ledger entries in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Summary {
    entries: Vec<LedgerEntry>,
}

impl Summary {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names in entry order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Entries grouped by stage, stages in order of first appearance.
    pub fn group_by_stage(&self) -> Vec<(&str, Vec<&LedgerEntry>)> {
        group_by(&self.entries, |e| e.stage.as_str())
    }

    /// Entries grouped by migration name, names in order of first appearance.
    pub fn group_by_file(&self) -> Vec<(&str, Vec<&LedgerEntry>)> {
        group_by(&self.entries, |e| e.name.as_str())
    }
}

fn group_by<'a>(
    entries: &'a [LedgerEntry],
    key: impl Fn(&'a LedgerEntry) -> &'a str,
) -> Vec<(&'a str, Vec<&'a LedgerEntry>)> {
    let mut groups: Vec<(&str, Vec<&LedgerEntry>)> = Vec::new();
    for entry in entries {
        let k = key(entry);
        match groups.iter().position(|(g, _)| *g == k) {
            Some(i) => groups[i].1.push(entry),
            None => groups.push((k, vec![entry])),
        }
    }
    groups
}

/// Ledger table accessor bound to one database handle.
pub struct Ledger<'a> {
    db: &'a dyn Database,
    table: String,
}

impl<'a> Ledger<'a> {
    /// Bind to `table` on `db`. The name is spliced into SQL, so it must be
    /// a plain identifier.
    pub fn new(db: &'a dyn Database, table: &str) -> EngineResult<Self> {
        if !is_identifier(table) {
            return Err(EngineError::InvalidTable {
                table: table.to_string(),
            });
        }
        Ok(Self {
            db,
            table: table.to_string(),
        })
    }

    /// Ledger table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether the ledger table exists yet
    pub fn exists(&self) -> EngineResult<bool> {
        self.db
            .relation_exists(&self.table)
            .map_err(|source| self.query_error(source))
    }

    /// Create the ledger table if it is absent.
    pub fn ensure_schema(&self) -> EngineResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                name       VARCHAR(100) NOT NULL,
                stage      VARCHAR(30)  NOT NULL,
                created_at TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (name, stage)
            )",
            self.table
        );
        self.db
            .execute_batch(&sql)
            .map_err(|source| EngineError::LedgerSchema {
                table: self.table.clone(),
                source,
            })
    }

    /// All entries, oldest first.
    ///
    /// Rows sharing a timestamp keep insertion order, which is apply order.
    pub fn summary(&self) -> EngineResult<Summary> {
        let sql = format!(
            "SELECT name, stage, CAST(created_at AS VARCHAR) FROM {} \
             ORDER BY created_at ASC, rowid ASC",
            self.table
        );
        self.load(&sql, &[])
    }

    /// Entries for one stage, oldest first.
    pub fn stage_summary(&self, stage: &StageName) -> EngineResult<Summary> {
        let sql = format!(
            "SELECT name, stage, CAST(created_at AS VARCHAR) FROM {} \
             WHERE stage = ? ORDER BY created_at ASC, rowid ASC",
            self.table
        );
        self.load(&sql, &[stage.as_str()])
    }

    pub(crate) fn insert(&self, name: &str, stage: &StageName) -> DbResult<()> {
        let sql = format!("INSERT INTO {} (name, stage) VALUES (?, ?)", self.table);
        self.db.execute(&sql, &[name, stage.as_str()]).map(|_| ())
    }

    pub(crate) fn delete(&self, name: &str, stage: &StageName) -> DbResult<()> {
        let sql = format!("DELETE FROM {} WHERE name = ? AND stage = ?", self.table);
        self.db.execute(&sql, &[name, stage.as_str()]).map(|_| ())
    }

    fn load(&self, sql: &str, params: &[&str]) -> EngineResult<Summary> {
        let rows = self
            .db
            .query_strings(sql, params)
            .map_err(|source| self.query_error(source))?;
        let entries = rows
            .iter()
            .map(|row| self.parse_row(row))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Summary::new(entries))
    }

    fn parse_row(&self, row: &[String]) -> EngineResult<LedgerEntry> {
        let [name, stage, created_at] = row else {
            return Err(self.row_error(format!("expected 3 columns, got {}", row.len())));
        };
        let applied_at = NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
            .map_err(|e| self.row_error(format!("bad timestamp '{created_at}' for {name}: {e}")))?;
        Ok(LedgerEntry {
            name: name.clone(),
            stage: stage.clone(),
            applied_at,
        })
    }

    fn query_error(&self, source: tm_db::DbError) -> EngineError {
        EngineError::LedgerQuery {
            table: self.table.clone(),
            source,
        }
    }

    fn row_error(&self, message: String) -> EngineError {
        EngineError::LedgerRow {
            table: self.table.clone(),
            message,
        }
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
