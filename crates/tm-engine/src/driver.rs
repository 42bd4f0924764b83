//! Stage driver: applies or reverses one stage across a file source.
//!
//! Each call to [`Migrator::up`] or [`Migrator::down`] runs every candidate
//! file inside a single transaction. Either all of them are applied and
//! recorded, or none are.

use crate::error::{EngineError, EngineResult};
use crate::ledger::{Ledger, Summary};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use tm_core::{Direction, FileSource, MigrationFile, StageName};
use tm_db::{with_transaction, Database, DbError};

/// Applied or pending state of one file for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub name: String,
    pub applied_at: Option<NaiveDateTime>,
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

/// Runs stage operations for one file source against one database.
pub struct Migrator<'a> {
    db: &'a dyn Database,
    source: FileSource,
    ledger: Ledger<'a>,
}

impl<'a> Migrator<'a> {
    /// Create a migrator recording into the ledger table `table`.
    pub fn new(db: &'a dyn Database, source: FileSource, table: &str) -> EngineResult<Self> {
        let ledger = Ledger::new(db, table)?;
        Ok(Self { db, source, ledger })
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    pub fn ledger(&self) -> &Ledger<'a> {
        &self.ledger
    }

    /// Create the ledger table if needed.
    pub fn init(&self) -> EngineResult<()> {
        self.ledger.ensure_schema()
    }

    /// Every applied entry, oldest first.
    pub fn summary(&self) -> EngineResult<Summary> {
        self.init()?;
        self.ledger.summary()
    }

    /// Applied entries for `stage`, oldest first.
    pub fn stage_summary(&self, stage: &StageName) -> EngineResult<Summary> {
        self.init()?;
        self.ledger.stage_summary(stage)
    }

    /// Apply the `stage` section of every pending file, in ascending order.
    ///
    /// `only` restricts the run to the named migrations; empty means all.
    /// Returns the display names that were applied. Files without an up
    /// section for `stage` are skipped and stay pending.
    pub fn up<S: AsRef<str>>(&self, stage: &StageName, only: &[S]) -> EngineResult<Vec<String>> {
        self.run(stage, Direction::Up, only)
    }

    /// Reverse the `stage` section of every applied file, in descending
    /// order. Mirrors [`up`](Self::up).
    pub fn down<S: AsRef<str>>(
        &self,
        stage: &StageName,
        only: &[S],
    ) -> EngineResult<Vec<String>> {
        self.run(stage, Direction::Down, only)
    }

    /// State of every source file for `stage`, in apply order.
    ///
    /// Does not create the ledger table; with no table every file is pending.
    pub fn status(&self, stage: &StageName) -> EngineResult<Vec<MigrationStatus>> {
        let applied: HashMap<String, NaiveDateTime> = if self.ledger.exists()? {
            self.ledger
                .stage_summary(stage)?
                .entries()
                .iter()
                .map(|e| (e.name.clone(), e.applied_at))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(self
            .source
            .iter()
            .map(|file| MigrationStatus {
                name: file.display_name().to_string(),
                applied_at: applied.get(file.display_name()).copied(),
            })
            .collect())
    }

    fn run<S: AsRef<str>>(
        &self,
        stage: &StageName,
        direction: Direction,
        only: &[S],
    ) -> EngineResult<Vec<String>> {
        let summary = self.stage_summary(stage)?;
        let applied = summary.names();

        let candidates = match direction {
            Direction::Up => self.source.filter(only).exclude_applied(&applied),
            Direction::Down => self.source.reverse().filter(only).keep_only_applied(&applied),
        };
        if candidates.is_empty() {
            log::debug!("No candidates for {direction} {stage}");
            return Ok(Vec::new());
        }

        let changed = with_transaction(self.db, |db| {
            let mut changed = Vec::new();
            for file in &candidates {
                if self.run_file(db, file, stage, direction)? {
                    changed.push(file.display_name().to_string());
                }
            }
            Ok::<_, EngineError>(changed)
        })?;

        if !changed.is_empty() {
            log::info!(
                "{direction} {stage}: committed {} migration(s) on {}",
                changed.len(),
                self.db.db_type()
            );
        }
        Ok(changed)
    }

    /// Execute one file's section and its ledger write. Returns false when
    /// the file has nothing for this stage.
    fn run_file(
        &self,
        db: &dyn Database,
        file: &MigrationFile,
        stage: &StageName,
        direction: Direction,
    ) -> EngineResult<bool> {
        let script = file.section(stage.as_str(), direction);
        if script.is_empty() {
            log::debug!(
                "Skipping {}: no {} section for stage {stage}",
                file.raw_name(),
                direction.keyword()
            );
            return Ok(false);
        }

        let name = file.display_name();
        log::debug!("Running {direction} {stage} for {name}");
        let failed = |source: DbError| EngineError::StageFailed {
            file: name.to_string(),
            direction,
            stage: stage.to_string(),
            source,
        };

        db.execute_batch(&script).map_err(failed)?;
        match direction {
            Direction::Up => self.ledger.insert(name, stage),
            Direction::Down => self.ledger.delete(name, stage),
        }
        .map_err(failed)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
