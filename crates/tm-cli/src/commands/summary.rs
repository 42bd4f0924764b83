//! Summary command implementation

use anyhow::Result;
use std::io::{self, Write};
use tm_core::{humanize, FileSource};
use tm_engine::Migrator;

use crate::cli::{GlobalArgs, SummaryArgs};
use crate::commands::common::{
    database_path, load_project, open_database, report_failure, style,
};

/// Execute the summary command
pub(crate) fn execute(args: &SummaryArgs, global: &GlobalArgs) -> Result<()> {
    execute_to(args, global, &mut io::stdout().lock())
}

/// Print applied migrations grouped by stage.
pub(crate) fn execute_to(
    args: &SummaryArgs,
    global: &GlobalArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let project = load_project(global)?;
    let style = style(global);
    let db_path = database_path(&project)?;
    let db = open_database(&db_path, global)?;

    // The ledger alone answers this; no files are needed.
    let migrator = Migrator::new(&db, FileSource::default(), &project.config.table)?;
    let summary = match migrator.summary() {
        Ok(summary) => summary,
        Err(e) => return Err(report_failure(out, style, "", &e)),
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    if summary.is_empty() {
        writeln!(out, "{}", style.paint("{m}{I}Nothing migrated!{R}"))?;
        return Ok(());
    }

    writeln!(out, "Migration Summary:")?;
    writeln!(out)?;
    for (stage, entries) in summary.group_by_stage() {
        writeln!(
            out,
            "Stage {}{stage}{}: {}({}){}",
            style.paint("{b}{B}"),
            style.paint("{R}"),
            style.paint("{B}"),
            entries.len(),
            style.paint("{R}")
        )?;
        for entry in entries {
            writeln!(out, "    {}", humanize(&entry.name))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
