//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use tm_core::{Config, Direction, FileSource, StageName};
use tm_db::DuckDbBackend;
use tm_engine::Migrator;

use crate::cli::GlobalArgs;
use crate::style::{color_enabled, Style};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: the failure was already printed by the command.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Project directory plus its resolved configuration.
#[derive(Debug)]
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    pub(crate) fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir_absolute(&self.root)
    }
}

/// Load tidemark.yml from the project directory (defaults when absent) and
/// apply command-line overrides.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = global.project_dir.clone();
    let mut config = Config::load_or_default(&root).with_context(|| {
        format!("Failed to load configuration from {}", root.display())
    })?;

    if let Some(dir) = &global.dir {
        config.migrations_dir = dir.clone();
    }
    if let Some(database) = &global.database {
        config.database.path = Some(database.clone());
    }

    verbose(
        global,
        &format!(
            "Project {} (migrations: {}, table: {})",
            root.display(),
            config.migrations_dir,
            config.table
        ),
    );
    Ok(Project { root, config })
}

/// Resolve the database path, failing before any I/O when none is set.
pub(crate) fn database_path(project: &Project) -> Result<String> {
    match project.config.database_path(&project.root) {
        Some(path) => Ok(path),
        None => bail!(
            "No database configured: set database.path in tidemark.yml or pass --database"
        ),
    }
}

/// Open the DuckDB database at `path`.
pub(crate) fn open_database(path: &str, global: &GlobalArgs) -> Result<DuckDbBackend> {
    verbose(global, &format!("Opening database {path}"));
    if path == ":memory:" {
        log::warn!("Using an in-memory database; the ledger is discarded on exit");
    }
    DuckDbBackend::new(path).with_context(|| format!("Failed to open database {path}"))
}

/// Discover migration files under the project's migrations directory.
pub(crate) fn load_source(project: &Project, global: &GlobalArgs) -> Result<FileSource> {
    let dir = project.migrations_dir();
    let source = FileSource::from_dir(&dir, &project.config.extension)
        .with_context(|| format!("Failed to load migrations from {}", dir.display()))?;
    verbose(
        global,
        &format!("Found {} migration file(s) in {}", source.len(), dir.display()),
    );
    Ok(source)
}

/// Parse stage arguments, falling back to `defaults` when none are given.
pub(crate) fn resolve_stages(args: &[String], defaults: &[StageName]) -> Result<Vec<StageName>> {
    if args.is_empty() {
        return Ok(defaults.to_vec());
    }
    args.iter()
        .map(|s| StageName::parse(s).map_err(anyhow::Error::from))
        .collect()
}

/// Styler honouring `--no-color` and `NO_COLOR`.
pub(crate) fn style(global: &GlobalArgs) -> Style {
    Style::new(color_enabled(global.no_color))
}

/// Print `FAIL! <err>` and return the exit-code error for the caller to
/// propagate.
pub(crate) fn report_failure(
    out: &mut dyn Write,
    style: Style,
    indent: &str,
    err: &dyn fmt::Display,
) -> anyhow::Error {
    match writeln!(out, "{indent}{} {err}", style.paint("{r}FAIL!{R}")) {
        Ok(()) => ExitCode(1).into(),
        Err(e) => e.into(),
    }
}

/// Run `direction` for each stage in order, printing one block per stage.
///
/// Stops at the first failing stage; stages already committed stay applied.
pub(crate) fn run_stages(
    project: &Project,
    direction: Direction,
    stages: &[StageName],
    name: Option<&str>,
    global: &GlobalArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let style = style(global);
    let db_path = database_path(project)?;
    let source = load_source(project, global)?;
    let db = open_database(&db_path, global)?;
    let migrator = Migrator::new(&db, source, &project.config.table)?;

    if let Err(e) = migrator.init() {
        return Err(report_failure(out, style, "", &e));
    }

    let only: Vec<&str> = name.into_iter().collect();
    let (done, nothing) = match direction {
        Direction::Up => ("{g}Migrated!{R}", "{m}{I}Nothing to migrate!{R}"),
        Direction::Down => ("{g}Rolled back!{R}", "{m}{I}Nothing to rollback!{R}"),
    };

    for stage in stages {
        writeln!(
            out,
            "Stage {}{stage}{}:",
            style.paint("{b}{B}"),
            style.paint("{R}")
        )?;
        let result = match direction {
            Direction::Up => migrator.up(stage, &only),
            Direction::Down => migrator.down(stage, &only),
        };
        match result {
            Err(e) => return Err(report_failure(out, style, "    ", &e)),
            Ok(names) if names.is_empty() => writeln!(out, "    {}", style.paint(nothing))?,
            Ok(names) => {
                for migrated in names {
                    writeln!(out, "    {migrated} {}", style.paint(done))?;
                }
            }
        }
    }
    Ok(())
}

/// Print verbose output if enabled
pub(crate) fn verbose(global: &GlobalArgs, msg: &str) {
    if global.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
