//! New command implementation

use anyhow::Result;
use chrono::Utc;
use std::io::{self, Write};
use tm_core::new_migration_file;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::{load_project, report_failure, style, verbose};

/// Execute the new command
pub(crate) fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    execute_to(args, global, &mut io::stdout().lock())
}

/// Create `<unix-seconds>-<slug>.<ext>` in the migrations directory.
pub(crate) fn execute_to(args: &NewArgs, global: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let project = load_project(global)?;
    let style = style(global);

    let created = new_migration_file(
        &project.migrations_dir(),
        &args.name,
        &project.config.extension,
        &project.config.stages,
        Utc::now().timestamp(),
    );

    match created {
        Ok(path) => {
            verbose(global, &format!("Wrote {}", path.display()));
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            writeln!(
                out,
                "{}{file_name}{}",
                style.paint("{m}{I}"),
                style.paint("{R}: {g}CREATED!{R}")
            )?;
            Ok(())
        }
        Err(e) => Err(report_failure(out, style, "", &e)),
    }
}

#[cfg(test)]
#[path = "new_test.rs"]
mod tests;
