//! Up command implementation

use anyhow::Result;
use std::io::{self, Write};
use tm_core::Direction;

use crate::cli::{GlobalArgs, StageArgs};
use crate::commands::common::{load_project, resolve_stages, run_stages};

/// Execute the up command
pub(crate) fn execute(args: &StageArgs, global: &GlobalArgs) -> Result<()> {
    execute_to(args, global, &mut io::stdout().lock())
}

/// Apply the requested stages (default: configured stages, in order).
pub(crate) fn execute_to(args: &StageArgs, global: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let project = load_project(global)?;
    let stages = resolve_stages(&args.stages, &project.config.stages)?;
    run_stages(
        &project,
        Direction::Up,
        &stages,
        args.name.as_deref(),
        global,
        out,
    )
}

#[cfg(test)]
#[path = "up_test.rs"]
mod tests;
