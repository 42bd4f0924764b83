//! Down command implementation

use anyhow::Result;
use std::io::{self, Write};
use tm_core::Direction;

use crate::cli::{GlobalArgs, StageArgs};
use crate::commands::common::{load_project, resolve_stages, run_stages};

/// Execute the down command
pub(crate) fn execute(args: &StageArgs, global: &GlobalArgs) -> Result<()> {
    execute_to(args, global, &mut io::stdout().lock())
}

/// Roll back the requested stages. With none given, the configured stages
/// run in reverse so later stages (seeds) are removed before the schema.
pub(crate) fn execute_to(args: &StageArgs, global: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let project = load_project(global)?;
    let mut stages = resolve_stages(&args.stages, &project.config.stages)?;
    if args.stages.is_empty() {
        stages.reverse();
    }
    run_stages(
        &project,
        Direction::Down,
        &stages,
        args.name.as_deref(),
        global,
        out,
    )
}

#[cfg(test)]
#[path = "down_test.rs"]
mod tests;
