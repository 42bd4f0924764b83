//! New migration file creation

use crate::error::{CoreError, CoreResult};
use crate::name::MigrationSlug;
use crate::stage::{Direction, StageName};
use std::path::{Path, PathBuf};

/// Render the body of a new migration: one up marker per stage in order,
/// then the down markers in reverse so rollback sections read bottom-up.
pub fn migration_template(stages: &[StageName]) -> String {
    let mut out = String::new();
    let markers = stages
        .iter()
        .map(|s| (Direction::Up, s))
        .chain(stages.iter().rev().map(|s| (Direction::Down, s)));
    for (direction, stage) in markers {
        out.push_str(&format!("--{{ {}: {} }}\n\n", direction.keyword(), stage));
    }
    out
}

/// Create `<order_key>-<slug>.<ext>` in `dir` and return its path.
///
/// The name is validated before anything touches the filesystem. `dir` is
/// created if missing; an existing file with the same name is never
/// overwritten.
pub fn new_migration_file(
    dir: &Path,
    name: &str,
    extension: &str,
    stages: &[StageName],
    order_key: i64,
) -> CoreResult<PathBuf> {
    let slug = MigrationSlug::parse(name)?;
    let io_err = |path: &Path, source: std::io::Error| CoreError::IoWithPath {
        path: path.display().to_string(),
        source,
    };

    if dir.exists() && !dir.is_dir() {
        return Err(CoreError::MigrationsDirNotFound {
            path: dir.display().to_string(),
        });
    }
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let path = dir.join(format!("{order_key}-{slug}.{extension}"));
    if path.exists() {
        return Err(CoreError::MigrationExists {
            path: path.display().to_string(),
        });
    }

    std::fs::write(&path, migration_template(stages)).map_err(|e| io_err(&path, e))?;
    log::debug!("Created migration file {}", path.display());
    Ok(path)
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
