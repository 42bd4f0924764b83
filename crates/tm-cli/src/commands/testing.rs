//! Fixtures shared by command tests.

use crate::cli::GlobalArgs;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Project with a file-backed database and the default stages.
pub(crate) fn project() -> TempDir {
    project_with_config("database:\n  path: app.duckdb\n")
}

pub(crate) fn project_with_config(yaml: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tidemark.yml"), yaml).unwrap();
    fs::create_dir_all(dir.path().join("migrations")).unwrap();
    dir
}

pub(crate) fn write_migration(project: &Path, name: &str, content: &str) {
    fs::write(project.join("migrations").join(name), content).unwrap();
}

pub(crate) fn global(project: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project.to_path_buf(),
        database: None,
        dir: None,
        no_color: true,
    }
}

/// Run a command against an in-memory buffer and return what it printed.
pub(crate) fn capture<F>(run: F) -> (anyhow::Result<()>, String)
where
    F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
{
    let mut buf = Vec::new();
    let result = run(&mut buf);
    (result, String::from_utf8(buf).unwrap())
}

pub(crate) const USERS: &str = "\
--{ up: up }
CREATE TABLE users (id INTEGER);

--{ up: seed }
INSERT INTO users VALUES (1);

--{ down: seed }
DELETE FROM users;

--{ down: up }
DROP TABLE users;
";

pub(crate) const POSTS: &str = "\
--{ up: up }
CREATE TABLE posts (id INTEGER);

--{ down: up }
DROP TABLE posts;
";
