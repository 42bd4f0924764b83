//! Migration file discovery
//!
//! A [`FileSource`] is the ordered set of migration files visible to one run.
//! Files come from a directory tree or from a `rust-embed` bundle compiled
//! into the binary; both go through the same eligibility rule and ordering.

use crate::error::{CoreError, CoreResult};
use crate::file::MigrationFile;
use crate::name::normalize_filter_name;
use regex::Regex;
use rust_embed::RustEmbed;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Ordered collection of migration files.
///
/// Construction always sorts ascending by `(order_key, raw_name)`, which is
/// the apply order. [`reverse`](Self::reverse) yields the rollback order.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    files: Vec<MigrationFile>,
}

/// Build the `^[0-9]+.*\.<ext>$` eligibility pattern for `extension`.
fn eligibility_pattern(extension: &str) -> CoreResult<Regex> {
    let pattern = format!(r"^[0-9]+.*\.{}$", regex::escape(extension));
    Regex::new(&pattern).map_err(|e| CoreError::ConfigInvalid {
        message: format!("extension '{extension}' cannot be matched: {e}"),
    })
}

impl FileSource {
    /// Build a source from already-constructed files.
    pub fn from_files(files: Vec<MigrationFile>) -> Self {
        let mut source = Self { files };
        source.sort();
        warn_duplicates(&source.files);
        source
    }

    /// Recursively read eligible files under `root`.
    ///
    /// Any unreadable directory or file aborts discovery.
    pub fn from_dir(root: &Path, extension: &str) -> CoreResult<Self> {
        if !root.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: root.display().to_string(),
            });
        }

        let pattern = eligibility_pattern(extension)?;
        let mut files = Vec::new();
        collect_dir(root, extension, &pattern, &mut files)?;
        Ok(Self::from_files(files))
    }

    /// Read eligible files from an embedded bundle.
    ///
    /// Subdirectories inside the bundle are walked too; only the base name
    /// has to match the eligibility pattern.
    pub fn from_embed<E: RustEmbed>(extension: &str) -> CoreResult<Self> {
        let pattern = eligibility_pattern(extension)?;
        let mut files = Vec::new();

        for path in E::iter() {
            let base = path.rsplit('/').next().unwrap_or(path.as_ref());
            if !pattern.is_match(base) {
                log::debug!("Skipping embedded file {path}: name does not match");
                continue;
            }
            let embedded = E::get(path.as_ref()).ok_or_else(|| CoreError::EmbeddedMissing {
                path: path.to_string(),
            })?;
            let content = String::from_utf8(embedded.data.into_owned()).map_err(|_| {
                CoreError::InvalidUtf8 {
                    path: path.to_string(),
                }
            })?;
            files.push(MigrationFile::new(base, extension, content));
        }

        Ok(Self::from_files(files))
    }

    fn sort(&mut self) {
        self.files.sort_by(|a, b| {
            a.order_key()
                .cmp(&b.order_key())
                .then_with(|| a.raw_name().cmp(b.raw_name()))
        });
    }

    /// Files in their current order
    pub fn files(&self) -> &[MigrationFile] {
        &self.files
    }

    /// Iterate files in their current order
    pub fn iter(&self) -> std::slice::Iter<'_, MigrationFile> {
        self.files.iter()
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the source has no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Same files in descending order (rollback order).
    pub fn reverse(&self) -> Self {
        let mut files = self.files.clone();
        files.reverse();
        Self { files }
    }

    /// Keep files whose display name matches one of `names`.
    ///
    /// Names are normalized first, so `Add Users`, `add-users` and
    /// `1700000000-add-users.sql` all select the same file. An empty list
    /// keeps every file.
    pub fn filter<S: AsRef<str>>(&self, names: &[S]) -> Self {
        if names.is_empty() {
            return self.clone();
        }
        let ext = self
            .files
            .first()
            .map(MigrationFile::extension)
            .unwrap_or_default();
        let wanted: Vec<String> = names
            .iter()
            .map(|n| normalize_filter_name(n.as_ref(), ext))
            .collect();
        self.retain(|file| wanted.iter().any(|w| file.is(w)))
    }

    /// Drop files whose display name appears in `applied` (Up selection).
    pub fn exclude_applied<S: AsRef<str>>(&self, applied: &[S]) -> Self {
        let applied: HashSet<&str> = applied.iter().map(|s| s.as_ref()).collect();
        self.retain(|file| !applied.contains(file.display_name()))
    }

    /// Keep only files whose display name appears in `applied` (Down selection).
    pub fn keep_only_applied<S: AsRef<str>>(&self, applied: &[S]) -> Self {
        let applied: HashSet<&str> = applied.iter().map(|s| s.as_ref()).collect();
        self.retain(|file| applied.contains(file.display_name()))
    }

    fn retain(&self, keep: impl Fn(&MigrationFile) -> bool) -> Self {
        Self {
            files: self.files.iter().filter(|f| keep(*f)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FileSource {
    type Item = &'a MigrationFile;
    type IntoIter = std::slice::Iter<'a, MigrationFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

fn collect_dir(
    dir: &Path,
    extension: &str,
    pattern: &Regex,
    files: &mut Vec<MigrationFile>,
) -> CoreResult<()> {
    let io_err = |path: &Path, source: std::io::Error| CoreError::IoWithPath {
        path: path.display().to_string(),
        source,
    };

    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            collect_dir(&path, extension, pattern, files)?;
            continue;
        }

        let Some(base) = path.file_name().and_then(|s| s.to_str()) else {
            log::debug!("Skipping {}: non UTF-8 file name", path.display());
            continue;
        };
        if !pattern.is_match(base) {
            log::debug!("Skipping {}: name does not match", path.display());
            continue;
        }

        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        let content = String::from_utf8(bytes).map_err(|_| CoreError::InvalidUtf8 {
            path: path.display().to_string(),
        })?;
        files.push(MigrationFile::new(base, extension, content));
    }
    Ok(())
}

/// Two files with one display name share a ledger identity. This is left
/// to the repository owner to fix; discovery only reports it.
fn warn_duplicates(files: &[MigrationFile]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for file in files {
        if let Some(previous) = seen.insert(file.display_name(), file.raw_name()) {
            log::warn!(
                "Migrations '{}' and '{}' share the name '{}' and will be tracked as one",
                previous,
                file.raw_name(),
                file.display_name()
            );
        }
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
