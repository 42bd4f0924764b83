//! Migration file representation and section extraction
//!
//! A migration file carries one or more stage sections delimited by marker
//! lines:
//!
//! ```sql
//! --{ up: up }
//! CREATE TABLE users (id INTEGER);
//! --{ up: seed }
//! INSERT INTO users VALUES (1);
//! --{ down: seed }
//! DELETE FROM users;
//! --{ down: up }
//! DROP TABLE users;
//! ```
//!
//! Markers are matched after trimming, lowercasing and removing all
//! whitespace, so `-- { UP : Seed }` opens the same section as
//! `--{up:seed}`.

use crate::name::{humanize, order_key_of, slugify, strip_decorations};
use crate::stage::Direction;

/// One migration definition file, as read from disk or an embedded bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    raw_name: String,
    content: String,
    extension: String,
}

impl MigrationFile {
    /// Create a migration file from its base name (with extension), the
    /// extension tag (without the dot) and its text content.
    pub fn new(
        raw_name: impl Into<String>,
        extension: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            raw_name: raw_name.into(),
            content: content.into(),
            extension: extension.into(),
        }
    }

    /// File base name, e.g. `1700000000-add-users.sql`
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Raw file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Extension tag without the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Integer from the numeric name prefix; 0 when absent.
    pub fn order_key(&self) -> i64 {
        order_key_of(&self.raw_name)
    }

    /// Name with the numeric prefix and extension stripped.
    ///
    /// This is the identity recorded in the ledger.
    pub fn display_name(&self) -> &str {
        strip_decorations(&self.raw_name, &self.extension)
    }

    /// Display name with dashes turned into spaces, for human output.
    pub fn humanized_name(&self) -> String {
        humanize(self.display_name())
    }

    /// Whether `normalized` (already run through
    /// [`normalize_filter_name`](crate::name::normalize_filter_name))
    /// names this file.
    pub fn is(&self, normalized: &str) -> bool {
        slugify(self.display_name()) == normalized
    }

    /// Extract the script for `stage` in `direction`.
    ///
    /// Returns an empty string when the file has no such section.
    pub fn section(&self, stage: &str, direction: Direction) -> String {
        extract_section(&self.content, stage, direction)
    }

    /// Apply-direction script for `stage`.
    pub fn up_script(&self, stage: &str) -> String {
        self.section(stage, Direction::Up)
    }

    /// Reverse-direction script for `stage`.
    pub fn down_script(&self, stage: &str) -> String {
        self.section(stage, Direction::Down)
    }
}

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Parse a marker line into its direction and (squashed) stage.
///
/// Anything after the closing brace is ignored, so a marker may carry a
/// trailing comment.
fn parse_marker(line: &str) -> Option<(Direction, String)> {
    let squashed = squash(line);
    let (inner, _) = squashed.strip_prefix("--{")?.split_once('}')?;
    let (keyword, stage) = inner.split_once(':')?;
    let direction = Direction::from_keyword(keyword)?;
    Some((direction, stage.to_string()))
}

/// Collect the first section matching `stage` and `direction`.
///
/// Single forward pass: the section ends at the next marker of any kind,
/// and later repeats of the same marker are ignored.
pub(crate) fn extract_section(content: &str, stage: &str, direction: Direction) -> String {
    let wanted = squash(stage);
    let mut lines: Vec<&str> = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        if let Some((marker_direction, marker_stage)) = parse_marker(line) {
            if inside {
                break;
            }
            inside = marker_direction == direction && marker_stage == wanted;
            continue;
        }

        if !inside {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
