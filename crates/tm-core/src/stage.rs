//! Stage names and migration directions.

use crate::error::{CoreError, CoreResult};
use crate::newtype_string::define_newtype_string;
use std::fmt;

/// Maximum stage length, matching the ledger's `stage VARCHAR(30)` column.
pub const MAX_STAGE_LEN: usize = 30;

fn normalize_stage(raw: &str) -> CoreResult<String> {
    let stage = raw.trim().to_ascii_lowercase();
    let invalid = |reason: &str| CoreError::InvalidStageName {
        name: raw.to_string(),
        reason: reason.to_string(),
    };

    if stage.is_empty() {
        return Err(invalid("stage name cannot be empty"));
    }
    if stage.len() > MAX_STAGE_LEN {
        return Err(invalid("stage name is longer than 30 characters"));
    }
    if !stage
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid(
            "only letters, digits, '_' and '-' are allowed",
        ));
    }
    Ok(stage)
}

define_newtype_string! {
    /// A lowercase stage tag such as `up`, `script` or `seed`.
    ///
    /// Marker matching is case-insensitive, so the ledger stores the
    /// lowercase form to keep `SEED` and `seed` the same stage.
    pub struct StageName;
    normalize = normalize_stage;
}

/// Which half of a stage section to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Apply the stage (`--{ up: <stage> }` section)
    Up,
    /// Reverse the stage (`--{ down: <stage> }` section)
    Down,
}

impl Direction {
    /// Marker keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Parse a marker keyword; anything other than `up` or `down` is `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

#[cfg(test)]
#[path = "stage_test.rs"]
mod tests;
