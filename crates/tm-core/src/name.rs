//! Migration naming helpers.
//!
//! File names follow `<order-key>-<slug>.<ext>`. The slug is what users type
//! on the command line and what the ledger stores (as the display name), so
//! every comparison between a user-supplied name and a file goes through
//! [`slugify`] on both sides.

use crate::error::{CoreError, CoreResult};
use crate::newtype_string::define_newtype_string;

/// Lowercase `input` and collapse every run of non-alphanumeric ASCII
/// characters into a single `-`. Leading and trailing dashes are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Strip the `<digits>-` prefix and the `.<ext>` suffix from a file name.
///
/// Either part may be absent; what is left is returned unchanged.
pub fn strip_decorations<'a>(raw: &'a str, extension: &str) -> &'a str {
    let without_ext = raw
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(raw);
    let digits = without_ext
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits > 0 && without_ext[digits..].starts_with('-') {
        &without_ext[digits + 1..]
    } else {
        without_ext
    }
}

/// Parse the leading digit run of `raw` as an order key.
///
/// Returns 0 when there is no prefix or it does not fit in an `i64`.
pub fn order_key_of(raw: &str) -> i64 {
    let digits = raw.bytes().take_while(|b| b.is_ascii_digit()).count();
    raw[..digits].parse().unwrap_or(0)
}

/// Normalize a user-supplied migration name for matching against files.
///
/// Accepts a bare slug (`add users`), a display name (`add-users`) or a full
/// file name (`1700000000-add-users.sql`).
pub fn normalize_filter_name(name: &str, extension: &str) -> String {
    slugify(strip_decorations(name.trim(), extension))
}

/// Turn a display name into words for human output: dashes become spaces.
pub fn humanize(display_name: &str) -> String {
    display_name.replace('-', " ")
}

fn normalize_slug(raw: &str) -> CoreResult<String> {
    let slug = slugify(raw);
    if slug.is_empty() {
        return Err(CoreError::InvalidMigrationName {
            name: raw.to_string(),
        });
    }
    Ok(slug)
}

define_newtype_string! {
    /// A non-empty, slugified migration name used when creating new files.
    pub struct MigrationSlug;
    normalize = normalize_slug;
}

#[cfg(test)]
#[path = "name_test.rs"]
mod tests;
