//! Terminal styling tags for command output.
//!
//! Patterns carry short tags that expand to ANSI escape codes:
//!
//! | tag | effect    | tag | effect  |
//! |-----|-----------|-----|---------|
//! | `{R}` | reset     | `{r}` | red     |
//! | `{B}` | bold      | `{g}` | green   |
//! | `{U}` | underline | `{y}` | yellow  |
//! | `{S}` | strike    | `{b}` | blue    |
//! | `{I}` | italic    | `{p}` | purple  |
//! | `{c}` | cyan      | `{m}` | gray    |
//! | `{w}` | white     |     |         |

const TAGS: [(&str, &str); 13] = [
    ("{R}", "\x1b[0m"),
    ("{B}", "\x1b[1m"),
    ("{U}", "\x1b[4m"),
    ("{S}", "\x1b[9m"),
    ("{I}", "\x1b[3m"),
    ("{r}", "\x1b[31m"),
    ("{g}", "\x1b[32m"),
    ("{y}", "\x1b[33m"),
    ("{b}", "\x1b[34m"),
    ("{p}", "\x1b[35m"),
    ("{c}", "\x1b[36m"),
    ("{m}", "\x1b[37m"),
    ("{w}", "\x1b[37m"),
];

/// Expand style tags in `pattern`, or strip them when `enabled` is false.
pub(crate) fn paint(pattern: &str, enabled: bool) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    'scan: while !rest.is_empty() {
        if rest.starts_with('{') {
            for (tag, code) in TAGS {
                if let Some(after) = rest.strip_prefix(tag) {
                    if enabled {
                        out.push_str(code);
                    }
                    rest = after;
                    continue 'scan;
                }
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

/// Whether colour output is on: off with `--no-color` or a non-empty
/// `NO_COLOR` environment variable.
pub(crate) fn color_enabled(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty())
}

/// Styler bound to one colour decision.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Style {
    enabled: bool,
}

impl Style {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(crate) fn paint(&self, pattern: &str) -> String {
        paint(pattern, self.enabled)
    }
}

#[cfg(test)]
#[path = "style_test.rs"]
mod tests;
