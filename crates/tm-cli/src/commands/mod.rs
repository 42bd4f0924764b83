//! CLI command implementations

pub(crate) mod common;
pub(crate) mod down;
pub(crate) mod new;
pub(crate) mod summary;
pub(crate) mod up;

#[cfg(test)]
pub(crate) mod testing;
