//! Namespace model: naming, formats, flat item sets and their rendering.
//!
//! A namespace is a named configuration group. Its native format is derived
//! purely from the extension of its name; the flat key/value format is the
//! default and the only one with structure. Everything else is a single
//! blob stored under a reserved key.

mod format;
mod items;
mod tree;

pub use format::*;
pub use items::*;

pub(crate) use tree::TreeNode;

#[cfg(test)]
mod items_test;
