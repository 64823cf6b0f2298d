//! Design-token tables and the theme deep-merge combinator.
//!
//! A theme is a [`TokenTable`]: an ordered tree of groups and leaf values.
//! [`resolve`] overlays a partial extension onto a base table; [`Merger`]
//! does the same under an explicit [`ConflictPolicy`] and reports every
//! group/leaf mismatch it met along the way.

mod merge;
mod table;

pub use merge::{merge_all, resolve, ConflictPolicy, MergeConflict, MergeError, Merged, Merger};
pub use table::{json_type_name, TokenTable, TokenValue, ValueKind};

/// Errors building token tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("expected an object for a token table, found {0}")]
    NotATable(&'static str),
}
