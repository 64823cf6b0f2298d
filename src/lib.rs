//! stylescope - theme resolution and content scoping for utility-class CSS
//!
//! This crate resolves the configuration a utility-class CSS generator reads:
//! it merges the configured theme extension into a base design-token table
//! and compiles the `content` globs that decide which source files are
//! scanned for class names.

pub mod config;
pub mod content;

pub use config::{ConfigError, ResolveOptions, ResolvedConfig, StyleConfig};
pub use content::{ContentError, ContentMatcher};
pub use stylescope_tokens::{
    merge_all, resolve, ConflictPolicy, MergeConflict, MergeError, Merger, TokenTable, TokenValue,
    ValueKind,
};
