//! Shared fixtures for integration tests
//!
//! `site/` is a small project tree with a JSON and a TOML configuration.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Root of the fixture project
pub fn site_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site")
}

/// The JSON configuration (content + theme.extend + plugins)
pub fn json_config_path() -> PathBuf {
    site_root().join("stylescope.json")
}

/// The TOML configuration (adds theme overrides and pass-through keys)
pub fn toml_config_path() -> PathBuf {
    site_root().join("stylescope.toml")
}
