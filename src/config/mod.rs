//! Configuration resolution
//!
//! Turns a configuration file into a [`ResolvedConfig`]:
//! 1. Load and validate (`content`, `theme`, `plugins`)
//! 2. Replace base categories named directly under `theme`
//! 3. Deep-merge `theme.extend` over the result
//! 4. Compile the `content` globs

mod defaults;
mod load;
mod resolved;

pub use defaults::{builtin_theme, builtin_theme_value, missing_categories, BASE_CATEGORIES};
pub use load::{ConfigError, ConfigSource, StyleConfig, ThemeConfig};
pub use resolved::{ResolveOptions, ResolvedConfig, ResolvedSummary};
