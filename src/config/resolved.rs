//! Resolved configuration
//!
//! The immutable result of one resolution: merged theme plus compiled content
//! matcher, with the merge diagnostics and where the configuration came from.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use stylescope_tokens::{ConflictPolicy, MergeConflict, Merger, TokenTable, TokenValue};

use super::defaults::{builtin_theme, missing_categories};
use super::load::{ConfigError, ConfigSource, StyleConfig};
use crate::content::ContentMatcher;

/// Knobs for [`ResolvedConfig::build`]
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Base theme; the built-in theme when `None`
    pub base: Option<TokenTable>,

    /// How group/leaf mismatches in `theme.extend` are settled
    pub policy: ConflictPolicy,
}

impl ResolveOptions {
    pub fn with_base(mut self, base: TokenTable) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Merged theme and compiled matcher for one build
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    theme: TokenTable,
    matcher: ContentMatcher,
    plugins: Vec<Value>,
    passthrough: Map<String, Value>,
    conflicts: Vec<MergeConflict>,
    source: Option<ConfigSource>,
}

/// Serialisable view of a [`ResolvedConfig`]
#[derive(Debug, Serialize)]
pub struct ResolvedSummary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a ConfigSource>,
    pub content: &'a [String],
    pub theme: &'a TokenTable,
    pub plugins: &'a [Value],
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub passthrough: &'a Map<String, Value>,
    pub conflicts: &'a [MergeConflict],
}

impl ResolvedConfig {
    /// Resolve a validated configuration.
    ///
    /// Order: compile content globs, apply `theme.<category>` replacements to
    /// the base, then deep-merge `theme.extend` under `options.policy`.
    pub fn build(config: StyleConfig, options: &ResolveOptions) -> Result<Self, ConfigError> {
        let matcher = ContentMatcher::compile(&config.content)?;

        let mut base = match &options.base {
            Some(base) => {
                let missing = missing_categories(base);
                if !missing.is_empty() {
                    tracing::warn!(?missing, "base theme is missing expected categories");
                }
                base.clone()
            }
            None => builtin_theme(),
        };

        for (category, value) in &config.theme.overrides {
            tracing::debug!(category = %category, "replacing base theme category");
            base.insert(category.clone(), value.clone());
        }

        let merged = Merger::new(options.policy).merge(&base, &config.theme.extend)?;

        Ok(Self {
            theme: merged.table,
            matcher,
            plugins: config.plugins,
            passthrough: config.passthrough,
            conflicts: merged.conflicts,
            source: None,
        })
    }

    /// Load, validate and resolve a configuration file.
    pub fn from_file(path: &Path, options: &ResolveOptions) -> Result<Self, ConfigError> {
        let (config, source) = StyleConfig::load_with_source(path)?;
        let mut resolved = Self::build(config, options)?;
        resolved.source = Some(source);
        Ok(resolved)
    }

    pub fn theme(&self) -> &TokenTable {
        &self.theme
    }

    pub fn matcher(&self) -> &ContentMatcher {
        &self.matcher
    }

    /// Plugin references, passed through untouched
    pub fn plugins(&self) -> &[Value] {
        &self.plugins
    }

    /// Unrecognised top-level keys (`darkMode`, `prefix`, ...), untouched
    pub fn passthrough(&self) -> &Map<String, Value> {
        &self.passthrough
    }

    /// Shape conflicts settled while merging `theme.extend`
    pub fn conflicts(&self) -> &[MergeConflict] {
        &self.conflicts
    }

    pub fn source(&self) -> Option<&ConfigSource> {
        self.source.as_ref()
    }

    /// Look up a theme token by dotted path
    pub fn token(&self, path: &str) -> Option<&TokenValue> {
        self.theme.get_path(path)
    }

    /// Whether a relative source path is in scope for scanning
    pub fn is_content(&self, path: impl AsRef<Path>) -> bool {
        self.matcher.matches(path)
    }

    pub fn summary(&self) -> ResolvedSummary<'_> {
        ResolvedSummary {
            source: self.source.as_ref(),
            content: self.matcher.patterns(),
            theme: &self.theme,
            plugins: &self.plugins,
            passthrough: &self.passthrough,
            conflicts: &self.conflicts,
        }
    }

    /// Serialize the summary to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.summary())
    }
}
