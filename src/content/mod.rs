//! Content scope matching
//!
//! Compiles the `content` glob list into a single predicate that decides
//! which source files the scanning stage reads for class names.

mod scan;

pub use scan::scan;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Errors for content patterns
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content[{index}] is an empty pattern")]
    EmptyPattern { index: usize },

    #[error("content[{index}] '{pattern}' is not a valid glob: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Glob set error: {0}")]
    GlobError(#[from] globset::Error),

    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Path {} is not under the scan root", .0.display())]
    PathNotUnderRoot(PathBuf),
}

/// Compiled content patterns (union semantics)
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    patterns: Vec<String>,
    glob_set: GlobSet,
}

impl ContentMatcher {
    /// Compile a pattern list.
    ///
    /// `**` crosses directories, `*` and `?` stay within one path segment.
    /// An empty list compiles to a matcher that accepts nothing.
    pub fn compile<I, S>(patterns: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for (index, pattern) in patterns.into_iter().enumerate() {
            let pattern = pattern.as_ref();
            let normalized = normalize(pattern);
            if normalized.is_empty() {
                return Err(ContentError::EmptyPattern { index });
            }

            let glob = GlobBuilder::new(&normalized)
                .literal_separator(true)
                .build()
                .map_err(|source| ContentError::InvalidPattern {
                    index,
                    pattern: pattern.to_string(),
                    source,
                })?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }

        if kept.is_empty() {
            tracing::warn!("content pattern list is empty; no files will be scanned");
        } else {
            tracing::debug!(patterns = kept.len(), "compiled content matcher");
        }

        Ok(Self {
            patterns: kept,
            glob_set: builder.build()?,
        })
    }

    /// Check whether a relative path is in scope.
    ///
    /// Absolute paths are never in scope; callers pass paths relative to
    /// the project root.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        match relative_path(path.as_ref()) {
            Some(path) => self.glob_set.is_match(path.as_str()),
            None => false,
        }
    }

    /// Patterns that select `path`, in configuration order
    pub fn matching_patterns(&self, path: impl AsRef<Path>) -> Vec<&str> {
        let Some(path) = relative_path(path.as_ref()) else {
            return Vec::new();
        };
        self.glob_set
            .matches(path.as_str())
            .into_iter()
            .map(|i| self.patterns[i].as_str())
            .collect()
    }

    /// The configured patterns, as written
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Strip a leading `./` (repeatedly) so `./src/**` and `src/**` agree.
fn normalize(s: &str) -> String {
    let mut rest = s.trim();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.to_string()
}

/// Normalised relative form of `path`, or `None` if it is absolute.
fn relative_path(path: &Path) -> Option<String> {
    if path.is_absolute() || path.has_root() {
        return None;
    }
    let path = normalize(&path.to_string_lossy().replace('\\', "/"));
    if path.starts_with('/') {
        return None;
    }
    Some(path)
}
