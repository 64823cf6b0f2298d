//! Directory walk that applies a content matcher.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, ContentMatcher};

/// List files under `root` that `matcher` selects.
///
/// Paths are returned relative to `root`, sorted by name at each level.
/// Symlinks are not followed.
pub fn scan(root: &Path, matcher: &ContentMatcher) -> Result<Vec<PathBuf>, ContentError> {
    let mut found = Vec::new();
    if matcher.is_empty() {
        return Ok(found);
    }

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| ContentError::PathNotUnderRoot(entry.path().to_path_buf()))?;

        if matcher.matches(rel_path) {
            found.push(rel_path.to_path_buf());
        }
    }

    tracing::debug!(root = %root.display(), files = found.len(), "content scan complete");
    Ok(found)
}
