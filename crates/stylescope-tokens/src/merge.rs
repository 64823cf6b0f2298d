//! Theme merge logic
//!
//! Overlays an extension table onto a base table:
//! - Groups: deep-merge by key (recursive)
//! - Leaves: replace (extension wins entirely)
//! - Group vs leaf: shape conflict, settled by [`ConflictPolicy`]
//!
//! Inputs are borrowed and never modified; every merge returns a new table.

use serde::{Deserialize, Serialize};

use crate::table::{TokenTable, TokenValue, ValueKind};

/// How to settle a path where one side is a group and the other a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Keep the extension's value and record a diagnostic.
    #[default]
    PreferExtension,

    /// Keep the base value and record a diagnostic.
    PreferBase,

    /// Fail the merge on the first conflict.
    Reject,
}

impl std::str::FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefer-extension" => Ok(ConflictPolicy::PreferExtension),
            "prefer-base" => Ok(ConflictPolicy::PreferBase),
            "reject" => Ok(ConflictPolicy::Reject),
            other => Err(format!(
                "unknown conflict policy '{}' (expected prefer-extension, prefer-base or reject)",
                other
            )),
        }
    }
}

/// A group/leaf mismatch found while merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConflict {
    /// Dotted path of the conflicting key
    pub path: String,

    /// Shape of the value in the base table
    pub base: ValueKind,

    /// Shape of the value in the extension
    pub extension: ValueKind,

    /// Shape that ended up in the result
    pub kept: ValueKind,
}

impl std::fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: base is a {}, extension is a {} (kept {})",
            self.path, self.base, self.extension, self.kept
        )
    }
}

/// Merge failures. Only produced under [`ConflictPolicy::Reject`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    #[error("shape conflict at '{path}': cannot merge {extension} into {base}")]
    ShapeConflict {
        path: String,
        base: ValueKind,
        extension: ValueKind,
    },
}

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub table: TokenTable,
    pub conflicts: Vec<MergeConflict>,
}

/// Deep-merges token tables under a fixed conflict policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger {
    policy: ConflictPolicy,
}

impl Merger {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Merge `extension` over `base`.
    pub fn merge(&self, base: &TokenTable, extension: &TokenTable) -> Result<Merged, MergeError> {
        let mut conflicts = Vec::new();
        let mut path = Vec::new();
        let table = self.merge_tables(base, extension, &mut path, &mut conflicts);

        if self.policy == ConflictPolicy::Reject {
            if let Some(first) = conflicts.into_iter().next() {
                return Err(MergeError::ShapeConflict {
                    path: first.path,
                    base: first.base,
                    extension: first.extension,
                });
            }
            return Ok(Merged {
                table,
                conflicts: Vec::new(),
            });
        }

        Ok(Merged { table, conflicts })
    }

    fn merge_tables<'a>(
        &self,
        base: &TokenTable,
        extension: &'a TokenTable,
        path: &mut Vec<&'a str>,
        conflicts: &mut Vec<MergeConflict>,
    ) -> TokenTable {
        let mut out = base.clone();

        for (key, ext_value) in extension {
            let merged = match base.get(key) {
                None => ext_value.clone(),
                Some(base_value) => {
                    path.push(key);
                    let merged = self.merge_values(base_value, ext_value, path, conflicts);
                    path.pop();
                    merged
                }
            };
            out.insert(key.clone(), merged);
        }

        out
    }

    fn merge_values<'a>(
        &self,
        base: &TokenValue,
        extension: &'a TokenValue,
        path: &mut Vec<&'a str>,
        conflicts: &mut Vec<MergeConflict>,
    ) -> TokenValue {
        match (base, extension) {
            (TokenValue::Group(b), TokenValue::Group(e)) => {
                TokenValue::Group(self.merge_tables(b, e, path, conflicts))
            }
            (TokenValue::Leaf(_), TokenValue::Leaf(_)) => extension.clone(),
            _ => {
                let kept = match self.policy {
                    ConflictPolicy::PreferBase => base,
                    ConflictPolicy::PreferExtension | ConflictPolicy::Reject => extension,
                };
                let conflict = MergeConflict {
                    path: path.join("."),
                    base: base.kind(),
                    extension: extension.kind(),
                    kept: kept.kind(),
                };
                if self.policy != ConflictPolicy::Reject {
                    tracing::warn!(
                        path = %conflict.path,
                        base = %conflict.base,
                        extension = %conflict.extension,
                        "theme merge shape conflict, keeping {}",
                        conflict.kept
                    );
                }
                conflicts.push(conflict);
                kept.clone()
            }
        }
    }
}

/// Merge `extension` over `base`, preferring the extension on shape conflicts.
pub fn resolve(base: &TokenTable, extension: &TokenTable) -> TokenTable {
    let merger = Merger::new(ConflictPolicy::PreferExtension);
    let mut path = Vec::new();
    let mut conflicts = Vec::new();
    merger.merge_tables(base, extension, &mut path, &mut conflicts)
}

/// Merge several extensions in order (last has highest precedence).
pub fn merge_all<'a, I>(base: &TokenTable, layers: I) -> TokenTable
where
    I: IntoIterator<Item = &'a TokenTable>,
{
    layers
        .into_iter()
        .fold(base.clone(), |acc, layer| resolve(&acc, layer))
}
