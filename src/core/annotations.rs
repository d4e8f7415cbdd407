//! Annotation preservation.
//!
//! Operators attach their own annotations (sync waves, owners) to sealed
//! records. Keys on the allowlist survive a re-seal; scope markers never do,
//! they are always recomputed from the current scope.

use std::collections::BTreeSet;

use crate::core::scope::is_scope_annotation;
use crate::core::types::AnnotationSet;

/// Annotation keys eligible for preservation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist(BTreeSet<String>);

impl Allowlist {
    /// Build from keys, trimming whitespace and skipping empty entries.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            keys.into_iter()
                .map(|k| k.as_ref().trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    /// Build from a comma-separated list such as
    /// `"argocd.argoproj.io/sync-wave, owner"`.
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(','))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Add every key of `other`.
    pub fn extend(&mut self, other: Allowlist) {
        self.0.extend(other.0);
    }

    /// The allow-listed subset of `annotations`.
    pub fn select(&self, annotations: &AnnotationSet) -> AnnotationSet {
        annotations
            .iter()
            .filter(|(key, _)| self.contains(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Final annotations for a record.
///
/// Starts from `scope_annotations` and overlays every entry of `existing`
/// that is allow-listed and is not a scope marker.
pub fn merge_annotations(
    scope_annotations: &AnnotationSet,
    existing: &AnnotationSet,
    allowlist: &Allowlist,
) -> AnnotationSet {
    let mut merged = scope_annotations.clone();
    for (key, value) in existing {
        if is_scope_annotation(key) || !allowlist.contains(key) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    merged
}
