//! Feature switches and hierarchical feature-path resolution.
//!
//! A [`Feature`] is a named capability switch. A feature without children
//! (a leaf) enables its entire subtree once matched; a feature with children
//! (a composite) requires the path to keep matching deeper. Trees are built
//! once from static configuration and are immutable afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by feature construction and path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// A feature was constructed with a name that is empty after trimming.
    #[error("Feature name must not be empty")]
    EmptyName,
    /// A lookup was attempted with an empty feature path.
    #[error("Feature path must contain at least one segment")]
    EmptyPath,
    /// More than one sibling matched a path segment. Sibling names are
    /// assumed unique per level; duplicates are a configuration defect.
    #[error("Feature name '{name}' matches more than one sibling")]
    AmbiguousName { name: String },
}

/// A named capability switch, optionally carrying child switches.
///
/// Names are matched case-insensitively after trimming; the canonical
/// matching key is computed once here, not re-normalized per comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FeatureSpec")]
pub struct Feature {
    name: String,
    #[serde(skip)]
    key: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Feature>,
}

impl Feature {
    /// Creates a leaf feature, which enables its whole subtree once matched.
    ///
    /// # Errors
    /// Returns [`FeatureError::EmptyName`] if `name` is empty after trimming.
    pub fn leaf(name: impl Into<String>) -> Result<Self, FeatureError> {
        Self::composite(name, Vec::new())
    }

    /// Creates a composite feature with child switches.
    ///
    /// # Errors
    /// Returns [`FeatureError::EmptyName`] if `name` is empty after trimming.
    pub fn composite(
        name: impl Into<String>,
        children: impl IntoIterator<Item = Self>,
    ) -> Result<Self, FeatureError> {
        let name = name.into();
        let key = canonical(&name);
        if key.is_empty() {
            return Err(FeatureError::EmptyName);
        }
        Ok(Self { name, key, children: children.into_iter().collect() })
    }

    /// The feature name as registered.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child switches; empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Whether this feature is a leaf (catch-all for its subtree).
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Raw deserialization shape; construction re-validates names and
/// recomputes canonical keys.
#[derive(Debug, Deserialize)]
struct FeatureSpec {
    name: String,
    #[serde(default)]
    children: Vec<Feature>,
}

impl TryFrom<FeatureSpec> for Feature {
    type Error = FeatureError;

    fn try_from(spec: FeatureSpec) -> Result<Self, Self::Error> {
        Self::composite(spec.name, spec.children)
    }
}

/// The ordered set of top-level features enabled for one tenant.
///
/// Immutable after construction; a tenant without a registry is not gated
/// at all (every path is treated as enabled by the caller).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureRegistry {
    features: Vec<Feature>,
}

impl FeatureRegistry {
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Top-level features of this registry.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Resolves a feature path against this registry's top-level features.
    ///
    /// # Errors
    /// Returns [`FeatureError::EmptyPath`] for an empty path and
    /// [`FeatureError::AmbiguousName`] when a segment matches more than one
    /// sibling.
    pub fn is_enabled<S: AsRef<str>>(&self, path: &[S]) -> Result<bool, FeatureError> {
        is_enabled(&self.features, path)
    }
}

/// Resolves a feature path against an ordered set of features.
///
/// The first segment is matched against `nodes`; an unmatched segment
/// resolves to `false` (unregistered means disabled). A matched leaf
/// resolves to `true` no matter how many segments remain. A matched
/// composite consumes the segment and continues into its children; running
/// out of segments at a composite resolves to `true`.
///
/// # Errors
/// Returns [`FeatureError::EmptyPath`] for an empty path and
/// [`FeatureError::AmbiguousName`] when a segment matches more than one
/// sibling.
pub fn is_enabled<S: AsRef<str>>(nodes: &[Feature], path: &[S]) -> Result<bool, FeatureError> {
    let Some((first, rest)) = path.split_first() else {
        return Err(FeatureError::EmptyPath);
    };

    let mut current = find_feature(nodes, first.as_ref())?;
    let mut remaining = rest;

    while let Some((segment, rest)) = remaining.split_first() {
        let Some(node) = current else {
            return Ok(false);
        };

        // a leaf is a catch-all for everything beneath it
        if node.is_leaf() {
            return Ok(true);
        }

        current = find_feature(node.children(), segment.as_ref())?;
        remaining = rest;
    }

    Ok(current.is_some())
}

/// Finds the single sibling whose canonical key matches `segment`.
fn find_feature<'a>(
    nodes: &'a [Feature],
    segment: &str,
) -> Result<Option<&'a Feature>, FeatureError> {
    let key = canonical(segment);
    let mut matches = nodes.iter().filter(|feature| feature.key == key);

    match (matches.next(), matches.next()) {
        (None, _) => Ok(None),
        (Some(found), None) => Ok(Some(found)),
        (Some(_), Some(_)) => {
            Err(FeatureError::AmbiguousName { name: segment.trim().to_owned() })
        },
    }
}

fn canonical(raw: &str) -> String {
    raw.trim().to_lowercase()
}
