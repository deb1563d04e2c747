//! Read-mostly cache of resolved controllers per dependency scope.

use super::controllers::{ControllerRegistry, ResolvedController, friendly_name};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;

/// Maps a scope identity to its materialized name-to-controller table.
///
/// Injected explicitly wherever it is needed so tests can supply an isolated
/// instance. Lookups take the read lock; a missing key is populated under
/// the write lock and re-checked there, so concurrent first access builds
/// the table at most once. Scopes are immutable, so entries never
/// invalidate.
#[derive(Debug, Clone, Default)]
pub struct ScopeCache {
    scopes: Arc<RwLock<FxHashMap<u64, Arc<FxHashMap<String, ResolvedController>>>>>,
}

impl ScopeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The controller table for `scope`, built on first access.
    #[must_use]
    pub fn controllers_for(
        &self,
        scope: &ControllerRegistry,
    ) -> Arc<FxHashMap<String, ResolvedController>> {
        if let Some(found) = self.scopes.read().get(&scope.scope_id()) {
            return Arc::clone(found);
        }

        let mut scopes = self.scopes.write();
        // re-check: another thread may have populated the key while we
        // waited for the write lock
        let entry = scopes.entry(scope.scope_id()).or_insert_with(|| {
            trace!(scope = scope.scope_id(), controllers = scope.len(), "Materializing scope");
            Arc::new(scope.snapshot())
        });
        Arc::clone(entry)
    }

    /// Resolves a controller by request name (suffix optional) in `scope`.
    #[must_use]
    pub fn resolve(&self, scope: &ControllerRegistry, name: &str) -> Option<ResolvedController> {
        self.controllers_for(scope).get(&friendly_name(name)).cloned()
    }

    /// Number of scopes materialized so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.read().is_empty()
    }
}
