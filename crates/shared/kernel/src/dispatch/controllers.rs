//! Controllers, the registration convention, and name-identity resolution.
//!
//! A controller scope keeps exactly one live registration per name identity
//! (the type's simple name, lowercased, with the `Controller` suffix
//! stripped). A candidate declaring that it overrides a parent with the same
//! simple name takes over the parent's slot, so a tenant-specific subtype
//! transparently replaces a shared base controller.

use super::DispatchError;
use crate::tenancy::{TenancyError, Tenant};
use fxhash::FxHashMap;
use serde_json::Value;
use std::any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thub_domain::constants::CONTROLLER_SUFFIX;
use tracing::trace;

/// A named request handler dispatched per request.
///
/// Implementations are constructed fresh for every request by their
/// registered factory and must resolve unknown actions to
/// [`ActionOutcome::NotFound`] rather than an error.
pub trait Controller: Send + Sync {
    fn invoke(&self, action: &str, context: &ActionContext) -> Result<ActionOutcome, DispatchError>;
}

/// Request-scoped data handed to a controller action.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// The tenant serving the current request.
    pub tenant: Arc<Tenant>,
    /// Path segments following the action segment.
    pub args: Vec<String>,
}

/// What a controller action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Render the named view with the given model.
    View { name: String, model: Value },
    /// The action does not exist on this controller.
    NotFound,
}

impl ActionOutcome {
    #[must_use]
    pub fn view(name: impl Into<String>, model: Value) -> Self {
        Self::View { name: name.into(), model }
    }
}

/// Constructs one controller instance per request.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// A candidate handed to the registration convention: the controller type,
/// an optional parent it overrides, and an optional explicit feature path.
#[derive(Clone)]
pub struct ControllerRegistration {
    type_name: &'static str,
    overrides: Option<&'static str>,
    feature_path: Option<Vec<String>>,
    factory: ControllerFactory,
}

impl ControllerRegistration {
    /// Registers a controller type constructed via [`Default`].
    #[must_use]
    pub fn of<C>() -> Self
    where
        C: Controller + Default + 'static,
    {
        Self::with_factory(any::type_name::<C>(), || Box::new(C::default()))
    }

    /// Registers a controller type with an explicit per-request factory.
    #[must_use]
    pub fn with_factory<F>(type_name: &'static str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        Self { type_name, overrides: None, feature_path: None, factory: Arc::new(factory) }
    }

    /// Declares the parent controller type this candidate replaces.
    ///
    /// The declaration is honored only when the parent's simple name equals
    /// the candidate's; otherwise the candidate registers as itself.
    #[must_use]
    pub fn overriding<P>(mut self) -> Self
    where
        P: Controller + 'static,
    {
        self.overrides = Some(any::type_name::<P>());
        self
    }

    /// Sets the explicit feature path gating this controller. Blank segments
    /// are dropped; an entirely blank path falls back to the
    /// controller/action default at gate time.
    #[must_use]
    pub fn feature_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path: Vec<String> =
            path.into_iter().map(Into::into).filter(|segment| !segment.trim().is_empty()).collect();
        self.feature_path = if path.is_empty() { None } else { Some(path) };
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ControllerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistration")
            .field("type_name", &self.type_name)
            .field("overrides", &self.overrides)
            .field("feature_path", &self.feature_path)
            .finish_non_exhaustive()
    }
}

/// One live registration slot: the most-derived controller for a name
/// identity, plus the base type it replaced, if any.
#[derive(Clone)]
struct ControllerSlot {
    key: String,
    type_name: &'static str,
    replaced: Option<&'static str>,
    feature_path: Option<Arc<[String]>>,
    factory: ControllerFactory,
}

/// A resolved controller ready to be instantiated for a request.
#[derive(Clone)]
pub struct ResolvedController {
    type_name: &'static str,
    feature_path: Option<Arc<[String]>>,
    factory: ControllerFactory,
}

impl ResolvedController {
    /// Concrete type this resolution instantiates.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Explicit gate path registered for the controller, if any.
    #[must_use]
    pub fn feature_path(&self) -> Option<&[String]> {
        self.feature_path.as_deref()
    }

    /// Constructs a fresh controller instance.
    #[must_use]
    pub fn create(&self) -> Box<dyn Controller> {
        (self.factory)()
    }
}

impl fmt::Debug for ResolvedController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedController")
            .field("type_name", &self.type_name)
            .field("feature_path", &self.feature_path)
            .finish_non_exhaustive()
    }
}

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

/// One tenant's controller scope, populated through [`process`].
///
/// [`process`]: ControllerRegistry::process
#[derive(Clone)]
pub struct ControllerRegistry {
    scope_id: u64,
    slots: Vec<ControllerSlot>,
}

impl ControllerRegistry {
    /// Creates an empty scope with a process-unique identity, used as the
    /// key into the [`ScopeCache`](super::ScopeCache).
    #[must_use]
    pub fn new() -> Self {
        Self { scope_id: NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed), slots: Vec::new() }
    }

    /// Stable identity of this scope for cache keying.
    #[must_use]
    pub fn scope_id(&self) -> u64 {
        self.scope_id
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Runs the registration convention for one candidate.
    ///
    /// * A candidate whose simple name does not carry the `Controller`
    ///   suffix is ignored.
    /// * A candidate overriding a parent with the same simple name takes the
    ///   parent's slot; requests for that name resolve the candidate whether
    ///   the parent registers before or after it.
    /// * Re-registering the same type is idempotent.
    ///
    /// # Errors
    /// Returns [`TenancyError::DuplicateController`] when two distinct types
    /// claim the same name identity without one overriding the other.
    pub fn process(&mut self, registration: ControllerRegistration) -> Result<(), TenancyError> {
        let Some(key) = controller_stem(registration.type_name) else {
            trace!(candidate = registration.type_name, "Skipping non-controller candidate");
            return Ok(());
        };

        // an override declaration only counts for a parent controller with
        // the same simple name
        let parent = registration
            .overrides
            .filter(|parent| controller_stem(parent).is_some_and(|parent_key| parent_key == key));

        let feature_path = registration.feature_path.map(Arc::from);

        match self.slots.iter().position(|slot| slot.key == key) {
            None => {
                trace!(
                    controller = registration.type_name,
                    replaces = parent,
                    "Registering controller"
                );
                self.slots.push(ControllerSlot {
                    key,
                    type_name: registration.type_name,
                    replaced: parent,
                    feature_path,
                    factory: registration.factory,
                });
                Ok(())
            },
            Some(occupied) => {
                let slot = &mut self.slots[occupied];
                if slot.type_name == registration.type_name {
                    return Ok(());
                }
                if slot.replaced == Some(registration.type_name) {
                    // the base type arrived after its override; the
                    // override stays in charge of the slot
                    return Ok(());
                }
                if let Some(parent) = parent
                    && slot.type_name == parent
                    && slot.replaced.is_none()
                {
                    trace!(
                        controller = registration.type_name,
                        replaces = parent,
                        "Overriding registered controller"
                    );
                    slot.type_name = registration.type_name;
                    slot.replaced = Some(parent);
                    slot.factory = registration.factory;
                    if feature_path.is_some() {
                        slot.feature_path = feature_path;
                    }
                    return Ok(());
                }
                Err(TenancyError::DuplicateController { name: slot.key.clone() })
            },
        }
    }

    /// Resolves a controller by request name (with or without the suffix).
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ResolvedController> {
        let key = friendly_name(name);
        self.slots.iter().find(|slot| slot.key == key).map(ControllerSlot::resolved)
    }

    /// Materializes the name-to-controller map cached per scope.
    pub(crate) fn snapshot(&self) -> FxHashMap<String, ResolvedController> {
        self.slots.iter().map(|slot| (slot.key.clone(), slot.resolved())).collect()
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("scope_id", &self.scope_id)
            .field("controllers", &self.slots.iter().map(|slot| slot.type_name).collect::<Vec<_>>())
            .finish()
    }
}

impl ControllerSlot {
    fn resolved(&self) -> ResolvedController {
        ResolvedController {
            type_name: self.type_name,
            feature_path: self.feature_path.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

/// Name identity of a controller type: the simple name, lowercased, with the
/// `Controller` suffix stripped. `None` when the type is not a controller.
fn controller_stem(type_name: &str) -> Option<String> {
    let simple = type_name.rsplit("::").next().unwrap_or(type_name);
    let stem = simple.strip_suffix(CONTROLLER_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_lowercase())
}

/// Lookup key for a request-supplied controller name, which may or may not
/// carry the suffix.
pub(crate) fn friendly_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.strip_suffix("controller") {
        Some(stem) if !stem.is_empty() => stem.to_owned(),
        _ => lower,
    }
}
