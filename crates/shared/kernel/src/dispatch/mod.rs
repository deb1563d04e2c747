//! Per-request dispatch through a tenant's controller scope.
//!
//! [`ControllerRegistry`] holds one tenant's controllers after the override
//! convention has run; [`ScopeCache`] memoizes the name-to-controller map per
//! scope; [`authorize`] decides whether a feature-gated action may run. The
//! [`dispatch`] entry point wires all of it together for one request.

mod cache;
mod controllers;
mod gate;

pub use cache::ScopeCache;
pub use controllers::{
    ActionContext, ActionOutcome, Controller, ControllerFactory, ControllerRegistration,
    ControllerRegistry, ResolvedController,
};
pub use gate::authorize;

use crate::tenancy::{RequestUrl, TenancyError, TenantMatch, TenantSelector};
use crate::views::{TenantViewEngine, ViewError};
use controllers::friendly_name;
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;
use thub_domain::config::DispatchConfig;
use thub_domain::features::FeatureError;
use tracing::debug;

/// Everything that can go wrong while routing one request.
///
/// The "not found"-shaped variants are expected domain outcomes that the
/// HTTP boundary maps to a 404; the remaining variants are configuration or
/// controller defects surfaced as server errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Tenant(#[from] TenancyError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("No controller is registered for '{name}'")]
    ControllerNotFound { name: String },
    #[error("Action '{action}' is not available on '{controller}'")]
    ActionNotFound { controller: String, action: String },
    #[error("The requested capability is disabled for this tenant")]
    Disabled,
    #[error("Controller failure: {message}")]
    Controller { message: Cow<'static, str> },
}

impl DispatchError {
    /// Whether this outcome should surface as a "not found" response rather
    /// than a server error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Tenant(TenancyError::TenantNotFound)
            | Self::View(ViewError::ViewNotFound { .. })
            | Self::ControllerNotFound { .. }
            | Self::ActionNotFound { .. }
            | Self::Disabled => true,
            Self::Tenant(_) | Self::Feature(_) | Self::View(_) | Self::Controller { .. } => false,
        }
    }
}

/// Routes one request through tenant selection, controller resolution, the
/// action gate, and view rendering.
///
/// The path left over after the tenant's matched prefix is split into
/// controller, action, and trailing arguments; missing segments fall back to
/// the configured defaults.
///
/// # Errors
/// Returns the "not found"-shaped [`DispatchError`] variants for unmatched
/// tenants, controllers, actions, views, and gated-off capabilities, and
/// passes through feature-resolution and controller failures.
pub fn dispatch(
    selector: &TenantSelector,
    cache: &ScopeCache,
    views: &TenantViewEngine,
    config: &DispatchConfig,
    url: &RequestUrl,
) -> Result<String, DispatchError> {
    let TenantMatch { tenant, remainder } = selector.select(url)?;

    let mut segments = remainder.split('/').filter(|segment| !segment.is_empty());
    let controller_name =
        segments.next().map_or_else(|| config.default_controller.clone(), ToOwned::to_owned);
    let action = segments.next().map_or_else(|| config.default_action.clone(), ToOwned::to_owned);
    let args: Vec<String> = segments.map(ToOwned::to_owned).collect();

    let key = friendly_name(&controller_name);
    let Some(resolved) = cache.resolve(tenant.controllers(), &key) else {
        return Err(DispatchError::ControllerNotFound { name: controller_name });
    };

    if !authorize(&tenant, &resolved, &key, &action)? {
        debug!(
            tenant = tenant.application_name(),
            controller = key,
            action,
            "Request rejected by the action gate"
        );
        return Err(DispatchError::Disabled);
    }

    let controller = resolved.create();
    let context = ActionContext { tenant: Arc::clone(&tenant), args };

    match controller.invoke(&action, &context)? {
        ActionOutcome::View { name, model } => Ok(views.render(url, &name, &model)?),
        ActionOutcome::NotFound => {
            Err(DispatchError::ActionNotFound { controller: controller_name, action })
        },
    }
}
