//! Convenience re-exports for host applications and tenant crates.

pub use crate::dispatch::{
    ActionContext, ActionOutcome, Controller, ControllerRegistration, ControllerRegistry,
    DispatchError, ScopeCache,
};
#[cfg(feature = "server")]
pub use crate::server::state::AppState;
pub use crate::tenancy::{RequestUrl, Tenant, TenantSelector, TenancyError};
pub use crate::views::{StaticViewEngine, TenantViewEngine, ViewEngine, ViewError};
pub use thub_domain::features::{Feature, FeatureError, FeatureRegistry};
