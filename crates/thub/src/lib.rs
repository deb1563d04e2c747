//! Facade crate for the TenantHub platform.
//! Re-exports domain/kernel primitives and aggregates tenant initialization.
//! Keep this crate thin: it should compose other crates, not implement
//! tenancy logic.
//!
//! ## Usage
//! - Add `thub` with the desired feature flags (`server`).
//! - Call [`init`] to collect every tenant crate's tenant; extend the list
//!   as new tenant crates appear.

pub use thub_domain as domain;
pub use thub_kernel as kernel;
pub use thub_web as web;

use thub_kernel::tenancy::{Tenant, TenancyError};

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use thub_kernel::server::dispatch::dispatch_router;
        pub use thub_kernel::server::router::system_router;
    }
}

/// Tenant registry for runtime introspection.
pub mod tenants {
    pub use thub_tenant_sample as sample;

    /// Tenant crates compiled into this build.
    pub const ENABLED: &[&str] = &["sample"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all compiled-in tenants, in selection order.
///
/// # Errors
/// Returns an error if any tenant fails to initialize.
pub fn init() -> Result<Vec<Tenant>, TenancyError> {
    let mut registered = Vec::new();

    // Sample 1
    registered.push(tenants::sample::init()?);

    Ok(registered)
}
