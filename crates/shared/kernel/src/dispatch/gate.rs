//! The action gate: decides, once per request and before the controller
//! action runs, whether the requested capability is enabled for the tenant.

use super::controllers::ResolvedController;
use crate::tenancy::Tenant;
use thub_domain::features::FeatureError;

/// Checks the tenant's feature registry for the controller's gate path.
///
/// The path is the controller's explicit registration path when present,
/// otherwise `[controller, action]`. A tenant without a registry is not
/// gated: everything is allowed.
///
/// # Errors
/// Passes through [`FeatureError`] for an ambiguous feature tree. The
/// derived two-segment default can never be empty, and explicit paths are
/// cleaned at registration time, so [`FeatureError::EmptyPath`] only occurs
/// on a broken caller-supplied path.
pub fn authorize(
    tenant: &Tenant,
    controller: &ResolvedController,
    controller_key: &str,
    action: &str,
) -> Result<bool, FeatureError> {
    let Some(registry) = tenant.features() else {
        return Ok(true);
    };

    match controller.feature_path() {
        Some(path) => registry.is_enabled(path),
        None => registry.is_enabled(&[controller_key, action]),
    }
}
