//! Sample tenant slice.
//!
//! Demonstrates the three extension points a tenant has: its own URL
//! prefixes, a feature tree gating controller actions, and a controller
//! override that transparently replaces the shared home controller.

mod controllers;

use std::sync::Arc;
use thub_kernel::dispatch::ControllerRegistration;
use thub_kernel::domain::features::{Feature, FeatureRegistry};
use thub_kernel::tenancy::{Tenant, TenancyError};
use thub_kernel::views::StaticViewEngine;

/// Base URL this tenant answers on.
const URL_PREFIX: &str = "http://localhost:3454/";

/// Initialize the sample tenant.
///
/// # Errors
/// Returns an error if the tenant configuration is invalid, which would be
/// a defect in this crate rather than a runtime condition.
pub fn init() -> Result<Tenant, TenancyError> {
    let tenant = Tenant::builder()
        .application_name("Sample 1")
        .url_prefix(URL_PREFIX)
        .minify_js(true)
        .minify_css(true)
        .features(enabled_features()?)
        .controller(
            ControllerRegistration::of::<controllers::HomeController>()
                .overriding::<thub_web::controllers::HomeController>(),
        )
        .controller(ControllerRegistration::of::<thub_web::controllers::AccountController>())
        .controller(ControllerRegistration::of::<controllers::ReportsController>())
        .views(Arc::new(views()))
        .build()?;

    tracing::info!(application = tenant.application_name(), "Tenant slice initialized");

    Ok(tenant)
}

/// Everything this tenant has switched on. The home and account pages are
/// enabled wholesale; reporting only exposes the export capability.
fn enabled_features() -> Result<FeatureRegistry, TenancyError> {
    let features = vec![
        leaf("home")?,
        leaf("account")?,
        Feature::composite("reports", [leaf("export")?]).map_err(invalid)?,
    ];
    Ok(FeatureRegistry::new(features))
}

fn leaf(name: &str) -> Result<Feature, TenancyError> {
    Feature::leaf(name).map_err(invalid)
}

fn invalid(error: thub_kernel::domain::features::FeatureError) -> TenancyError {
    TenancyError::InvalidTenant { message: error.to_string().into() }
}

/// The host view batch with this tenant's replacements applied.
fn views() -> StaticViewEngine {
    thub_web::host_views()
        .with_view(
            "index",
            "<h1>Welcome to {{application}}</h1><script src=\"/{{script}}\"></script>",
        )
        .with_view("export", "<a href=\"/reports/export/csv\">{{application}} export</a>")
}
