//! Tenant-specific controllers.

use serde_json::json;
use thub_kernel::dispatch::{ActionContext, ActionOutcome, Controller, DispatchError};

/// Replaces the shared home controller for this tenant: the landing page is
/// tenant-branded, every other action falls through to the base behavior.
#[derive(Debug, Default)]
pub struct HomeController {
    base: thub_web::controllers::HomeController,
}

impl Controller for HomeController {
    fn invoke(&self, action: &str, context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        match action {
            "index" => Ok(ActionOutcome::view(
                "index",
                json!({
                    "application": context.tenant.application_name(),
                    "script": context.tenant.script_asset("site"),
                }),
            )),
            _ => self.base.invoke(action, context),
        }
    }
}

/// Reporting surface; only the actions enabled in the tenant's feature tree
/// are reachable.
#[derive(Debug, Default)]
pub struct ReportsController;

impl Controller for ReportsController {
    fn invoke(&self, action: &str, context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        match action {
            "export" => Ok(ActionOutcome::view(
                "export",
                json!({ "application": context.tenant.application_name() }),
            )),
            // schedule exists in code but stays dark until the feature tree
            // enables reports/schedule
            "schedule" => Ok(ActionOutcome::view("schedule", json!({}))),
            _ => Ok(ActionOutcome::NotFound),
        }
    }
}
