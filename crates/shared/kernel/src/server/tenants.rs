use super::state::AppState;
use axum::extract::State;
use axum::{Json, response::IntoResponse};
use serde::Serialize;
use thub_domain::constants::SYSTEM_TAG;
use utoipa::ToSchema;

/// Diagnostic summary of one registered tenant
#[derive(Debug, Serialize, ToSchema)]
struct TenantSummary {
    /// Application name
    application: String,
    /// Registered base URLs
    url_prefixes: Vec<String>,
    /// Whether feature gating is active
    gated: bool,
    /// Live controller registrations
    controllers: usize,
}

#[utoipa::path(
    get,
    path = "/system/tenants",
    responses((status = OK, description = "Registered tenants", body = [TenantSummary])),
    tag = SYSTEM_TAG,
)]
pub(super) async fn tenants_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summaries: Vec<TenantSummary> = state
        .selector
        .tenants()
        .iter()
        .map(|tenant| TenantSummary {
            application: tenant.application_name().to_owned(),
            url_prefixes: tenant.url_prefixes().iter().map(|prefix| (*prefix).to_owned()).collect(),
            gated: tenant.features().is_some(),
            controllers: tenant.controllers().len(),
        })
        .collect();

    Json(summaries)
}
