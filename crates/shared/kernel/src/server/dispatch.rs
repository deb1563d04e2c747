//! Axum entry point for tenant-routed requests.
//!
//! The route table stays deliberately flat: `/` and a single wildcard feed
//! every request into [`crate::dispatch::dispatch`], which owns tenant
//! selection, controller resolution, gating, and rendering.

use super::state::AppState;
use crate::dispatch::{self, DispatchError};
use crate::tenancy::RequestUrl;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tracing::{debug, error};

/// Routes every non-system path into the tenant dispatch pipeline.
pub fn dispatch_router() -> Router<AppState> {
    Router::new().route("/", get(handle)).route("/{*path}", get(handle))
}

async fn handle(State(state): State<AppState>, request: Request) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let url = RequestUrl::new(host, request.uri().path());

    match dispatch::dispatch(
        &state.selector,
        &state.scope_cache,
        &state.views,
        &state.config.dispatch,
        &url,
    ) {
        Ok(markup) => Html(markup).into_response(),
        Err(outcome) => outcome.into_response(),
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            debug!(reason = %self, "Request rejected");
            (StatusCode::NOT_FOUND, "The request cannot be satisfied").into_response()
        } else {
            error!(error = %self, "Request dispatch failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "The request could not be processed")
                .into_response()
        }
    }
}
