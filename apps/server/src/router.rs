use axum::Router;
use thub::kernel::prelude::AppState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: AppState) -> Router {
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (system_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(thub::server::router::system_router())
        .with_state(state.clone())
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url("/api", api_doc);

    // Everything else is tenant territory
    let tenant_routes = thub::server::router::dispatch_router().with_state(state);

    Router::new()
        .merge(system_routes)
        .merge(scalar_routes)
        .merge(tenant_routes)
        .layer(TraceLayer::new_for_http())
}
