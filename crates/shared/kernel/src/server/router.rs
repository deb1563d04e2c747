use super::state::AppState;
use super::{health, tenants};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn system_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health::health_handler))
        .routes(routes!(tenants::tenants_handler))
}
