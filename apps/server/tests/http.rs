use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use thub::domain::config::AppConfig;
use thub::kernel::prelude::AppState;
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

const SAMPLE_HOST: &str = "localhost:3454";

fn app() -> Router {
    let state = AppState::builder()
        .config(AppConfig::default())
        .tenants(thub::init().expect("tenant bootstrap"))
        .build()
        .expect("application state");

    let (system_routes, _doc) = OpenApiRouter::new()
        .merge(thub::server::router::system_router())
        .with_state(state.clone())
        .split_for_parts();

    Router::new()
        .merge(system_routes)
        .merge(thub::server::router::dispatch_router().with_state(state))
}

async fn get(host: &str, path: &str) -> (StatusCode, String) {
    let request =
        Request::builder().uri(path).header("host", host).body(Body::empty()).expect("request");
    let response = app().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

#[tokio::test]
async fn health_endpoint_reports_up() {
    let (status, body) = get(SAMPLE_HOST, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"up\""));
}

#[tokio::test]
async fn tenant_listing_names_the_sample_tenant() {
    let (status, body) = get(SAMPLE_HOST, "/system/tenants").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sample 1"));
    assert!(body.contains("http://localhost:3454/"));
}

#[tokio::test]
async fn root_renders_the_overridden_home_page() {
    let (status, body) = get(SAMPLE_HOST, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome to Sample 1"), "body was: {body}");
    // the sample tenant minifies scripts
    assert!(body.contains("site.min.js"));
}

#[tokio::test]
async fn shared_account_controller_serves_the_login_page() {
    let (status, body) = get(SAMPLE_HOST, "/account/login").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sign in to Sample 1"));
}

#[tokio::test]
async fn enabled_report_export_is_served() {
    let (status, body) = get(SAMPLE_HOST, "/reports/export").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sample 1 export"));
}

#[tokio::test]
async fn gated_report_scheduling_is_not_found() {
    let (status, body) = get(SAMPLE_HOST, "/reports/schedule").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "The request cannot be satisfied");
}

#[tokio::test]
async fn unknown_host_is_not_found() {
    let (status, body) = get("evil.example.com", "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "The request cannot be satisfied");
}

#[tokio::test]
async fn unknown_controller_is_not_found() {
    let (status, _body) = get(SAMPLE_HOST, "/billing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
