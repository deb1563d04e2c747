use serde_json::json;
use std::sync::Arc;
use thub_domain::config::DispatchConfig;
use thub_kernel::dispatch::{self, DispatchError, ScopeCache};
use thub_kernel::prelude::*;

#[derive(Debug, Default)]
struct HomeController;

impl Controller for HomeController {
    fn invoke(
        &self,
        action: &str,
        context: &ActionContext,
    ) -> Result<ActionOutcome, DispatchError> {
        match action {
            "index" => Ok(ActionOutcome::view(
                "index",
                json!({ "application": context.tenant.application_name() }),
            )),
            "list" => Ok(ActionOutcome::view("list", json!({ "items": context.args.len() }))),
            _ => Ok(ActionOutcome::NotFound),
        }
    }
}

#[derive(Debug, Default)]
struct ReportsController;

impl Controller for ReportsController {
    fn invoke(
        &self,
        action: &str,
        _context: &ActionContext,
    ) -> Result<ActionOutcome, DispatchError> {
        match action {
            "export" => Ok(ActionOutcome::view("export", json!({}))),
            _ => Ok(ActionOutcome::NotFound),
        }
    }
}

fn sample_tenant(features: Option<FeatureRegistry>) -> Tenant {
    let views = StaticViewEngine::new()
        .with_view("index", "<h1>{{application}}</h1>")
        .with_view("list", "<p>{{items}}</p>")
        .with_view("export", "<csv/>");

    let mut builder = Tenant::builder()
        .application_name("Sample")
        .url_prefix("http://localhost:3454/")
        .controller(ControllerRegistration::of::<HomeController>())
        .controller(ControllerRegistration::of::<ReportsController>())
        .views(Arc::new(views));
    if let Some(features) = features {
        builder = builder.features(features);
    }
    builder.build().unwrap()
}

struct Pipeline {
    selector: Arc<TenantSelector>,
    cache: ScopeCache,
    views: TenantViewEngine,
    config: DispatchConfig,
}

impl Pipeline {
    fn new(tenant: Tenant) -> Self {
        let selector = Arc::new(TenantSelector::new(vec![Arc::new(tenant)]));
        let views = TenantViewEngine::new(Arc::clone(&selector));
        Self { selector, cache: ScopeCache::new(), views, config: DispatchConfig::default() }
    }

    fn run(&self, host: &str, path: &str) -> Result<String, DispatchError> {
        let url = RequestUrl::new(host, path);
        dispatch::dispatch(&self.selector, &self.cache, &self.views, &self.config, &url)
    }
}

#[test]
fn root_path_falls_back_to_default_controller_and_action() {
    let pipeline = Pipeline::new(sample_tenant(None));
    assert_eq!(pipeline.run("localhost:3454", "/").unwrap(), "<h1>Sample</h1>");
}

#[test]
fn controller_and_action_segments_route_to_the_action() {
    let pipeline = Pipeline::new(sample_tenant(None));
    assert_eq!(pipeline.run("localhost:3454", "/home/list/a/b").unwrap(), "<p>2</p>");
}

#[test]
fn unknown_host_is_a_missing_tenant() {
    let pipeline = Pipeline::new(sample_tenant(None));
    assert!(matches!(
        pipeline.run("unknown.example.com", "/").unwrap_err(),
        DispatchError::Tenant(TenancyError::TenantNotFound)
    ));
}

#[test]
fn unknown_controller_is_not_found() {
    let pipeline = Pipeline::new(sample_tenant(None));
    assert!(matches!(
        pipeline.run("localhost:3454", "/billing").unwrap_err(),
        DispatchError::ControllerNotFound { .. }
    ));
}

#[test]
fn unknown_action_is_not_found() {
    let pipeline = Pipeline::new(sample_tenant(None));
    assert!(matches!(
        pipeline.run("localhost:3454", "/home/missing").unwrap_err(),
        DispatchError::ActionNotFound { .. }
    ));
}

#[test]
fn tenant_without_registry_is_never_gated() {
    let pipeline = Pipeline::new(sample_tenant(None));
    assert!(pipeline.run("localhost:3454", "/reports/export").is_ok());
}

#[test]
fn gate_uses_controller_and_action_as_default_path() {
    // only home/index is enabled; home/list and reports/* are gated off
    let features = FeatureRegistry::new(vec![
        Feature::composite("home", [Feature::leaf("index").unwrap()]).unwrap(),
    ]);
    let pipeline = Pipeline::new(sample_tenant(Some(features)));

    assert!(pipeline.run("localhost:3454", "/home/index").is_ok());
    assert!(matches!(
        pipeline.run("localhost:3454", "/home/list").unwrap_err(),
        DispatchError::Disabled
    ));
    assert!(matches!(
        pipeline.run("localhost:3454", "/reports/export").unwrap_err(),
        DispatchError::Disabled
    ));
}

#[test]
fn leaf_feature_enables_every_action_of_the_controller() {
    let features = FeatureRegistry::new(vec![Feature::leaf("home").unwrap()]);
    let pipeline = Pipeline::new(sample_tenant(Some(features)));

    assert!(pipeline.run("localhost:3454", "/home/index").is_ok());
    assert!(pipeline.run("localhost:3454", "/home/list").is_ok());
}

#[test]
fn explicit_feature_path_wins_over_the_default() {
    // the registry knows nothing about "reports"; only the explicit
    // "extracts" path keeps this controller reachable
    let views = StaticViewEngine::new().with_view("export", "<csv/>");
    let tenant = Tenant::builder()
        .application_name("Gated")
        .url_prefix("localhost:3454")
        .features(FeatureRegistry::new(vec![Feature::leaf("extracts").unwrap()]))
        .controller(ControllerRegistration::of::<ReportsController>().feature_path(["extracts"]))
        .views(Arc::new(views))
        .build()
        .unwrap();

    let pipeline = Pipeline::new(tenant);
    assert_eq!(pipeline.run("localhost:3454", "/reports/export").unwrap(), "<csv/>");
}

#[test]
fn dispatch_defaults_come_from_configuration() {
    let mut pipeline = Pipeline::new(sample_tenant(None));
    pipeline.config = DispatchConfig {
        default_controller: "reports".to_owned(),
        default_action: "export".to_owned(),
    };

    assert_eq!(pipeline.run("localhost:3454", "/").unwrap(), "<csv/>");
}
