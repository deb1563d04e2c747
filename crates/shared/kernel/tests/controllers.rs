use serde_json::json;
use thub_kernel::dispatch::{
    ActionContext, ActionOutcome, Controller, ControllerRegistration, ControllerRegistry,
    DispatchError, ScopeCache,
};
use thub_kernel::tenancy::TenancyError;

mod shared {
    use super::*;

    /// Shared base controller every tenant can serve.
    #[derive(Debug, Default)]
    pub struct FooController;

    impl Controller for FooController {
        fn invoke(
            &self,
            action: &str,
            _context: &ActionContext,
        ) -> Result<ActionOutcome, DispatchError> {
            match action {
                "index" => Ok(ActionOutcome::view("index", json!({ "from": "base" }))),
                _ => Ok(ActionOutcome::NotFound),
            }
        }
    }
}

mod sub {
    use super::*;

    /// Tenant-specific replacement with the same simple name as the base.
    #[derive(Debug, Default)]
    pub struct FooController;

    impl Controller for FooController {
        fn invoke(
            &self,
            action: &str,
            _context: &ActionContext,
        ) -> Result<ActionOutcome, DispatchError> {
            match action {
                "index" => Ok(ActionOutcome::view("index", json!({ "from": "override" }))),
                _ => Ok(ActionOutcome::NotFound),
            }
        }
    }
}

/// Valid controller trait impl, but the type name lacks the suffix.
#[derive(Debug, Default)]
struct Widget;

impl Controller for Widget {
    fn invoke(&self, _action: &str, _context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        Ok(ActionOutcome::NotFound)
    }
}

#[derive(Debug, Default)]
struct BarController;

impl Controller for BarController {
    fn invoke(&self, _action: &str, _context: &ActionContext) -> Result<ActionOutcome, DispatchError> {
        Ok(ActionOutcome::NotFound)
    }
}

#[test]
fn non_controller_candidate_is_not_registered() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<Widget>()).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn plain_controller_registers_under_its_friendly_name() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();

    assert_eq!(registry.len(), 1);
    let resolved = registry.resolve("foo").unwrap();
    assert!(resolved.type_name().ends_with("shared::FooController"));
}

#[test]
fn resolution_accepts_the_controller_suffix() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();

    assert!(registry.resolve("FooController").is_some());
    assert!(registry.resolve(" FOO ").is_some());
    assert!(registry.resolve("bar").is_none());
}

#[test]
fn override_alone_registers_a_single_slot() {
    let mut registry = ControllerRegistry::new();
    registry
        .process(
            ControllerRegistration::of::<sub::FooController>()
                .overriding::<shared::FooController>(),
        )
        .unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.resolve("foo").unwrap().type_name().ends_with("sub::FooController"));
}

#[test]
fn override_after_base_takes_over_the_slot() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();
    registry
        .process(
            ControllerRegistration::of::<sub::FooController>()
                .overriding::<shared::FooController>(),
        )
        .unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.resolve("foo").unwrap().type_name().ends_with("sub::FooController"));
}

#[test]
fn base_after_override_is_ignored() {
    let mut registry = ControllerRegistry::new();
    registry
        .process(
            ControllerRegistration::of::<sub::FooController>()
                .overriding::<shared::FooController>(),
        )
        .unwrap();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.resolve("foo").unwrap().type_name().ends_with("sub::FooController"));
}

#[test]
fn reregistering_the_same_type_is_idempotent() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn distinct_types_with_the_same_name_are_rejected() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();

    let conflict = registry.process(ControllerRegistration::of::<sub::FooController>());
    assert_eq!(
        conflict.unwrap_err(),
        TenancyError::DuplicateController { name: "foo".to_owned() }
    );
}

#[test]
fn override_declaration_for_a_differently_named_parent_registers_directly() {
    let mut registry = ControllerRegistry::new();
    registry
        .process(ControllerRegistration::of::<BarController>().overriding::<shared::FooController>())
        .unwrap();

    // no recognized parent: "bar" registers as itself and "foo" stays free
    assert!(registry.resolve("bar").is_some());
    assert!(registry.resolve("foo").is_none());
}

#[test]
fn resolved_controller_instantiates_the_override() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();
    registry
        .process(
            ControllerRegistration::of::<sub::FooController>()
                .overriding::<shared::FooController>(),
        )
        .unwrap();

    let controller = registry.resolve("foo").unwrap().create();
    let context = ActionContext {
        tenant: std::sync::Arc::new(
            thub_kernel::tenancy::Tenant::builder()
                .application_name("t")
                .url_prefix("localhost")
                .build()
                .unwrap(),
        ),
        args: Vec::new(),
    };

    match controller.invoke("index", &context).unwrap() {
        ActionOutcome::View { model, .. } => assert_eq!(model["from"], "override"),
        ActionOutcome::NotFound => panic!("index should exist"),
    }
}

#[test]
fn explicit_feature_path_drops_blank_segments() {
    let registration = ControllerRegistration::of::<shared::FooController>()
        .feature_path(["reports", "  ", "export"]);
    let mut registry = ControllerRegistry::new();
    registry.process(registration).unwrap();

    let resolved = registry.resolve("foo").unwrap();
    assert_eq!(resolved.feature_path().unwrap(), ["reports", "export"]);
}

#[test]
fn entirely_blank_feature_path_falls_back_to_default() {
    let registration =
        ControllerRegistration::of::<shared::FooController>().feature_path(["", "  "]);
    let mut registry = ControllerRegistry::new();
    registry.process(registration).unwrap();

    assert!(registry.resolve("foo").unwrap().feature_path().is_none());
}

#[test]
fn scope_cache_materializes_each_scope_once() {
    let mut registry = ControllerRegistry::new();
    registry.process(ControllerRegistration::of::<shared::FooController>()).unwrap();

    let cache = ScopeCache::new();
    assert!(cache.is_empty());

    let first = cache.controllers_for(&registry);
    let second = cache.controllers_for(&registry);
    assert_eq!(cache.len(), 1);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn scope_cache_keeps_scopes_apart() {
    let mut foos = ControllerRegistry::new();
    foos.process(ControllerRegistration::of::<shared::FooController>()).unwrap();
    let mut bars = ControllerRegistry::new();
    bars.process(ControllerRegistration::of::<BarController>()).unwrap();

    let cache = ScopeCache::new();
    assert!(cache.resolve(&foos, "foo").is_some());
    assert!(cache.resolve(&foos, "bar").is_none());
    assert!(cache.resolve(&bars, "bar").is_some());
    assert_eq!(cache.len(), 2);
}
