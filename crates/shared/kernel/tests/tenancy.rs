use std::sync::Arc;
use thub_kernel::prelude::*;

fn tenant(name: &str, prefixes: &[&str]) -> Tenant {
    let mut builder = Tenant::builder().application_name(name);
    for prefix in prefixes {
        builder = builder.url_prefix(*prefix);
    }
    builder.build().unwrap()
}

#[test]
fn selector_returns_tenant_with_matching_prefix() {
    let selector = TenantSelector::new(vec![
        Arc::new(tenant("google", &["http://www.google.com", "http://www.yahoo.com"])),
        Arc::new(tenant("expected", &["http://www.eagleenvision.net"])),
    ]);

    let url = RequestUrl::new("www.eagleenvision.net", "/");
    let selected = selector.select(&url).unwrap();
    assert_eq!(selected.tenant.application_name(), "expected");
}

#[test]
fn selector_errs_when_no_tenant_matches() {
    let selector = TenantSelector::new(vec![Arc::new(tenant(
        "registered",
        &["http://www.eagleenvision.net"],
    ))]);

    let url = RequestUrl::new("www.foo.com", "/");
    assert_eq!(selector.select(&url).unwrap_err(), TenancyError::TenantNotFound);
}

#[test]
fn selector_on_empty_tenant_set_finds_nothing() {
    let selector = TenantSelector::new(Vec::new());
    assert_eq!(
        selector.select(&RequestUrl::new("localhost:3454", "/")).unwrap_err(),
        TenancyError::TenantNotFound
    );
}

#[test]
fn prefix_matching_ignores_scheme_case_and_trailing_slash() {
    let selector =
        TenantSelector::new(vec![Arc::new(tenant("sample", &["https://Sample.Example.COM/"]))]);

    let selected = selector.select(&RequestUrl::new("sample.example.com", "/home/index")).unwrap();
    assert_eq!(selected.tenant.application_name(), "sample");
    assert_eq!(selected.remainder, "/home/index");
}

#[test]
fn path_prefix_tenant_strips_its_mount_path() {
    let selector = TenantSelector::new(vec![
        Arc::new(tenant("acme", &["localhost:3454/acme"])),
        Arc::new(tenant("root", &["localhost:3454"])),
    ]);

    let acme = selector.select(&RequestUrl::new("localhost:3454", "/acme/home/list")).unwrap();
    assert_eq!(acme.tenant.application_name(), "acme");
    assert_eq!(acme.remainder, "/home/list");

    // "/acmeister" must not leak into the "/acme" mount
    let other = selector.select(&RequestUrl::new("localhost:3454", "/acmeister")).unwrap();
    assert_eq!(other.tenant.application_name(), "root");
}

#[test]
fn first_registered_tenant_wins_on_overlap() {
    let selector = TenantSelector::new(vec![
        Arc::new(tenant("first", &["localhost:3454"])),
        Arc::new(tenant("second", &["localhost:3454"])),
    ]);

    let selected = selector.select(&RequestUrl::new("localhost:3454", "/")).unwrap();
    assert_eq!(selected.tenant.application_name(), "first");
}

#[test]
fn tenant_requires_a_name_and_a_prefix() {
    let unnamed = Tenant::builder().url_prefix("localhost").build();
    assert!(matches!(unnamed.unwrap_err(), TenancyError::InvalidTenant { .. }));

    let unreachable = Tenant::builder().application_name("x").build();
    assert!(matches!(unreachable.unwrap_err(), TenancyError::InvalidTenant { .. }));

    let hostless = Tenant::builder().application_name("x").url_prefix("http://").build();
    assert!(matches!(hostless.unwrap_err(), TenancyError::InvalidTenant { .. }));
}

#[test]
fn asset_names_follow_minify_flags() {
    let minified = Tenant::builder()
        .application_name("m")
        .url_prefix("localhost")
        .minify_js(true)
        .minify_css(true)
        .build()
        .unwrap();
    assert_eq!(minified.script_asset("app"), "app.min.js");
    assert_eq!(minified.style_asset("site"), "site.min.css");

    let plain = tenant("p", &["localhost"]);
    assert_eq!(plain.script_asset("app"), "app.js");
    assert_eq!(plain.style_asset("site"), "site.css");
}
