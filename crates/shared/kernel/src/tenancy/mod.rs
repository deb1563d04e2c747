//! Tenant descriptors and URL-prefix tenant selection.
//!
//! A [`Tenant`] bundles everything one application configuration owns: its
//! registered base URLs, an optional feature registry, a controller scope,
//! and a view engine. The [`TenantSelector`] maps an incoming request to the
//! tenant whose registered prefix matches the request's base URL.

use crate::dispatch::{ControllerRegistration, ControllerRegistry};
use crate::views::{StaticViewEngine, ViewEngine};
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;
use thub_domain::features::FeatureRegistry;
use tracing::trace;

/// Errors raised while configuring tenants or selecting one for a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenancyError {
    /// No tenant matches the request's base URL. Expected and recoverable:
    /// the HTTP boundary translates it into a "not found" response.
    #[error("A tenant was not found")]
    TenantNotFound,
    /// A tenant was configured with invalid data (empty name, no URL
    /// prefixes, malformed prefix).
    #[error("Invalid tenant configuration: {message}")]
    InvalidTenant { message: Cow<'static, str> },
    /// Two distinct controller types claimed the same name identity within
    /// one scope.
    #[error("Controller '{name}' is already registered for this scope")]
    DuplicateController { name: String },
}

/// The identifying part of an incoming request: host (with port, as sent by
/// the client) and URI path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    host: String,
    path: String,
}

impl RequestUrl {
    #[must_use]
    pub fn new(host: impl AsRef<str>, path: impl AsRef<str>) -> Self {
        Self {
            host: host.as_ref().trim().to_lowercase(),
            path: path.as_ref().trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// One registered base URL, normalized once at tenant construction.
#[derive(Debug, Clone)]
struct UrlPrefix {
    raw: String,
    host: String,
    /// Either empty or `/`-prefixed without a trailing slash.
    path: String,
}

impl UrlPrefix {
    fn parse(raw: &str) -> Result<Self, TenancyError> {
        let trimmed = raw.trim();
        let without_scheme = trimmed
            .split_once("://")
            .map_or(trimmed, |(_, rest)| rest);

        let (host, path) = match without_scheme.split_once('/') {
            Some((host, path)) => (host, format!("/{}", path.trim_end_matches('/'))),
            None => (without_scheme, String::new()),
        };
        let path = if path == "/" { String::new() } else { path };

        if host.is_empty() {
            return Err(TenancyError::InvalidTenant {
                message: format!("URL prefix '{raw}' has no host").into(),
            });
        }

        Ok(Self {
            raw: trimmed.to_owned(),
            host: host.to_lowercase(),
            path: path.to_lowercase(),
        })
    }

    /// Matches `url` against this prefix and returns the path remainder.
    fn matches<'a>(&self, url: &'a RequestUrl) -> Option<&'a str> {
        if url.host() != self.host {
            return None;
        }
        let rest = url.path().strip_prefix(self.path.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

/// A named application configuration: URL prefixes, feature set, controller
/// scope, and view engine. Immutable once built.
#[derive(Debug)]
pub struct Tenant {
    application_name: String,
    url_prefixes: Vec<UrlPrefix>,
    minify_js: bool,
    minify_css: bool,
    features: Option<FeatureRegistry>,
    controllers: ControllerRegistry,
    views: Arc<dyn ViewEngine>,
}

impl Tenant {
    #[must_use]
    pub fn builder() -> TenantBuilder {
        TenantBuilder::default()
    }

    #[must_use]
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Registered base URLs as configured.
    #[must_use]
    pub fn url_prefixes(&self) -> Vec<&str> {
        self.url_prefixes.iter().map(|prefix| prefix.raw.as_str()).collect()
    }

    /// Feature registry of this tenant; `None` means no gating at all.
    #[must_use]
    pub fn features(&self) -> Option<&FeatureRegistry> {
        self.features.as_ref()
    }

    #[must_use]
    pub fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }

    #[must_use]
    pub fn views(&self) -> &Arc<dyn ViewEngine> {
        &self.views
    }

    /// Script asset name honoring the tenant's minification setting.
    #[must_use]
    pub fn script_asset(&self, name: &str) -> String {
        if self.minify_js { format!("{name}.min.js") } else { format!("{name}.js") }
    }

    /// Stylesheet asset name honoring the tenant's minification setting.
    #[must_use]
    pub fn style_asset(&self, name: &str) -> String {
        if self.minify_css { format!("{name}.min.css") } else { format!("{name}.css") }
    }

    fn matches<'a>(&self, url: &'a RequestUrl) -> Option<&'a str> {
        self.url_prefixes.iter().find_map(|prefix| prefix.matches(url))
    }
}

/// A fluent builder for configuring a [`Tenant`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct TenantBuilder {
    application_name: Option<String>,
    url_prefixes: Vec<String>,
    minify_js: bool,
    minify_css: bool,
    features: Option<FeatureRegistry>,
    registrations: Vec<ControllerRegistration>,
    views: Option<Arc<dyn ViewEngine>>,
}

impl TenantBuilder {
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Registers a base URL this tenant serves. May be called repeatedly.
    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefixes.push(prefix.into());
        self
    }

    pub const fn minify_js(mut self, enabled: bool) -> Self {
        self.minify_js = enabled;
        self
    }

    pub const fn minify_css(mut self, enabled: bool) -> Self {
        self.minify_css = enabled;
        self
    }

    pub fn features(mut self, features: FeatureRegistry) -> Self {
        self.features = Some(features);
        self
    }

    /// Queues a controller registration; the override convention runs on
    /// every queued candidate when the tenant is built.
    pub fn controller(mut self, registration: ControllerRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    pub fn views(mut self, views: Arc<dyn ViewEngine>) -> Self {
        self.views = Some(views);
        self
    }

    /// Validates the configuration and builds the tenant.
    ///
    /// # Errors
    /// Returns [`TenancyError::InvalidTenant`] for an empty application name,
    /// missing URL prefixes, or a malformed prefix, and
    /// [`TenancyError::DuplicateController`] when two distinct controller
    /// types claim the same name identity.
    pub fn build(self) -> Result<Tenant, TenancyError> {
        let application_name = self
            .application_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| TenancyError::InvalidTenant {
                message: "Application name must not be empty".into(),
            })?
            .to_owned();

        if self.url_prefixes.is_empty() {
            return Err(TenancyError::InvalidTenant {
                message: "A tenant needs at least one URL prefix".into(),
            });
        }

        let url_prefixes = self
            .url_prefixes
            .iter()
            .map(|raw| UrlPrefix::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let mut controllers = ControllerRegistry::new();
        for registration in self.registrations {
            controllers.process(registration)?;
        }

        Ok(Tenant {
            application_name,
            url_prefixes,
            minify_js: self.minify_js,
            minify_css: self.minify_css,
            features: self.features,
            controllers,
            views: self.views.unwrap_or_else(|| Arc::new(StaticViewEngine::default())),
        })
    }
}

/// A successful tenant selection: the tenant plus the request path left over
/// after the matched prefix.
#[derive(Debug, Clone)]
pub struct TenantMatch {
    pub tenant: Arc<Tenant>,
    pub remainder: String,
}

/// Selects tenants based on the request's base URL.
#[derive(Debug, Clone, Default)]
pub struct TenantSelector {
    tenants: Vec<Arc<Tenant>>,
}

impl TenantSelector {
    #[must_use]
    pub fn new(tenants: Vec<Arc<Tenant>>) -> Self {
        Self { tenants }
    }

    /// All tenants known to this selector, in registration order.
    #[must_use]
    pub fn tenants(&self) -> &[Arc<Tenant>] {
        &self.tenants
    }

    /// Selects the tenant whose registered prefix matches the request.
    ///
    /// Tenants are scanned in registration order; the first match wins.
    ///
    /// # Errors
    /// Returns [`TenancyError::TenantNotFound`] when no prefix matches.
    pub fn select(&self, url: &RequestUrl) -> Result<TenantMatch, TenancyError> {
        for tenant in &self.tenants {
            if let Some(remainder) = tenant.matches(url) {
                trace!(
                    tenant = tenant.application_name(),
                    host = url.host(),
                    path = url.path(),
                    "Tenant selected"
                );
                return Ok(TenantMatch {
                    tenant: Arc::clone(tenant),
                    remainder: remainder.to_owned(),
                });
            }
        }

        Err(TenancyError::TenantNotFound)
    }
}
