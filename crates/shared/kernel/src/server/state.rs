use crate::dispatch::ScopeCache;
use crate::tenancy::{Tenant, TenantSelector};
use crate::views::TenantViewEngine;
use axum::extract::FromRef;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;
use thub_domain::config::AppConfig;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AppStateError {
    #[error("State validation error: {message}")]
    Validation { message: Cow<'static, str> },
}

#[derive(Debug)]
pub struct AppStateInner {
    pub config: AppConfig,
    pub selector: Arc<TenantSelector>,
    pub scope_cache: ScopeCache,
    pub views: TenantViewEngine,
}

#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    #[must_use]
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }
}

impl Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.inner.config.clone()
    }
}

#[derive(Debug, Default)]
pub struct AppStateBuilder {
    config: Option<AppConfig>,
    tenants: Vec<Arc<Tenant>>,
    scope_cache: Option<ScopeCache>,
}

impl AppStateBuilder {
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.tenants.push(Arc::new(tenant));
        self
    }

    /// Registers multiple tenants at once.
    pub fn tenants<I>(mut self, tenants: I) -> Self
    where
        I: IntoIterator<Item = Tenant>,
    {
        self.tenants.extend(tenants.into_iter().map(Arc::new));
        self
    }

    /// Supplies the controller scope cache; tests inject an isolated one.
    pub fn scope_cache(mut self, cache: ScopeCache) -> Self {
        self.scope_cache = Some(cache);
        self
    }

    /// Builds the shared application state.
    ///
    /// # Errors
    /// Returns an error if no configuration was provided.
    pub fn build(self) -> Result<AppState, AppStateError> {
        let config = self.config.ok_or_else(|| AppStateError::Validation {
            message: "AppConfig not provided".into(),
        })?;

        if self.tenants.is_empty() {
            warn!("No tenants registered; every request will resolve to 404");
        }

        let selector = Arc::new(TenantSelector::new(self.tenants));
        let views = TenantViewEngine::new(Arc::clone(&selector));

        Ok(AppState {
            inner: Arc::new(AppStateInner {
                config,
                selector,
                scope_cache: self.scope_cache.unwrap_or_default(),
                views,
            }),
        })
    }
}
