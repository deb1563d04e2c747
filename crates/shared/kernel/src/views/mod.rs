//! View engines: tenant-scoped resolution of named views.
//!
//! Template compilation is a host concern; this module only defines the
//! narrow rendering contract and a preloaded-batch engine for tenants that
//! ship their views as static content.

use crate::dispatch::DispatchError;
use crate::tenancy::{RequestUrl, TenantSelector};
use fxhash::FxHashMap;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while resolving or rendering a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// No view with the requested name exists in the engine.
    #[error("View '{name}' was not found")]
    ViewNotFound { name: String },
    /// The view exists but could not be rendered.
    #[error("View '{name}' failed to render: {message}")]
    Render { name: String, message: Cow<'static, str> },
}

/// Resolves and renders named views for one tenant.
pub trait ViewEngine: Debug + Send + Sync {
    /// Renders `view` with `model` into markup.
    ///
    /// # Errors
    /// Returns [`ViewError::ViewNotFound`] for an unknown view name and
    /// [`ViewError::Render`] when rendering fails.
    fn render(&self, view: &str, model: &Value) -> Result<String, ViewError>;
}

/// A preloaded batch of views keyed by name (case-insensitive).
///
/// `{{field}}` placeholders are substituted from the top-level fields of the
/// model object; unknown placeholders are left untouched.
#[derive(Debug, Clone, Default)]
pub struct StaticViewEngine {
    views: FxHashMap<String, String>,
}

impl StaticViewEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a view to the batch.
    #[must_use]
    pub fn with_view(mut self, name: impl AsRef<str>, template: impl Into<String>) -> Self {
        self.views.insert(name.as_ref().trim().to_lowercase(), template.into());
        self
    }

    /// Number of views in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl ViewEngine for StaticViewEngine {
    fn render(&self, view: &str, model: &Value) -> Result<String, ViewError> {
        let template = self
            .views
            .get(&view.trim().to_lowercase())
            .ok_or_else(|| ViewError::ViewNotFound { name: view.to_owned() })?;
        Ok(substitute(template, model))
    }
}

/// The host-level engine: selects the tenant for the request and delegates
/// to that tenant's own view engine.
#[derive(Debug, Clone)]
pub struct TenantViewEngine {
    selector: Arc<TenantSelector>,
}

impl TenantViewEngine {
    #[must_use]
    pub fn new(selector: Arc<TenantSelector>) -> Self {
        Self { selector }
    }

    /// Renders `view` through the engine of the tenant matching `url`.
    ///
    /// # Errors
    /// Returns [`TenancyError::TenantNotFound`](crate::tenancy::TenancyError)
    /// when no tenant matches and passes through the tenant engine's
    /// [`ViewError`].
    pub fn render(
        &self,
        url: &RequestUrl,
        view: &str,
        model: &Value,
    ) -> Result<String, DispatchError> {
        let selected = self.selector.select(url)?;
        Ok(selected.tenant.views().render(view, model)?)
    }
}

fn substitute(template: &str, model: &Value) -> String {
    let Some(fields) = model.as_object() else {
        return template.to_owned();
    };

    fields.iter().fold(template.to_owned(), |rendered, (key, value)| {
        let replacement = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        rendered.replace(&format!("{{{{{key}}}}}"), &replacement)
    })
}
