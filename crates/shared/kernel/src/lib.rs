//! Kernel of the multi-tenant platform.
//!
//! Everything a host application needs to route one HTTP request through the
//! right tenant lives here: tenant descriptors and URL-prefix selection
//! ([`tenancy`]), controller scopes with the override convention and the
//! per-scope cache ([`dispatch`]), view engines ([`views`]), and the shared
//! server state plus system routes ([`server`], behind the `server` feature).
//!
//! ## Config loading
//! ```rust,ignore
//! use thub_kernel::config::load_config;
//! let cfg: thub_domain::config::AppConfig = load_config(Some("server"))?;
//! ```

pub mod config;
pub mod dispatch;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;
pub mod tenancy;
pub mod views;

pub use thub_domain as domain;
