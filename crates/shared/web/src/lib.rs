//! Shared web content every tenant starts from: the base controllers and
//! the host view batch. Tenant crates override individual controllers
//! through the registration convention instead of forking this crate.

pub mod controllers;

use thub_kernel::views::StaticViewEngine;

/// The host's precompiled view batch. Tenants extend or overwrite entries
/// with their own [`StaticViewEngine::with_view`] calls.
#[must_use]
pub fn host_views() -> StaticViewEngine {
    StaticViewEngine::new()
        .with_view("index", "<h1>{{application}}</h1><script src=\"/{{script}}\"></script>")
        .with_view("list", "<h2>{{application}} list</h2><ul>{{items}}</ul>")
        .with_view("detail", "<h2>{{application}} detail</h2><p>{{subject}}</p>")
        .with_view("search", "<h2>Search {{application}}</h2><form></form>")
        .with_view("_notification", "<div class=\"notice\">{{message}}</div>")
        .with_view("login", "<h2>Sign in to {{application}}</h2><form method=\"post\"></form>")
        .with_view("logout", "<p>Signed out of {{application}}</p>")
        .with_view("register", "<h2>Register for {{application}}</h2><form method=\"post\"></form>")
}
