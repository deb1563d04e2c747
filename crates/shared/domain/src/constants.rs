//! Well-known names shared across crates.

/// OpenAPI tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";

/// Controller resolved when the request path carries no controller segment.
pub const DEFAULT_CONTROLLER: &str = "home";

/// Action invoked when the request path carries no action segment.
pub const DEFAULT_ACTION: &str = "index";

/// Type-name suffix that marks a type as a controller.
pub const CONTROLLER_SUFFIX: &str = "Controller";
