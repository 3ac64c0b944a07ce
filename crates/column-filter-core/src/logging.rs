//! Logging facilities for column filters.
//!
//! Filters use the `tracing` crate for instrumentation. The library never
//! installs a subscriber; applications do:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("column_filter=debug")
//!     .init();
//! ```
//!
//! Reconciliation decisions in `update` are logged at `debug`. The filter
//! entry points are instrumented at `trace` under [`targets::FILTER`], so a
//! `column_filter::filter=trace` directive shows the `populate`, `update`,
//! `reset` and `set_user_selection` spans.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "column_filter_core::signal";
    /// Filter state machines target.
    pub const FILTER: &str = "column_filter::filter";
    /// Filter-builder registry target.
    pub const REGISTRY: &str = "column_filter::registry";
    /// Configuration loading target.
    pub const CONFIG: &str = "column_filter::config";
}
