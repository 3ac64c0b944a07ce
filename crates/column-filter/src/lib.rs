//! Column filters - multi-valued filter widgets for tabular data views.
//!
//! This is the umbrella crate that re-exports the core systems and provides
//! the filter widgets themselves.
//!
//! # Example
//!
//! ```
//! use column_filter::filter::{init_filter_registry, FilterConfig};
//!
//! let registry = init_filter_registry();
//! let mut filter = registry.build(&FilterConfig::new("status", "multiselect"))?;
//!
//! filter.selection_changed().connect(|_| println!("re-filter rows"));
//! filter.populate(&["open".to_string(), "closed".to_string()]);
//! assert!(filter.selected_values().matches("closed"));
//! # Ok::<(), column_filter::FilterError>(())
//! ```

pub use column_filter_core::*;

pub mod filter;
pub mod prelude;
