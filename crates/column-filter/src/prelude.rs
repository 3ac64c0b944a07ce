//! Convenient re-exports for filter consumers.
//!
//! ```
//! use column_filter::prelude::*;
//!
//! let mut filter = MultiSelectFilter::new("status");
//! filter.populate(["open"]);
//! ```

pub use column_filter_core::{ConnectionGuard, ConnectionId, FilterError, Result, Signal};

pub use crate::filter::{
    filter_registry, init_filter_registry, ColumnFilter, EffectiveSelection, FilterConfig,
    FilterRegistry, FilterSetConfig, InitialQuery, MultiSelectFilter, SelectFilter,
};
