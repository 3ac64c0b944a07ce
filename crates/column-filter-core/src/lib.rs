//! Core systems for column filters.
//!
//! This crate provides the pieces the filter widgets are built on:
//!
//! - **Signal/Slot System**: change notification from a filter to the row
//!   filtering layer
//! - **Errors**: the registry and configuration error taxonomy
//! - **Logging**: `tracing` targets and span names
//!
//! # Signal/Slot Example
//!
//! ```
//! use column_filter_core::Signal;
//!
//! let selection_changed = Signal::<()>::new();
//!
//! let conn_id = selection_changed.connect(|_| {
//!     println!("selection changed");
//! });
//!
//! selection_changed.emit(());
//! selection_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{FilterError, Result};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
