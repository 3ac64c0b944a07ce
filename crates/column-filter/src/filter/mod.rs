//! Column filter widgets.
//!
//! A column filter restricts the visible rows of a table to those whose value
//! in one column is part of the filter's effective selection. This module owns
//! the view-independent state of those widgets: the offered options, which of
//! them are selected, and when the row filtering layer must recompute.
//!
//! # Filter Kinds
//!
//! - [`MultiSelectFilter`] (`"multiselect"`): zero, one or many values
//! - [`SelectFilter`] (`"select"`): a single value or the all-pseudo-option
//!
//! # Data Flow
//!
//! ```text
//! ┌─────────────┐ populate / update ┌──────────────┐ selection_changed ┌─────────────┐
//! │ Data source │──────────────────>│ ColumnFilter │──────────────────>│ Row filter  │
//! └─────────────┘                   └──────────────┘                   └─────────────┘
//!                                      ^        │
//!                   set_user_selection │        │ options / selected
//!                                   ┌──┴────────v──┐
//!                                   │  Renderer    │
//!                                   └──────────────┘
//! ```
//!
//! The renderer is a pure view: it draws from [`ColumnFilter::options`] and
//! [`ColumnFilter::selected_values`] and reports user edits through
//! [`ColumnFilter::set_user_selection`]. Filters never query the renderer.
//!
//! # Example
//!
//! ```
//! use column_filter::filter::{EffectiveSelection, MultiSelectFilter};
//!
//! let mut filter = MultiSelectFilter::new("country");
//! filter.selection_changed.connect(|_| println!("recompute rows"));
//!
//! filter.populate(["FR", "DE", "IT"]);
//! filter.set_user_selection(["FR", "IT"]);
//!
//! let effective = filter.selected_values();
//! assert!(effective.matches("FR"));
//! assert!(!effective.matches("DE"));
//! ```

mod config;
mod multiselect;
mod registry;
mod select;
pub mod selection;

use std::collections::HashSet;

use column_filter_core::logging::targets;
use column_filter_core::Signal;
use serde::{Deserialize, Serialize};

pub use config::{FilterConfig, FilterSetConfig};
pub use multiselect::MultiSelectFilter;
pub use registry::{
    filter_registry, init_filter_registry, install_filter_registry, FilterBuilder, FilterRegistry,
};
pub use select::SelectFilter;
pub use selection::{AddPolicy, OptionSelection};

/// The reserved option meaning "no restriction, match every row".
pub const DEFAULT_ALL_TEXT: &str = "(All)";

/// Registry keys of the built-in filter kinds.
pub mod kinds {
    /// Key of [`MultiSelectFilter`](super::MultiSelectFilter).
    pub const MULTISELECT: &str = "multiselect";
    /// Key of [`SelectFilter`](super::SelectFilter).
    pub const SELECT: &str = "select";
}

// ============================================================================
// Initial Query
// ============================================================================

/// An external pre-selection, applied once when a filter is first populated.
///
/// In configuration documents it is written either as a string or as a list
/// of strings. An empty string or an empty list means no pre-selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawInitialQuery", into = "RawInitialQuery")]
pub enum InitialQuery {
    /// No pre-selection.
    #[default]
    None,
    /// Pre-select a single value.
    Single(String),
    /// Pre-select exactly these values.
    Many(Vec<String>),
}

impl InitialQuery {
    /// Coerce a loosely typed query leniently.
    ///
    /// An empty string becomes [`InitialQuery::None`], any other string a
    /// single-value pre-selection.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::None
        } else {
            Self::Single(text)
        }
    }

    /// Build a multi-value pre-selection. An empty list means no pre-selection.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Self::None
        } else {
            Self::Many(values)
        }
    }

    /// Returns true if there is nothing to pre-select.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The values this query pre-selects, in query order.
    pub fn values(&self) -> &[String] {
        match self {
            Self::None => &[],
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawInitialQuery {
    Text(String),
    List(Vec<String>),
}

impl From<RawInitialQuery> for InitialQuery {
    fn from(raw: RawInitialQuery) -> Self {
        match raw {
            RawInitialQuery::Text(text) => Self::from_text(text),
            RawInitialQuery::List(values) => Self::from_values(values),
        }
    }
}

impl From<InitialQuery> for RawInitialQuery {
    fn from(query: InitialQuery) -> Self {
        match query {
            InitialQuery::None => Self::Text(String::new()),
            InitialQuery::Single(value) => Self::Text(value),
            InitialQuery::Many(values) => Self::List(values),
        }
    }
}

// ============================================================================
// Effective Selection
// ============================================================================

/// The selection as seen by the row filtering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveSelection {
    /// No restriction: every row matches.
    All,
    /// Only rows whose cell is one of these values match.
    Values(HashSet<String>),
}

impl EffectiveSelection {
    /// Returns true if a row with this cell value is visible.
    pub fn matches(&self, cell: &str) -> bool {
        match self {
            Self::All => true,
            Self::Values(values) => values.contains(cell),
        }
    }

    /// Returns true if this selection places no restriction on rows.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Returns true if a column value collides with the all-pseudo-option text.
///
/// Such values are never offered as options: the all-pseudo-option stands for
/// "no restriction" and a data value spelled the same way must not turn into
/// it on reset or on a user pick.
pub(crate) fn shadows_all_text(value: &str, all_text: &str, column: &str) -> bool {
    if value != all_text {
        return false;
    }
    tracing::debug!(
        target: targets::FILTER,
        column = %column,
        value = %value,
        "skipping column value equal to the all-pseudo-option"
    );
    true
}

// ============================================================================
// ColumnFilter Trait
// ============================================================================

/// The interface shared by every filter kind.
///
/// The registry hands filters out as `Box<dyn ColumnFilter>`, so generic table
/// machinery can drive them without knowing their concrete type.
pub trait ColumnFilter: Send + Sync {
    /// The registry key of this filter kind.
    fn kind(&self) -> &'static str;

    /// The column this filter restricts.
    fn column(&self) -> &str;

    /// First load of the column's distinct values.
    fn populate(&mut self, data: &[String]);

    /// Reconcile the options against refreshed column data.
    fn update(&mut self, data: &[String]);

    /// Remove all filtering.
    fn reset(&mut self);

    /// The pre-selection applied by [`populate`](Self::populate).
    fn initial_query(&self) -> InitialQuery;

    /// Change hook invoked by the renderer with the user's raw selection.
    fn set_user_selection(&mut self, values: &[String]);

    /// The offered options, in first-appearance order.
    fn options(&self) -> &[String];

    /// Returns true if the all-pseudo-option is selected.
    fn is_all_selected(&self) -> bool;

    /// The selection consumers filter rows with.
    fn selected_values(&self) -> EffectiveSelection;

    /// Emitted whenever the effective selection must be recomputed.
    fn selection_changed(&self) -> &Signal<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_query_from_text() {
        assert_eq!(InitialQuery::from_text(""), InitialQuery::None);
        assert_eq!(
            InitialQuery::from_text("b"),
            InitialQuery::Single("b".to_string())
        );
    }

    #[test]
    fn test_initial_query_from_values() {
        assert_eq!(InitialQuery::from_values(Vec::<String>::new()), InitialQuery::None);
        assert_eq!(
            InitialQuery::from_values(["a", "c"]).values(),
            &["a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_initial_query_deserialize_lenient() {
        let single: InitialQuery = serde_json::from_str(r#""b""#).unwrap();
        assert_eq!(single, InitialQuery::Single("b".to_string()));

        let many: InitialQuery = serde_json::from_str(r#"["a", "c"]"#).unwrap();
        assert_eq!(many.values().len(), 2);

        let empty: InitialQuery = serde_json::from_str(r#""""#).unwrap();
        assert!(empty.is_none());

        let empty_list: InitialQuery = serde_json::from_str("[]").unwrap();
        assert!(empty_list.is_none());
    }

    #[test]
    fn test_initial_query_serialize() {
        let json = serde_json::to_string(&InitialQuery::from_values(["a", "c"])).unwrap();
        assert_eq!(json, r#"["a","c"]"#);
        assert_eq!(serde_json::to_string(&InitialQuery::None).unwrap(), r#""""#);
    }

    #[test]
    fn test_effective_selection_matches() {
        assert!(EffectiveSelection::All.matches("anything"));

        let values = EffectiveSelection::Values(["a".to_string()].into_iter().collect());
        assert!(values.matches("a"));
        assert!(!values.matches("b"));
        assert!(!values.is_all());
    }
}
