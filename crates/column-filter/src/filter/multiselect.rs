//! Multi-value column filter.
//!
//! [`MultiSelectFilter`] lets the user pick zero, one or many distinct values
//! of a column. Every option starts selected, so a freshly populated filter
//! does not hide any row. After a data refresh the option list grows with
//! newly appearing values while the user's exclusions are preserved.
//!
//! # Unfiltered and filtered mode
//!
//! `update` decides how to treat the refreshed data before touching any
//! state:
//!
//! - **Unfiltered** (the all-pseudo-option was selected at the last commit, or
//!   no offered option is deselected): every value in the data ends up
//!   selected.
//! - **Filtered** (at least one option is deselected): known options keep
//!   their state, new options are selected.
//!
//! Options that vanish from the data are never removed.
//!
//! # Example
//!
//! ```
//! use column_filter::filter::MultiSelectFilter;
//!
//! let mut filter = MultiSelectFilter::new("status");
//! filter.populate(["open", "closed", "stale"]);
//!
//! // The user excludes "closed".
//! filter.set_user_selection(["open", "stale"]);
//!
//! // A refresh brings a new value: it is visible, "closed" stays excluded.
//! filter.update(["open", "closed", "stale", "merged"]);
//! assert!(filter.is_selected("merged"));
//! assert!(!filter.is_selected("closed"));
//! ```

use column_filter_core::logging::targets;
use column_filter_core::Signal;

use super::config::FilterConfig;
use super::selection::{AddPolicy, OptionSelection};
use super::{
    kinds, shadows_all_text, ColumnFilter, EffectiveSelection, InitialQuery, DEFAULT_ALL_TEXT,
};

/// Selection state machine of a multi-value column filter.
///
/// # Signals
///
/// - `selection_changed`: Emitted after `populate`, `reset` and every user
///   edit. Consumers re-read [`selected_values`](Self::selected_values).
pub struct MultiSelectFilter {
    /// Column this filter restricts.
    column: String,

    /// Text of the all-pseudo-option.
    all_text: String,

    /// Pre-selection applied by `populate`.
    initial_query: InitialQuery,

    /// Offered options and the selected subset.
    selection: OptionSelection,

    /// Whether `populate` has run.
    populated: bool,

    /// Emitted when the effective selection must be recomputed.
    pub selection_changed: Signal<()>,
}

impl MultiSelectFilter {
    /// Creates an empty filter for `column`.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            all_text: DEFAULT_ALL_TEXT.to_string(),
            initial_query: InitialQuery::None,
            selection: OptionSelection::new(),
            populated: false,
            selection_changed: Signal::new(),
        }
    }

    /// Creates a filter from its declarative configuration.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.column.clone())
            .with_all_text(config.all_text.clone())
            .with_initial_query(config.initial_query.clone())
    }

    /// Sets the text of the all-pseudo-option.
    pub fn with_all_text(mut self, all_text: impl Into<String>) -> Self {
        self.all_text = all_text.into();
        self
    }

    /// Sets the pre-selection applied by [`populate`](Self::populate).
    ///
    /// Without it the filter has no initial query: a multi-value filter is
    /// driven interactively.
    pub fn with_initial_query(mut self, query: InitialQuery) -> Self {
        self.initial_query = query;
        self
    }

    // =========================================================================
    // Data Refresh
    // =========================================================================

    /// First load of the column's distinct values.
    ///
    /// Every value is offered and selected, then the initial query (if any)
    /// replaces the selection. The result is committed and
    /// `selection_changed` is emitted.
    ///
    /// This is meant to run once per filter. A second call adds options again
    /// and re-applies the initial query.
    #[tracing::instrument(skip_all, target = "column_filter::filter", level = "trace", fields(column = %self.column))]
    pub fn populate<I>(&mut self, data: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.populated {
            tracing::warn!(
                target: targets::FILTER,
                column = %self.column,
                "populate called again, re-applying initial query"
            );
        }

        let (all_text, column) = (&self.all_text, &self.column);
        self.selection.add_options(
            data.into_iter()
                .filter(|value| !shadows_all_text(value.as_ref(), all_text, column)),
            AddPolicy::Select,
        );

        let query = self.initial_query();
        if !query.is_none() {
            self.selection.clear_selection();
            for value in query.values() {
                if !self.selection.contains_option(value) {
                    tracing::debug!(
                        target: targets::FILTER,
                        column = %self.column,
                        value = %value,
                        "initial query selects a value that is not an option"
                    );
                }
                self.selection.select(value);
            }
        }

        self.selection.commit();
        self.populated = true;
        self.notify_change();
    }

    /// Reconciles the options against refreshed column data.
    ///
    /// Does not emit `selection_changed`: only the offered options grow.
    #[tracing::instrument(skip_all, target = "column_filter::filter", level = "trace", fields(column = %self.column))]
    pub fn update<I>(&mut self, data: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let policy = if self.is_unfiltered() {
            AddPolicy::Select
        } else {
            AddPolicy::Refresh
        };

        let (all_text, column) = (&self.all_text, &self.column);
        let added = self.selection.add_options(
            data.into_iter()
                .filter(|value| !shadows_all_text(value.as_ref(), all_text, column)),
            policy,
        );
        tracing::debug!(
            target: targets::FILTER,
            column = %self.column,
            ?policy,
            added,
            "options reconciled"
        );
    }

    /// Removes all filtering: every offered option becomes selected.
    ///
    /// The all-pseudo-option is not added. The result is committed and
    /// `selection_changed` is emitted.
    #[tracing::instrument(skip_all, target = "column_filter::filter", level = "trace", fields(column = %self.column))]
    pub fn reset(&mut self) {
        self.selection.select_all_options();
        self.selection.commit();
        self.notify_change();
    }

    /// The pre-selection applied by [`populate`](Self::populate).
    ///
    /// [`InitialQuery::None`] unless one was set with
    /// [`with_initial_query`](Self::with_initial_query).
    pub fn initial_query(&self) -> InitialQuery {
        self.initial_query.clone()
    }

    // =========================================================================
    // User Edits
    // =========================================================================

    /// Change hook for the renderer: the user's raw selection changed.
    ///
    /// The raw selection becomes authoritative. Values that are neither an
    /// offered option nor the all-pseudo-option are ignored. The result is
    /// committed and `selection_changed` is emitted.
    #[tracing::instrument(skip_all, target = "column_filter::filter", level = "trace", fields(column = %self.column))]
    pub fn set_user_selection<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut accepted = Vec::new();
        for value in values {
            let value = value.as_ref();
            if value == self.all_text || self.selection.contains_option(value) {
                accepted.push(value.to_owned());
            } else {
                tracing::debug!(
                    target: targets::FILTER,
                    column = %self.column,
                    value = %value,
                    "ignoring user selection of unknown option"
                );
            }
        }

        self.selection.replace_selection(accepted);
        self.selection.commit();
        self.notify_change();
    }

    fn notify_change(&self) {
        let slots = self.selection_changed.emit(());
        tracing::trace!(target: targets::FILTER, column = %self.column, slots, "selection changed");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The column this filter restricts.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Text of the all-pseudo-option.
    pub fn all_text(&self) -> &str {
        &self.all_text
    }

    /// Returns true once `populate` has run.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// The offered options, in first-appearance order.
    pub fn options(&self) -> &[String] {
        self.selection.options()
    }

    /// Checks if a value is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selection.is_selected(value)
    }

    /// The selected values, options first in option order.
    pub fn selected(&self) -> Vec<String> {
        self.selection.selected()
    }

    /// The selection saved at the last commit.
    pub fn saved_selection(&self) -> &[String] {
        self.selection.saved()
    }

    /// Offered options that are not selected.
    pub fn not_selected(&self) -> Vec<&str> {
        self.selection.not_selected()
    }

    /// Returns true if the all-pseudo-option is selected.
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_selected(&self.all_text)
    }

    /// Returns true if `update` would treat the filter as unfiltered.
    ///
    /// That is the case when the all-pseudo-option was part of the last
    /// committed selection, or when no offered option is deselected. An
    /// empty option list therefore counts as unfiltered.
    pub fn is_unfiltered(&self) -> bool {
        self.selection.saved_contains(&self.all_text) || self.selection.not_selected().is_empty()
    }

    /// The selection consumers filter rows with.
    pub fn selected_values(&self) -> EffectiveSelection {
        if self.is_all_selected() {
            EffectiveSelection::All
        } else {
            EffectiveSelection::Values(self.selection.selected_set().clone())
        }
    }
}

impl ColumnFilter for MultiSelectFilter {
    fn kind(&self) -> &'static str {
        kinds::MULTISELECT
    }

    fn column(&self) -> &str {
        &self.column
    }

    fn populate(&mut self, data: &[String]) {
        MultiSelectFilter::populate(self, data);
    }

    fn update(&mut self, data: &[String]) {
        MultiSelectFilter::update(self, data);
    }

    fn reset(&mut self) {
        MultiSelectFilter::reset(self);
    }

    fn initial_query(&self) -> InitialQuery {
        MultiSelectFilter::initial_query(self)
    }

    fn set_user_selection(&mut self, values: &[String]) {
        MultiSelectFilter::set_user_selection(self, values);
    }

    fn options(&self) -> &[String] {
        self.selection.options()
    }

    fn is_all_selected(&self) -> bool {
        MultiSelectFilter::is_all_selected(self)
    }

    fn selected_values(&self) -> EffectiveSelection {
        MultiSelectFilter::selected_values(self)
    }

    fn selection_changed(&self) -> &Signal<()> {
        &self.selection_changed
    }
}

static_assertions::assert_impl_all!(MultiSelectFilter: Send, Sync);
