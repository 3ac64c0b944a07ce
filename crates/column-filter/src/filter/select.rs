//! Single-value column filter.
//!
//! [`SelectFilter`] offers the all-pseudo-option followed by the column's
//! distinct values, and keeps exactly one of them selected. Unlike the
//! multi-value filter it can be driven by a static initial query.

use column_filter_core::logging::targets;
use column_filter_core::Signal;

use super::config::FilterConfig;
use super::selection::{AddPolicy, OptionSelection};
use super::{
    kinds, shadows_all_text, ColumnFilter, EffectiveSelection, InitialQuery, DEFAULT_ALL_TEXT,
};

/// Selection state of a single-value column filter.
///
/// # Signals
///
/// - `selection_changed`: Emitted after `populate`, `reset` and every user edit.
pub struct SelectFilter {
    column: String,
    all_text: String,
    initial_query: InitialQuery,
    selection: OptionSelection,
    populated: bool,
    /// Emitted when the effective selection must be recomputed.
    pub selection_changed: Signal<()>,
}

impl SelectFilter {
    /// Creates an empty filter for `column` with the all-pseudo-option selected.
    pub fn new(column: impl Into<String>) -> Self {
        let mut selection = OptionSelection::new();
        selection.select(DEFAULT_ALL_TEXT);
        Self {
            column: column.into(),
            all_text: DEFAULT_ALL_TEXT.to_string(),
            initial_query: InitialQuery::None,
            selection,
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
        let was_all = self.is_all_selected();
        self.all_text = all_text.into();
        if was_all {
            self.selection.replace_selection([self.all_text.as_str()]);
        }
        self
    }

    /// Sets the pre-selection applied by [`populate`](Self::populate).
    pub fn with_initial_query(mut self, query: InitialQuery) -> Self {
        self.initial_query = query;
        self
    }

    /// First load of the column's distinct values.
    ///
    /// A single-value query selects that value. A multi-value query selects
    /// its first value. Without a query the all-pseudo-option stays selected.
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
            AddPolicy::Append,
        );

        match self.initial_query.values().first() {
            Some(value) => {
                let value = value.clone();
                self.selection.replace_selection([value]);
            }
            None => self.select_all_text(),
        }

        self.selection.commit();
        self.populated = true;
        self.notify_change();
    }

    /// Adds newly appearing values as options. The selection is unchanged.
    #[tracing::instrument(skip_all, target = "column_filter::filter", level = "trace", fields(column = %self.column))]
    pub fn update<I>(&mut self, data: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let (all_text, column) = (&self.all_text, &self.column);
        let added = self.selection.add_options(
            data.into_iter()
                .filter(|value| !shadows_all_text(value.as_ref(), all_text, column)),
            AddPolicy::Append,
        );
        tracing::debug!(target: targets::FILTER, column = %self.column, added, "options reconciled");
    }

    /// Selects the all-pseudo-option.
    #[tracing::instrument(skip_all, target = "column_filter::filter", level = "trace", fields(column = %self.column))]
    pub fn reset(&mut self) {
        self.select_all_text();
        self.selection.commit();
        self.notify_change();
    }

    /// The pre-selection applied by [`populate`](Self::populate).
    pub fn initial_query(&self) -> InitialQuery {
        self.initial_query.clone()
    }

    /// Change hook for the renderer.
    ///
    /// The first value that is an option (or the all-pseudo-option) becomes
    /// the selection; with none, the all-pseudo-option is selected.
    #[tracing::instrument(skip_all, target = "column_filter::filter", level = "trace", fields(column = %self.column))]
    pub fn set_user_selection<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let chosen = values.into_iter().find_map(|value| {
            let value = value.as_ref();
            (value == self.all_text || self.selection.contains_option(value))
                .then(|| value.to_owned())
        });

        match chosen {
            Some(value) => self.selection.replace_selection([value]),
            None => {
                tracing::debug!(
                    target: targets::FILTER,
                    column = %self.column,
                    "no known option in user selection, selecting all"
                );
                self.select_all_text();
            }
        }
        self.selection.commit();
        self.notify_change();
    }

    fn select_all_text(&mut self) {
        self.selection.replace_selection([self.all_text.as_str()]);
    }

    fn notify_change(&self) {
        let slots = self.selection_changed.emit(());
        tracing::trace!(target: targets::FILTER, column = %self.column, slots, "selection changed");
    }

    /// The column this filter restricts.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns true once [`populate`](Self::populate) has run.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// The offered options, without the all-pseudo-option.
    pub fn options(&self) -> &[String] {
        self.selection.options()
    }

    /// The selected value, which may be the all-pseudo-option.
    pub fn selected_value(&self) -> Option<String> {
        self.selection.selected().into_iter().next()
    }

    /// Returns true if the all-pseudo-option is selected.
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_selected(&self.all_text)
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

impl ColumnFilter for SelectFilter {
    fn kind(&self) -> &'static str {
        kinds::SELECT
    }

    fn column(&self) -> &str {
        &self.column
    }

    fn populate(&mut self, data: &[String]) {
        SelectFilter::populate(self, data);
    }

    fn update(&mut self, data: &[String]) {
        SelectFilter::update(self, data);
    }

    fn reset(&mut self) {
        SelectFilter::reset(self);
    }

    fn initial_query(&self) -> InitialQuery {
        SelectFilter::initial_query(self)
    }

    fn set_user_selection(&mut self, values: &[String]) {
        SelectFilter::set_user_selection(self, values);
    }

    fn options(&self) -> &[String] {
        self.selection.options()
    }

    fn is_all_selected(&self) -> bool {
        SelectFilter::is_all_selected(self)
    }

    fn selected_values(&self) -> EffectiveSelection {
        SelectFilter::selected_values(self)
    }

    fn selection_changed(&self) -> &Signal<()> {
        &self.selection_changed
    }
}

static_assertions::assert_impl_all!(SelectFilter: Send, Sync);
