//! Option and selection storage for filter widgets.
//!
//! [`OptionSelection`] is the explicit state behind a selection control: the
//! ordered list of offered options, the subset currently selected, and the
//! selection saved at the last commit.
//!
//! # Example
//!
//! ```
//! use column_filter::filter::{AddPolicy, OptionSelection};
//!
//! let mut selection = OptionSelection::new();
//! selection.add_options(["a", "b", "a"], AddPolicy::Select);
//! assert_eq!(selection.options(), &["a".to_string(), "b".to_string()]);
//!
//! selection.deselect("b");
//! assert_eq!(selection.not_selected(), vec!["b"]);
//! ```

use std::collections::HashSet;

/// How [`OptionSelection::add_options`] treats the selection state of the
/// values it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPolicy {
    /// Every given value ends up selected, known or new.
    #[default]
    Select,
    /// New values are selected; known values keep their state.
    Refresh,
    /// New values are added unselected; known values keep their state.
    Append,
}

/// Ordered options plus the selected subset.
///
/// Options are never removed: values that disappear from the data stay
/// offered with their selection state untouched. The selected set may hold
/// values that are not options (a pre-selection naming a value absent from the
/// data, or the all-pseudo-option).
#[derive(Debug, Clone, Default)]
pub struct OptionSelection {
    /// Options in first-appearance order.
    options: Vec<String>,

    /// Membership index over `options`.
    option_index: HashSet<String>,

    /// Currently selected values.
    selected: HashSet<String>,

    /// Selection at the last commit.
    saved: Vec<String>,
}

impl OptionSelection {
    /// Creates an empty option list with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// The offered options, in first-appearance order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns true if `value` is an offered option.
    pub fn contains_option(&self, value: &str) -> bool {
        self.option_index.contains(value)
    }

    /// Returns the number of offered options.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Adds the values of `data` that are not yet offered, applying `policy`
    /// to the selection state. Duplicates are ignored.
    ///
    /// Returns the number of options added.
    pub fn add_options<I>(&mut self, data: I, policy: AddPolicy) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut added = 0;
        for value in data {
            let value = value.as_ref();
            let is_new = self.insert_option(value);
            if is_new {
                added += 1;
            }

            match policy {
                AddPolicy::Select => {
                    self.select(value);
                }
                AddPolicy::Refresh if is_new => {
                    self.select(value);
                }
                AddPolicy::Refresh | AddPolicy::Append => {}
            }
        }
        added
    }

    fn insert_option(&mut self, value: &str) -> bool {
        if self.option_index.contains(value) {
            return false;
        }
        self.option_index.insert(value.to_owned());
        self.options.push(value.to_owned());
        true
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// Checks if a value is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Returns the number of selected values.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// The selected set.
    pub fn selected_set(&self) -> &HashSet<String> {
        &self.selected
    }

    /// The selected values: selected options in option order, then selected
    /// values that are not options, sorted.
    pub fn selected(&self) -> Vec<String> {
        let mut values: Vec<String> = self
            .options
            .iter()
            .filter(|option| self.selected.contains(*option))
            .cloned()
            .collect();

        let mut extras: Vec<String> = self
            .selected
            .iter()
            .filter(|value| !self.option_index.contains(*value))
            .cloned()
            .collect();
        extras.sort_unstable();

        values.extend(extras);
        values
    }

    /// Options that are offered but not selected, in option order.
    pub fn not_selected(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| !self.selected.contains(*option))
            .map(String::as_str)
            .collect()
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Selects a value, whether or not it is an offered option.
    ///
    /// Returns true if the value was not selected before.
    pub fn select(&mut self, value: impl AsRef<str>) -> bool {
        self.selected.insert(value.as_ref().to_owned())
    }

    /// Deselects a value. Returns true if it was selected.
    pub fn deselect(&mut self, value: &str) -> bool {
        self.selected.remove(value)
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selects exactly the offered options.
    ///
    /// Selected values that are not options are dropped.
    pub fn select_all_options(&mut self) {
        self.selected = self.option_index.clone();
    }

    /// Replaces the selection with `values`.
    pub fn replace_selection<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.selected = values
            .into_iter()
            .map(|value| value.as_ref().to_owned())
            .collect();
    }

    // =========================================================================
    // Saved Selection
    // =========================================================================

    /// Saves the current selection as the baseline.
    pub fn commit(&mut self) {
        self.saved = self.selected();
    }

    /// The selection saved by the last [`commit`](Self::commit).
    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    /// Checks if a value was selected at the last commit.
    pub fn saved_contains(&self, value: &str) -> bool {
        self.saved.iter().any(|saved| saved == value)
    }
}
