//! Declarative filter configuration.
//!
//! Filters for a table can be described in TOML or JSON and built through
//! the [`FilterRegistry`]:
//!
//! ```
//! use column_filter::filter::{FilterRegistry, FilterSetConfig};
//!
//! let config = FilterSetConfig::from_toml_str(r#"
//! [[filters]]
//! column = "status"
//! kind = "multiselect"
//!
//! [[filters]]
//! column = "owner"
//! kind = "select"
//! initial_query = "alice"
//! "#)?;
//!
//! let filters = config.build_all(&FilterRegistry::with_builtin_kinds())?;
//! assert_eq!(filters.len(), 2);
//! # Ok::<(), column_filter::FilterError>(())
//! ```

use column_filter_core::logging::targets;
use column_filter_core::{FilterError, Result};
use serde::{Deserialize, Serialize};

use super::registry::FilterRegistry;
use super::{ColumnFilter, InitialQuery, DEFAULT_ALL_TEXT};

fn default_all_text() -> String {
    DEFAULT_ALL_TEXT.to_string()
}

/// Configuration of a single column filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Column the filter restricts.
    pub column: String,

    /// Registry key of the filter kind.
    pub kind: String,

    /// Text of the all-pseudo-option.
    #[serde(default = "default_all_text")]
    pub all_text: String,

    /// Pre-selection applied on first population.
    #[serde(default, skip_serializing_if = "InitialQuery::is_none")]
    pub initial_query: InitialQuery,
}

impl FilterConfig {
    /// Creates a configuration with the default all-pseudo-option and no
    /// initial query.
    pub fn new(column: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: kind.into(),
            all_text: default_all_text(),
            initial_query: InitialQuery::None,
        }
    }

    /// Sets the text of the all-pseudo-option.
    pub fn with_all_text(mut self, all_text: impl Into<String>) -> Self {
        self.all_text = all_text.into();
        self
    }

    /// Sets the initial query.
    pub fn with_initial_query(mut self, query: InitialQuery) -> Self {
        self.initial_query = query;
        self
    }

    /// Parses a single filter configuration from TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|err| config_error("TOML", err))
    }

    /// Parses a single filter configuration from JSON.
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|err| config_error("JSON", err))
    }
}

/// Configuration of all filters of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSetConfig {
    /// The filters, in display order.
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

impl FilterSetConfig {
    /// Parses a filter set from TOML (a `[[filters]]` array of tables).
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|err| config_error("TOML", err))
    }

    /// Parses a filter set from JSON (`{"filters": [...]}`).
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|err| config_error("JSON", err))
    }

    /// Serializes the filter set to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| config_error("TOML", err))
    }

    /// Builds every configured filter.
    ///
    /// Fails on the first filter whose kind is not registered.
    pub fn build_all(&self, registry: &FilterRegistry) -> Result<Vec<Box<dyn ColumnFilter>>> {
        self.filters
            .iter()
            .map(|config| registry.build(config))
            .collect()
    }
}

fn config_error(format: &str, err: impl std::fmt::Display) -> FilterError {
    tracing::debug!(target: targets::CONFIG, format, error = %err, "failed to decode filter configuration");
    FilterError::config(format!("{format}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::from_toml_str(
            r#"
            column = "status"
            kind = "multiselect"
            "#,
        )
        .unwrap();

        assert_eq!(config, FilterConfig::new("status", "multiselect"));
        assert_eq!(config.all_text, DEFAULT_ALL_TEXT);
        assert!(config.initial_query.is_none());
    }

    #[test]
    fn test_initial_query_forms() {
        let single = FilterConfig::from_json_str(
            r#"{"column": "c", "kind": "select", "initial_query": "b"}"#,
        )
        .unwrap();
        assert_eq!(single.initial_query, InitialQuery::Single("b".to_string()));

        let many = FilterConfig::from_toml_str(
            r#"
            column = "c"
            kind = "multiselect"
            initial_query = ["a", "c"]
            "#,
        )
        .unwrap();
        assert_eq!(many.initial_query, InitialQuery::from_values(["a", "c"]));

        let empty = FilterConfig::from_json_str(
            r#"{"column": "c", "kind": "select", "initial_query": ""}"#,
        )
        .unwrap();
        assert!(empty.initial_query.is_none());
    }

    #[test]
    fn test_missing_column_is_config_error() {
        let err = FilterConfig::from_json_str(r#"{"kind": "select"}"#).unwrap_err();
        assert!(matches!(err, FilterError::Config { .. }));
    }

    #[test]
    fn test_filter_set_toml_round_trip() {
        let set = FilterSetConfig {
            filters: vec![
                FilterConfig::new("a", "multiselect").with_all_text("Everything"),
                FilterConfig::new("b", "select").with_initial_query(InitialQuery::from_text("x")),
            ],
        };

        let text = set.to_toml_string().unwrap();
        assert_eq!(FilterSetConfig::from_toml_str(&text).unwrap(), set);
    }

    #[test]
    fn test_build_all_unknown_kind() {
        let set = FilterSetConfig {
            filters: vec![FilterConfig::new("a", "slider")],
        };
        let err = set
            .build_all(&FilterRegistry::with_builtin_kinds())
            .err()
            .unwrap();
        assert_eq!(err, FilterError::unknown_kind("slider"));
    }
}
