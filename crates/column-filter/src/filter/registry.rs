//! Filter-builder registry.
//!
//! Generic table machinery instantiates filters by symbolic kind key
//! (`"multiselect"`, `"select"`, ...) without knowing their concrete types.
//!
//! There is one process-wide registry. It is populated during initialization,
//! either with the built-in kinds ([`init_filter_registry`]) or with a custom
//! table ([`install_filter_registry`]), and is read-only afterwards.
//!
//! ```
//! use column_filter::filter::{init_filter_registry, FilterConfig};
//!
//! let registry = init_filter_registry();
//! let filter = registry.build(&FilterConfig::new("status", "multiselect"))?;
//! assert_eq!(filter.kind(), "multiselect");
//! # Ok::<(), column_filter::FilterError>(())
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use column_filter_core::logging::targets;
use column_filter_core::{FilterError, Result};

use super::config::FilterConfig;
use super::{kinds, ColumnFilter, MultiSelectFilter, SelectFilter};

/// Builds a filter from its configuration.
pub type FilterBuilder = fn(&FilterConfig) -> Box<dyn ColumnFilter>;

/// Map from filter kind key to builder.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    builders: HashMap<String, FilterBuilder>,
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in filter kinds.
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.builders.insert(kinds::MULTISELECT.to_string(), build_multiselect);
        registry.builders.insert(kinds::SELECT.to_string(), build_select);
        registry
    }

    /// Registers a builder under `kind`.
    ///
    /// Returns an error if the kind is already registered.
    pub fn register(&mut self, kind: impl Into<String>, builder: FilterBuilder) -> Result<()> {
        let kind = kind.into();
        if self.builders.contains_key(&kind) {
            return Err(FilterError::duplicate_kind(kind));
        }
        tracing::debug!(target: targets::REGISTRY, kind = %kind, "registered filter kind");
        self.builders.insert(kind, builder);
        Ok(())
    }

    /// Returns true if a builder is registered under `kind`.
    pub fn contains(&self, kind: &str) -> bool {
        self.builders.contains_key(kind)
    }

    /// The registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Builds the filter described by `config`.
    pub fn build(&self, config: &FilterConfig) -> Result<Box<dyn ColumnFilter>> {
        let builder = self
            .builders
            .get(&config.kind)
            .ok_or_else(|| FilterError::unknown_kind(&config.kind))?;
        tracing::trace!(
            target: targets::REGISTRY,
            kind = %config.kind,
            column = %config.column,
            "building filter"
        );
        Ok(builder(config))
    }
}

fn build_multiselect(config: &FilterConfig) -> Box<dyn ColumnFilter> {
    Box::new(MultiSelectFilter::from_config(config))
}

fn build_select(config: &FilterConfig) -> Box<dyn ColumnFilter> {
    Box::new(SelectFilter::from_config(config))
}

// ============================================================================
// Global Registry
// ============================================================================

static GLOBAL_FILTER_REGISTRY: OnceLock<FilterRegistry> = OnceLock::new();

/// Initialize the global registry with the built-in kinds.
///
/// Idempotent: if a registry is already installed it is returned unchanged.
pub fn init_filter_registry() -> &'static FilterRegistry {
    GLOBAL_FILTER_REGISTRY.get_or_init(|| {
        tracing::debug!(target: targets::REGISTRY, "initializing built-in filter registry");
        FilterRegistry::with_builtin_kinds()
    })
}

/// Install a custom registry as the global one.
///
/// Returns an error if a registry is already installed.
pub fn install_filter_registry(registry: FilterRegistry) -> Result<&'static FilterRegistry> {
    GLOBAL_FILTER_REGISTRY
        .set(registry)
        .map_err(|_| FilterError::RegistryAlreadyInitialized)?;
    filter_registry()
}

/// Get the global registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn filter_registry() -> Result<&'static FilterRegistry> {
    GLOBAL_FILTER_REGISTRY
        .get()
        .ok_or(FilterError::RegistryNotInitialized)
}
