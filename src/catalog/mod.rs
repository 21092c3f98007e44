//! Colormap catalog: definition files, name resolution and listing.
//!
//! Two resolvers share the same semantics (sources scanned in category order,
//! first match wins):
//!
//! - [`CatalogStore`] re-reads the definition files on every call.
//! - [`CatalogIndex`] parses them once into an immutable name index; a
//!   process-wide instance can be installed with [`init_global`].

pub mod index;
pub mod spec;
pub mod store;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EarthCmapError, Result};

pub use index::{global, init_global, CatalogIndex};
pub use spec::{BreakEntry, ColorSpec, ColormapKind, ColormapSpec};
pub use store::{default_catalog_dir, CatalogSource, CatalogStore};

/// Colormap names keyed by category
pub type NamesByCategory = BTreeMap<String, Vec<String>>;

/// Reserved category name meaning every category
pub const ALL_CATEGORIES: &str = "all";

/// Category listed when none is given
pub const DEFAULT_CATEGORY: &str = "earthobs";

/// Anything that can turn a colormap name into its specification record
pub trait SpecResolver {
    /// Find the record for `name`, failing with `NotFound` when absent
    fn resolve(&self, name: &str) -> Result<ColormapSpec>;
}

impl<T: SpecResolver + ?Sized> SpecResolver for &T {
    fn resolve(&self, name: &str) -> Result<ColormapSpec> {
        (**self).resolve(name)
    }
}

/// Category selection for listing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::Named(DEFAULT_CATEGORY.to_string())
    }
}

impl FromStr for CategoryFilter {
    type Err = EarthCmapError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EarthCmapError::InvalidParameter {
                param: "category".to_string(),
                message: "Category cannot be empty".to_string(),
            });
        }
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Named(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "ocean".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Named("ocean".to_string())
        );
        assert!("  ".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_category_filter_default_and_matches() {
        let filter = CategoryFilter::default();
        assert_eq!(filter.to_string(), "earthobs");
        assert!(filter.matches("earthobs"));
        assert!(!filter.matches("ocean"));
        assert!(CategoryFilter::All.matches("ocean"));
    }
}
