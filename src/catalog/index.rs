//! In-memory catalog index.
//!
//! The index reads every definition file once and answers lookups from
//! memory. It does not notice later edits to the files.

use once_cell::sync::OnceCell;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use super::spec::ColormapSpec;
use super::store::CatalogStore;
use super::{CategoryFilter, NamesByCategory, SpecResolver};
use crate::error::{EarthCmapError, Result};
use crate::logging::log_catalog_load_stats;

static GLOBAL_CATALOG: OnceCell<CatalogIndex> = OnceCell::new();

#[derive(Debug, Clone)]
struct IndexedRecord {
    category: String,
    value: Value,
}

/// Immutable catalog loaded once from a [`CatalogStore`]
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    dir: PathBuf,
    records: HashMap<String, IndexedRecord>,
    names: NamesByCategory,
}

impl CatalogIndex {
    /// Parse every source of `store`.
    ///
    /// Records are validated when resolved, not here.
    pub fn load(store: &CatalogStore) -> Result<Self> {
        let start = Instant::now();
        let mut records: HashMap<String, IndexedRecord> = HashMap::new();
        let mut names = NamesByCategory::new();

        for source in store.list_definition_sources()? {
            let map = source.read()?;
            let mut category_names = Vec::with_capacity(map.len());

            for (name, value) in map {
                category_names.push(name.clone());
                if let Some(existing) = records.get(&name) {
                    debug!(
                        name = %name,
                        kept = %existing.category,
                        shadowed = %source.id,
                        "Duplicate colormap name, keeping first source"
                    );
                    continue;
                }
                records.insert(
                    name,
                    IndexedRecord {
                        category: source.id.clone(),
                        value,
                    },
                );
            }

            names.insert(source.id, category_names);
        }

        let index = Self {
            dir: store.dir().to_path_buf(),
            records,
            names,
        };
        log_catalog_load_stats(
            &index.dir.display().to_string(),
            index.names.len(),
            index.records.len(),
            start.elapsed(),
        );
        Ok(index)
    }

    /// Directory the index was loaded from
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Number of distinct colormap names
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Category that provides `name`
    pub fn category_of(&self, name: &str) -> Option<&str> {
        self.records.get(name).map(|r| r.category.as_str())
    }

    pub fn list_categories(&self) -> Vec<String> {
        self.names.keys().cloned().collect()
    }

    pub fn list_names(&self) -> NamesByCategory {
        self.names.clone()
    }

    /// Colormap names of one category, or of all of them
    pub fn list_names_by_category(&self, filter: &CategoryFilter) -> NamesByCategory {
        self.names
            .iter()
            .filter(|(category, _)| filter.matches(category))
            .map(|(category, names)| (category.clone(), names.clone()))
            .collect()
    }
}

impl SpecResolver for CatalogIndex {
    fn resolve(&self, name: &str) -> Result<ColormapSpec> {
        let record = self
            .records
            .get(name)
            .ok_or_else(|| EarthCmapError::NotFound {
                name: name.to_string(),
            })?;
        ColormapSpec::from_value(name, record.value.clone())
    }
}

/// Load the catalog in `dir` and install it as the process-wide index.
///
/// Fails if a global index was already installed.
pub fn init_global(dir: impl Into<PathBuf>) -> Result<&'static CatalogIndex> {
    let index = CatalogIndex::load(&CatalogStore::new(dir))?;
    GLOBAL_CATALOG.set(index).map_err(|_| EarthCmapError::Config {
        message: "Global catalog is already initialized".to_string(),
    })?;
    info!("Global catalog initialized");
    global()
}

/// The process-wide index installed by [`init_global`]
pub fn global() -> Result<&'static CatalogIndex> {
    GLOBAL_CATALOG.get().ok_or_else(|| EarthCmapError::Config {
        message: "Global catalog is not initialized; call init_global first".to_string(),
    })
}
