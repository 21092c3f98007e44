//! Catalog store backed by a directory of JSON definition files.
//!
//! Each `<category>.json` file maps colormap names to specification records.
//! The store keeps no state besides its directory: every call re-reads the
//! files it needs, so edits on disk are always visible. Use
//! [`CatalogIndex`](super::CatalogIndex) when the catalog should be parsed once.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::spec::ColormapSpec;
use super::{CategoryFilter, NamesByCategory, SpecResolver, ALL_CATEGORIES};
use crate::error::{EarthCmapError, Result};

/// Name of the catalog directory shipped with the crate
pub const DEFAULT_CATALOG_DIR: &str = "cmaps";

/// Environment variable overriding the catalog directory
pub const CATALOG_DIR_ENV: &str = "EARTHCMAP_CMAPS_DIR";

/// One definition file of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    /// Category name (file stem)
    pub id: String,
    /// Path of the JSON file
    pub path: PathBuf,
}

impl CatalogSource {
    /// Read and parse the whole file as a name -> record object
    pub fn read(&self) -> Result<Map<String, Value>> {
        debug!(category = %self.id, path = %self.path.display(), "Reading catalog source");

        let content = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content).map_err(|e| EarthCmapError::Catalog {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(EarthCmapError::Catalog {
                path: self.path.clone(),
                message: "expected a JSON object mapping names to colormaps".to_string(),
            }),
        }
    }

    /// Names defined by this source, in file order
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }
}

/// Directory of catalog definition files
#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    /// Create a store reading from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The catalog shipped with the crate, unless `EARTHCMAP_CMAPS_DIR` points elsewhere
    pub fn open_default() -> Self {
        Self::new(default_catalog_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Enumerate the definition files, ordered by category id
    pub fn list_definition_sources(&self) -> Result<Vec<CatalogSource>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            EarthCmapError::Io(std::io::Error::new(
                e.kind(),
                format!("Cannot read catalog directory {}: {}", self.dir.display(), e),
            ))
        })?;

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                debug!(path = %path.display(), "Skipping catalog file with a non UTF-8 name");
                continue;
            };
            if id == ALL_CATEGORIES {
                warn!(
                    path = %path.display(),
                    "Skipping catalog file named after the reserved category '{}'",
                    ALL_CATEGORIES
                );
                continue;
            }
            sources.push(CatalogSource {
                id: id.to_string(),
                path: path.clone(),
            });
        }

        sources.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sources)
    }

    /// Category ids, one per definition file
    pub fn list_categories(&self) -> Result<Vec<String>> {
        Ok(self
            .list_definition_sources()?
            .into_iter()
            .map(|s| s.id)
            .collect())
    }

    /// Every colormap name grouped by category
    pub fn list_names(&self) -> Result<NamesByCategory> {
        self.list_names_by_category(&CategoryFilter::All)
    }

    /// Colormap names of one category, or of all of them.
    ///
    /// An unknown category yields an empty map.
    pub fn list_names_by_category(&self, filter: &CategoryFilter) -> Result<NamesByCategory> {
        let mut names = BTreeMap::new();
        for source in self.list_definition_sources()? {
            if filter.matches(&source.id) {
                names.insert(source.id.clone(), source.names()?);
            }
        }
        Ok(names)
    }
}

impl SpecResolver for CatalogStore {
    fn resolve(&self, name: &str) -> Result<ColormapSpec> {
        for source in self.list_definition_sources()? {
            let mut records = source.read()?;
            if let Some(value) = records.remove(name) {
                debug!(name = name, category = %source.id, "Resolved colormap");
                return ColormapSpec::from_value(name, value);
            }
        }

        Err(EarthCmapError::NotFound {
            name: name.to_string(),
        })
    }
}

/// Catalog directory: `EARTHCMAP_CMAPS_DIR` if set, else `cmaps/` beside the crate
pub fn default_catalog_dir() -> PathBuf {
    match std::env::var(CATALOG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CATALOG_DIR),
    }
}
