//! Configuration management for earthcmap.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{default_catalog_dir, CategoryFilter, ALL_CATEGORIES, DEFAULT_CATEGORY};
use crate::colormaps::Extend;
use crate::error::{EarthCmapError, Result};

/// Command-line arguments for earthcmap
#[derive(Parser, Debug)]
#[command(name = "earthcmap")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the catalog definition files
    #[arg(long, env = "EARTHCMAP_CMAPS_DIR", global = true)]
    pub cmaps_dir: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "EARTHCMAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "EARTHCMAP_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the earthcmap tool
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the catalog categories
    Categories,

    /// List colormap names grouped by category
    List {
        /// Category to list, or "all"
        #[arg(short = 'C', long)]
        category: Option<CategoryFilter>,
    },

    /// Build a colormap and print it as JSON
    Show {
        /// Colormap name
        name: String,

        /// Express break values in these units
        #[arg(short, long)]
        units: Option<String>,

        /// Out-of-range handling (neither, min, max, both)
        #[arg(short, long, default_value = "both")]
        extend: Extend,
    },

    /// Convert values between units
    Convert {
        /// Source units
        #[arg(long)]
        from: String,

        /// Target units
        #[arg(long)]
        to: String,

        /// Values to convert
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Render a colorbar strip to a PNG file
    Preview {
        /// Colormap name
        name: String,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Express break values in these units
        #[arg(short, long)]
        units: Option<String>,

        /// Strip width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Strip height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog directory (None = bundled catalog)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Category listed when none is requested
    #[serde(default = "default_category")]
    pub default_category: String,
}

/// Preview rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Colorbar width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Colorbar height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Render configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        Self::from_args(Args::parse())
    }

    /// Layer parsed arguments over the config file and defaults
    pub fn from_args(args: Args) -> Result<(Self, Command)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments (clap already folded in env vars)
        if args.cmaps_dir.is_some() {
            config.catalog.dir = args.cmaps_dir;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.command))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.catalog.dir.is_some() {
            self.catalog.dir = other.catalog.dir;
        }
        self.catalog.default_category = other.catalog.default_category;
        self.render = other.render;
        self.log_level = other.log_level;
    }

    /// Catalog directory to read from
    pub fn catalog_dir(&self) -> PathBuf {
        self.catalog.dir.clone().unwrap_or_else(default_catalog_dir)
    }

    /// Category filter used when the caller gives none
    pub fn default_category_filter(&self) -> CategoryFilter {
        CategoryFilter::Named(self.catalog.default_category.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let category = self.catalog.default_category.trim();
        if category.is_empty() {
            return Err(EarthCmapError::Config {
                message: "Default category cannot be empty".to_string(),
            });
        }
        if category == ALL_CATEGORIES {
            return Err(EarthCmapError::Config {
                message: format!(
                    "'{}' is reserved and cannot be the default category",
                    ALL_CATEGORIES
                ),
            });
        }

        if self.render.width == 0 || self.render.height == 0 {
            return Err(EarthCmapError::Config {
                message: "Render width and height must be positive".to_string(),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(EarthCmapError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            render: RenderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            default_category: default_category(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

// Default value functions for serde
fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_width() -> u32 {
    512
}

fn default_height() -> u32 {
    32
}

fn default_log_level() -> String {
    "warn".to_string()
}
