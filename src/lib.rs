//! # earthcmap
//!
//! Named colormaps for earth-science visualization.
//!
//! A catalog of JSON definition files maps colormap names (`cira_ir108`,
//! `ndvi_msg`, `chirps`, ...) to break values, colors and labels. This library
//! resolves a name, optionally converts the break values to other physical
//! units, and builds a color lookup table together with the norm that maps
//! raw data values onto it.
//!
//! ## Key Features
//!
//! - **Discrete colormaps**: one solid color per class, with a boundary norm
//!   and tick midpoints for legends
//! - **Continuous colormaps**: RGB interpolation sampled to a fixed resolution,
//!   with a linear norm
//! - **Unit conversion**: Celsius, Kelvin, blackbody irradiance, inches,
//!   millimeters, m/s and knots
//! - **Catalog listing**: by category or across the whole catalog
//!
//! ## Example
//!
//! ```no_run
//! use earthcmap::{build, BuildOptions, CatalogStore, Colormap};
//!
//! let store = CatalogStore::open_default();
//! let (cmap, norm) = build(&store, "cira_ir108", &BuildOptions::with_units("K"))?;
//! let rgba = cmap.map(250.0, &norm);
//! # let _ = rgba;
//! # Ok::<(), earthcmap::EarthCmapError>(())
//! ```

pub mod catalog;
pub mod colormaps;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod units;

pub use catalog::{
    CatalogIndex, CatalogSource, CatalogStore, CategoryFilter, ColormapKind, ColormapSpec,
    NamesByCategory, SpecResolver,
};
pub use colormaps::{
    build, build_from_spec, build_global, BuildOptions, BuiltColormap, Colormap,
    ContinuousColormap, DiscreteColormap, Extend, Norm, NormValue,
};
pub use config::Config;
pub use error::{EarthCmapError, Result};
pub use logging::{
    generate_operation_id, init_tracing, log_catalog_load_stats, log_error, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use units::{convert_units, Unit};
