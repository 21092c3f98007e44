//! Colormap construction for image generation.
//!
//! Catalog records become either a [`DiscreteColormap`] with a boundary norm or
//! a [`ContinuousColormap`] with a linear norm.

pub mod builder;
pub mod colormap;
pub mod continuous;
pub mod discrete;
pub mod norm;

pub use builder::{build, build_from_spec, build_global, BuildOptions, BuiltColormap};
pub use colormap::{to_hex, Colormap, Rgba, TRANSPARENT};
pub use continuous::ContinuousColormap;
pub use discrete::DiscreteColormap;
pub use norm::{Extend, Norm, NormValue};
