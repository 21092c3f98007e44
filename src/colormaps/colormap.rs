//! Colormap trait and utilities.
//!
//! This module defines the common interface for built colormaps.

use serde::ser::{SerializeSeq, Serializer};

use super::norm::{Norm, NormValue};

/// RGBA color with 8 bits per channel
pub type Rgba = [u8; 4];

/// Color used for masked and invalid values
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a position (0.0 to 1.0) along the lookup table to an RGBA color
    fn map_normalized(&self, value: f32) -> Rgba;

    /// Color for the output of a [`Norm`]
    fn color_for(&self, value: NormValue) -> Rgba;

    /// Map a raw data value to an RGBA color through `norm`
    fn map(&self, value: f64, norm: &Norm) -> Rgba {
        self.color_for(norm.apply(value))
    }

    /// Number of entries in the lookup table
    fn entry_count(&self) -> usize;

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Index of the lookup table entry covering `position`, matplotlib style
pub(crate) fn lut_index(position: f64, len: usize) -> usize {
    if len == 0 || position <= 0.0 {
        return 0;
    }
    ((position * len as f64).floor() as usize).min(len - 1)
}

/// Format a color as `#rrggbbaa`
pub fn to_hex(color: &Rgba) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        color[0], color[1], color[2], color[3]
    )
}

pub(crate) fn serialize_hex_colors<S: Serializer>(
    colors: &[Rgba],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(colors.len()))?;
    for color in colors {
        seq.serialize_element(&to_hex(color))?;
    }
    seq.end()
}
