//! Continuous (interpolated) colormaps.

use colorgrad::{BlendMode, Color, CustomGradient};
use serde::Serialize;

use super::colormap::{lut_index, serialize_hex_colors, Colormap, Rgba, TRANSPARENT};
use super::norm::NormValue;
use crate::error::{EarthCmapError, Result};

/// Interpolated colormap sampled into a lookup table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousColormap {
    pub name: String,
    pub long_name: String,
    pub units: String,
    /// Break values in data units
    pub positions: Vec<f64>,
    /// Break values rescaled to [0, 1], rounded to two decimals
    pub normalized_positions: Vec<f64>,
    /// Anchor color of each break
    #[serde(serialize_with = "serialize_hex_colors")]
    pub colors: Vec<Rgba>,
    pub labels: Vec<String>,
    /// Number of lookup table entries
    pub resolution: usize,
    #[serde(skip)]
    lut: Vec<Rgba>,
}

impl ContinuousColormap {
    /// Interpolate `colors` anchored at `normalized_positions` (RGB blending) and
    /// sample `resolution` evenly spaced entries.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        long_name: String,
        units: String,
        positions: Vec<f64>,
        normalized_positions: Vec<f64>,
        colors: &[Color],
        labels: Vec<String>,
        resolution: usize,
    ) -> Result<Self> {
        if resolution == 0 {
            return Err(EarthCmapError::InvalidParameter {
                param: "resolution".to_string(),
                message: "Resolution must be positive".to_string(),
            });
        }

        let gradient = CustomGradient::new()
            .colors(colors)
            .domain(&normalized_positions)
            .mode(BlendMode::Rgb)
            .build()
            .map_err(|e| EarthCmapError::Gradient {
                message: format!("{}: {}", name, e),
            })?;

        let lut = gradient
            .colors(resolution)
            .iter()
            .map(|c| c.to_rgba8())
            .collect();

        Ok(Self {
            name,
            long_name,
            units,
            positions,
            normalized_positions,
            colors: colors.iter().map(|c| c.to_rgba8()).collect(),
            labels,
            resolution,
            lut,
        })
    }

    /// The sampled lookup table
    pub fn lookup_table(&self) -> &[Rgba] {
        &self.lut
    }
}

impl Colormap for ContinuousColormap {
    fn map_normalized(&self, value: f32) -> Rgba {
        if !value.is_finite() || self.lut.is_empty() {
            return TRANSPARENT;
        }
        self.lut[lut_index(value as f64, self.lut.len())]
    }

    fn color_for(&self, value: NormValue) -> Rgba {
        let (Some(first), Some(last)) = (self.lut.first(), self.lut.last()) else {
            return TRANSPARENT;
        };
        match value {
            NormValue::Position(p) => self.lut[lut_index(p, self.lut.len())],
            NormValue::Bin(i) => self.lut.get(i).copied().unwrap_or(*last),
            NormValue::Under => *first,
            NormValue::Over => *last,
            NormValue::Masked | NormValue::Invalid => TRANSPARENT,
        }
    }

    fn entry_count(&self) -> usize {
        self.lut.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
