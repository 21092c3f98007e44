//! Discrete (classified) colormaps.
//!
//! One solid color per interval between consecutive breaks. The builder appends
//! a synthetic overflow break so the last class has a visible extent.

use serde::Serialize;

use super::colormap::{lut_index, serialize_hex_colors, Colormap, Rgba, TRANSPARENT};
use super::norm::NormValue;

/// Stepped colormap with legend metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscreteColormap {
    pub name: String,
    pub long_name: String,
    pub units: String,
    /// Break positions, overflow break included
    pub positions: Vec<f64>,
    /// One color per break, overflow repeat included
    #[serde(serialize_with = "serialize_hex_colors")]
    pub colors: Vec<Rgba>,
    /// One label per break, `"> last"` included
    pub labels: Vec<String>,
    /// Centers of the intervals, for tick placement
    pub midpositions: Vec<f64>,
    /// Labels at `midpositions`
    pub midlabels: Vec<String>,
}

impl Colormap for DiscreteColormap {
    fn map_normalized(&self, value: f32) -> Rgba {
        if !value.is_finite() || self.colors.is_empty() {
            return TRANSPARENT;
        }
        self.colors[lut_index(value as f64, self.colors.len())]
    }

    fn color_for(&self, value: NormValue) -> Rgba {
        let (Some(first), Some(last)) = (self.colors.first(), self.colors.last()) else {
            return TRANSPARENT;
        };
        match value {
            NormValue::Bin(i) => self.colors.get(i).copied().unwrap_or(*last),
            NormValue::Position(p) => self.map_normalized(p as f32),
            NormValue::Under => *first,
            NormValue::Over => *last,
            NormValue::Masked | NormValue::Invalid => TRANSPARENT,
        }
    }

    fn entry_count(&self) -> usize {
        self.colors.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::norm::{Extend, Norm};

    fn sample() -> DiscreteColormap {
        DiscreteColormap {
            name: "sample".to_string(),
            long_name: "Sample".to_string(),
            units: "mm".to_string(),
            positions: vec![0.0, 10.0, 20.0, 40.0],
            colors: vec![
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
                [0, 0, 255, 255],
            ],
            labels: vec!["0".into(), "10".into(), "20".into(), "> 20".into()],
            midpositions: vec![5.0, 15.0, 30.0],
            midlabels: vec!["0".into(), "10".into(), "20".into()],
        }
    }

    #[test]
    fn test_map_through_boundary_norm() {
        let cmap = sample();
        let norm = Norm::boundary(cmap.positions.clone(), cmap.colors.len(), Extend::Both);

        assert_eq!(cmap.map(3.0, &norm), [255, 0, 0, 255]);
        assert_eq!(cmap.map(10.0, &norm), [0, 255, 0, 255]);
        assert_eq!(cmap.map(25.0, &norm), [0, 0, 255, 255]);
        assert_eq!(cmap.map(100.0, &norm), [0, 0, 255, 255]);
        assert_eq!(cmap.map(-5.0, &norm), [255, 0, 0, 255]);
        assert_eq!(cmap.map(f64::NAN, &norm), TRANSPARENT);
    }

    #[test]
    fn test_unextended_values_are_transparent() {
        let cmap = sample();
        let norm = Norm::boundary(cmap.positions.clone(), cmap.colors.len(), Extend::Neither);
        assert_eq!(cmap.map(-5.0, &norm), TRANSPARENT);
        assert_eq!(cmap.map(100.0, &norm), TRANSPARENT);
    }

    #[test]
    fn test_map_normalized_steps() {
        let cmap = sample();
        assert_eq!(cmap.map_normalized(0.0), [255, 0, 0, 255]);
        assert_eq!(cmap.map_normalized(0.3), [0, 255, 0, 255]);
        assert_eq!(cmap.map_normalized(1.0), [0, 0, 255, 255]);
        assert_eq!(cmap.entry_count(), 4);
        assert_eq!(cmap.name(), "sample");
    }

    #[test]
    fn test_serialize_hex() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["colors"][0], "#ff0000ff");
        assert_eq!(json["midpositions"][2], 30.0);
    }
}
