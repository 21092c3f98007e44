//! Specification records as stored in catalog files.
//!
//! A catalog file maps colormap names to records of the form
//!
//! ```json
//! {
//!   "type": "discrete",
//!   "data": [[0, "#000000", "low"], [10, "#ffffff", "high"]],
//!   "units": "C",
//!   "long_name": "Example"
//! }
//! ```
//!
//! Continuous records also carry `"N"`, the number of lookup table samples.

use colorgrad::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EarthCmapError, Result};

/// Classification strategy of a colormap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColormapKind {
    /// Stepped colors, one solid color per interval
    Discrete,
    /// Colors interpolated between anchors
    Continuous,
}

/// A color as written in a catalog file.
///
/// Strings are CSS colors (`"#1f77b4"`, `"navy"`, `"rgb(0,0,255)"`). Arrays hold
/// 3 or 4 components, read as fractions when every component is at most 1.0 and
/// as 0-255 bytes otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Css(String),
    Components(Vec<f64>),
}

impl ColorSpec {
    /// Resolve the color to RGBA bytes
    pub fn to_rgba(&self) -> std::result::Result<[u8; 4], String> {
        Ok(self.to_color()?.to_rgba8())
    }

    pub(crate) fn to_color(&self) -> std::result::Result<Color, String> {
        match self {
            ColorSpec::Css(s) => s
                .parse::<Color>()
                .map_err(|e| format!("invalid color '{}': {}", s, e)),
            ColorSpec::Components(c) => {
                if c.len() != 3 && c.len() != 4 {
                    return Err(format!(
                        "color arrays need 3 or 4 components, got {}",
                        c.len()
                    ));
                }
                if c.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return Err(format!("invalid color components {:?}", c));
                }

                let fractional = c.iter().all(|v| *v <= 1.0);
                let scale = if fractional { 1.0 } else { 255.0 };
                if c.iter().any(|v| v / scale > 1.0) {
                    return Err(format!("color components out of range {:?}", c));
                }

                let alpha = c.get(3).map_or(1.0, |a| a / scale);
                Ok(Color::new(c[0] / scale, c[1] / scale, c[2] / scale, alpha))
            }
        }
    }
}

/// Labels may be written as strings or bare numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Number(f64),
}

#[derive(Deserialize)]
struct RawEntry(f64, ColorSpec, RawLabel);

/// One `[break_value, color, label]` triple
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEntry")]
pub struct BreakEntry {
    pub value: f64,
    pub color: ColorSpec,
    pub label: String,
}

impl From<RawEntry> for BreakEntry {
    fn from(raw: RawEntry) -> Self {
        let label = match raw.2 {
            RawLabel::Text(s) => s,
            RawLabel::Number(n) => n.to_string(),
        };
        Self {
            value: raw.0,
            color: raw.1,
            label,
        }
    }
}

/// A colormap definition as read from the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColormapSpec {
    #[serde(rename = "type")]
    pub kind: ColormapKind,
    pub data: Vec<BreakEntry>,
    pub units: String,
    #[serde(default)]
    pub long_name: String,
    /// Lookup table size for continuous colormaps
    #[serde(rename = "N", default)]
    pub resolution: Option<usize>,
}

impl ColormapSpec {
    /// Deserialize and validate the record stored under `name`
    pub fn from_value(name: &str, value: Value) -> Result<Self> {
        let spec: ColormapSpec = serde_json::from_value(value)
            .map_err(|e| EarthCmapError::malformed(name, e.to_string()))?;
        spec.validate(name)?;
        Ok(spec)
    }

    /// Check the invariants the builder relies on
    pub fn validate(&self, name: &str) -> Result<()> {
        let required = match self.kind {
            ColormapKind::Discrete => 1,
            ColormapKind::Continuous => 2,
        };
        if self.data.len() < required {
            return Err(EarthCmapError::malformed(
                name,
                format!(
                    "{:?} colormaps need at least {} break(s), found {}",
                    self.kind,
                    required,
                    self.data.len()
                ),
            ));
        }

        if let Some(entry) = self.data.iter().find(|e| !e.value.is_finite()) {
            return Err(EarthCmapError::malformed(
                name,
                format!("break value {} is not finite", entry.value),
            ));
        }

        if let Some(pair) = self.data.windows(2).find(|w| w[0].value >= w[1].value) {
            return Err(EarthCmapError::malformed(
                name,
                format!(
                    "break values must be strictly ascending ({} then {})",
                    pair[0].value, pair[1].value
                ),
            ));
        }

        if self.kind == ColormapKind::Continuous {
            match self.resolution {
                Some(n) if n > 0 => {}
                Some(_) => {
                    return Err(EarthCmapError::malformed(name, "N must be positive"));
                }
                None => {
                    return Err(EarthCmapError::malformed(
                        name,
                        "continuous colormaps require N",
                    ));
                }
            }
        }

        for entry in &self.data {
            entry
                .color
                .to_color()
                .map_err(|message| EarthCmapError::malformed(name, message))?;
        }

        Ok(())
    }

    /// Break values in ascending order
    pub fn break_values(&self) -> Vec<f64> {
        self.data.iter().map(|e| e.value).collect()
    }

    pub fn colors(&self) -> Vec<ColorSpec> {
        self.data.iter().map(|e| e.color.clone()).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.data.iter().map(|e| e.label.clone()).collect()
    }
}
