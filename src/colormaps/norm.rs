//! Value normalization for built colormaps.
//!
//! A [`Norm`] maps raw data values to the input domain of a colormap: a bin
//! index for discrete colormaps, a position in [0, 1] for continuous ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EarthCmapError, Result};

/// Which out-of-range values are painted with the end colors.
///
/// Values beyond a side that is not extended are masked (transparent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extend {
    Neither,
    Min,
    Max,
    #[default]
    Both,
}

impl Extend {
    pub fn extends_min(&self) -> bool {
        matches!(self, Extend::Min | Extend::Both)
    }

    pub fn extends_max(&self) -> bool {
        matches!(self, Extend::Max | Extend::Both)
    }
}

impl FromStr for Extend {
    type Err = EarthCmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "neither" => Ok(Extend::Neither),
            "min" => Ok(Extend::Min),
            "max" => Ok(Extend::Max),
            "both" => Ok(Extend::Both),
            other => Err(EarthCmapError::InvalidParameter {
                param: "extend".to_string(),
                message: format!(
                    "Unknown extend mode: {}. Must be one of: neither, min, max, both",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for Extend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Extend::Neither => "neither",
            Extend::Min => "min",
            Extend::Max => "max",
            Extend::Both => "both",
        };
        f.write_str(s)
    }
}

/// Result of normalizing one data value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormValue {
    /// Interval index of a boundary norm
    Bin(usize),
    /// Position in [0, 1] of a linear norm
    Position(f64),
    /// Below the range, extended
    Under,
    /// Above the range, extended
    Over,
    /// Out of range on a side that is not extended
    Masked,
    /// NaN
    Invalid,
}

/// Value-to-colormap-domain mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Norm {
    /// Buckets values into the intervals `[b[i], b[i + 1])`
    Boundary {
        boundaries: Vec<f64>,
        ncolors: usize,
        extend: Extend,
    },
    /// Maps `[vmin, vmax]` linearly onto `[0, 1]`
    Linear {
        vmin: f64,
        vmax: f64,
        clip: bool,
        extend: Extend,
    },
}

impl Norm {
    pub fn boundary(boundaries: Vec<f64>, ncolors: usize, extend: Extend) -> Self {
        Norm::Boundary {
            boundaries,
            ncolors,
            extend,
        }
    }

    pub fn linear(vmin: f64, vmax: f64, extend: Extend) -> Self {
        Norm::Linear {
            vmin,
            vmax,
            clip: false,
            extend,
        }
    }

    /// Data range covered by the norm
    pub fn range(&self) -> (f64, f64) {
        match self {
            Norm::Boundary { boundaries, .. } => (
                boundaries.first().copied().unwrap_or(f64::NAN),
                boundaries.last().copied().unwrap_or(f64::NAN),
            ),
            Norm::Linear { vmin, vmax, .. } => (*vmin, *vmax),
        }
    }

    pub fn extend(&self) -> Extend {
        match self {
            Norm::Boundary { extend, .. } | Norm::Linear { extend, .. } => *extend,
        }
    }

    /// Linear position of `value` in the norm's range, without clipping
    pub fn normalize(&self, value: f64) -> f64 {
        let (vmin, vmax) = self.range();
        if vmax > vmin {
            (value - vmin) / (vmax - vmin)
        } else {
            0.0
        }
    }

    /// Classify a raw data value
    pub fn apply(&self, value: f64) -> NormValue {
        if value.is_nan() {
            return NormValue::Invalid;
        }

        let extend = self.extend();
        let under = || {
            if extend.extends_min() {
                NormValue::Under
            } else {
                NormValue::Masked
            }
        };
        let over = || {
            if extend.extends_max() {
                NormValue::Over
            } else {
                NormValue::Masked
            }
        };

        match self {
            Norm::Boundary { boundaries, .. } => {
                let (Some(&first), Some(&last)) = (boundaries.first(), boundaries.last()) else {
                    return NormValue::Invalid;
                };
                if value < first {
                    return under();
                }
                if value >= last {
                    return over();
                }
                // Number of boundaries <= value, minus one, is the interval index
                let bin = boundaries.partition_point(|b| *b <= value) - 1;
                NormValue::Bin(bin)
            }
            Norm::Linear { clip, .. } => {
                let position = self.normalize(value);
                if *clip {
                    return NormValue::Position(position.clamp(0.0, 1.0));
                }
                if position < 0.0 {
                    under()
                } else if position > 1.0 {
                    over()
                } else {
                    NormValue::Position(position)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_bins() {
        let norm = Norm::boundary(vec![0.0, 10.0, 20.0], 3, Extend::Both);

        assert_eq!(norm.apply(0.0), NormValue::Bin(0));
        assert_eq!(norm.apply(9.99), NormValue::Bin(0));
        assert_eq!(norm.apply(10.0), NormValue::Bin(1));
        assert_eq!(norm.apply(19.0), NormValue::Bin(1));
        assert_eq!(norm.apply(20.0), NormValue::Over);
        assert_eq!(norm.apply(-1.0), NormValue::Under);
        assert_eq!(norm.apply(f64::NAN), NormValue::Invalid);
    }

    #[test]
    fn test_boundary_without_extension() {
        let norm = Norm::boundary(vec![0.0, 10.0, 20.0], 3, Extend::Neither);
        assert_eq!(norm.apply(-1.0), NormValue::Masked);
        assert_eq!(norm.apply(25.0), NormValue::Masked);

        let norm = Norm::boundary(vec![0.0, 10.0, 20.0], 3, Extend::Max);
        assert_eq!(norm.apply(-1.0), NormValue::Masked);
        assert_eq!(norm.apply(25.0), NormValue::Over);
    }

    #[test]
    fn test_linear_norm_unclipped() {
        let norm = Norm::linear(200.0, 300.0, Extend::Both);

        assert_eq!(norm.normalize(250.0), 0.5);
        assert_eq!(norm.normalize(350.0), 1.5);
        assert_eq!(norm.apply(250.0), NormValue::Position(0.5));
        assert_eq!(norm.apply(300.0), NormValue::Position(1.0));
        assert_eq!(norm.apply(350.0), NormValue::Over);
        assert_eq!(norm.apply(100.0), NormValue::Under);

        let norm = Norm::linear(200.0, 300.0, Extend::Min);
        assert_eq!(norm.apply(350.0), NormValue::Masked);
    }

    #[test]
    fn test_extend_parse() {
        assert_eq!("both".parse::<Extend>().unwrap(), Extend::Both);
        assert_eq!("MIN".parse::<Extend>().unwrap(), Extend::Min);
        assert!("sideways".parse::<Extend>().is_err());
        assert_eq!(Extend::default(), Extend::Both);
        assert_eq!(Extend::Neither.to_string(), "neither");
    }

    #[test]
    fn test_range() {
        let norm = Norm::boundary(vec![1.0, 2.0, 4.0], 3, Extend::Both);
        assert_eq!(norm.range(), (1.0, 4.0));
        assert_eq!(Norm::linear(-5.0, 5.0, Extend::Both).range(), (-5.0, 5.0));
    }
}
