//! Physical unit conversion for colormap break values.
//!
//! The conversion table is closed: only the pairs listed in [`Unit::converter`]
//! are supported, and any other pair is reported as
//! [`EarthCmapError::UnsupportedConversion`]. Converted values are rounded to
//! two decimals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{EarthCmapError, Result};

/// Stefan-Boltzmann constant (W m^-2 K^-4)
pub const STEFAN_BOLTZMANN: f64 = 5.6693e-8;

/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Meters per second in one knot
pub const MS_PER_KNOT: f64 = 0.514444;

/// Units understood by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Celsius,
    Kelvin,
    /// Blackbody irradiance, W m^{-2}
    Irradiance,
    Inch,
    Millimeter,
    MeterPerSecond,
    Knot,
}

impl Unit {
    /// Canonical spelling used in catalog files
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Kelvin => "K",
            Unit::Irradiance => "W m^{-2}",
            Unit::Inch => "in",
            Unit::Millimeter => "mm",
            Unit::MeterPerSecond => "m s^{-1}",
            Unit::Knot => "Kt",
        }
    }

    /// Look up the element-wise conversion to `target`, if one exists.
    pub fn converter(self, target: Unit) -> Option<fn(f64) -> f64> {
        use Unit::*;

        let f: fn(f64) -> f64 = match (self, target) {
            (Celsius, Kelvin) => |x| x + KELVIN_OFFSET,
            (Kelvin, Celsius) => |x| x - KELVIN_OFFSET,
            (Celsius, Irradiance) => |x| STEFAN_BOLTZMANN * (x + KELVIN_OFFSET).powi(4),
            (Kelvin, Irradiance) => |x| STEFAN_BOLTZMANN * x.powi(4),
            (Inch, Millimeter) => |x| x * MM_PER_INCH,
            (Millimeter, Inch) => |x| x / MM_PER_INCH,
            (MeterPerSecond, Knot) => |x| x / MS_PER_KNOT,
            (Knot, MeterPerSecond) => |x| x * MS_PER_KNOT,
            _ => return None,
        };
        Some(f)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = EarthCmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "C" => Ok(Unit::Celsius),
            "K" => Ok(Unit::Kelvin),
            "W m^{-2}" => Ok(Unit::Irradiance),
            "in" => Ok(Unit::Inch),
            "mm" => Ok(Unit::Millimeter),
            "m s^{-1}" | "m s-1" => Ok(Unit::MeterPerSecond),
            "Kt" => Ok(Unit::Knot),
            other => Err(EarthCmapError::InvalidParameter {
                param: "units".to_string(),
                message: format!("Unknown unit: {}", other),
            }),
        }
    }
}

/// Round to two decimals, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert break values from one unit to another.
///
/// Identical unit strings return the values untouched, even when the unit is
/// not one the converter knows.
pub fn convert_units(values: &[f64], from: &str, to: &str) -> Result<Vec<f64>> {
    if from == to {
        return Ok(values.to_vec());
    }

    let unsupported = || EarthCmapError::UnsupportedConversion {
        from: from.to_string(),
        to: to.to_string(),
    };

    let source: Unit = from.parse().map_err(|_| unsupported())?;
    let target: Unit = to.parse().map_err(|_| unsupported())?;

    if source == target {
        return Ok(values.to_vec());
    }

    let f = source.converter(target).ok_or_else(unsupported)?;

    debug!(
        from = %source,
        to = %target,
        count = values.len(),
        "Converting break values"
    );

    Ok(values.iter().map(|&x| round2(f(x))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        let values = vec![1.234, 5.678];
        assert_eq!(convert_units(&values, "C", "C").unwrap(), values);
        // Unknown but identical units pass through
        assert_eq!(convert_units(&values, "dBZ", "dBZ").unwrap(), values);
    }

    #[test]
    fn test_celsius_to_kelvin() {
        assert_eq!(convert_units(&[0.0], "C", "K").unwrap(), vec![273.15]);
        assert_eq!(convert_units(&[-273.15], "C", "K").unwrap(), vec![0.0]);
        assert_eq!(convert_units(&[300.0], "K", "C").unwrap(), vec![26.85]);
    }

    #[test]
    fn test_irradiance() {
        // sigma * 273.15^4 = 315.598...
        let from_c = convert_units(&[0.0], "C", "W m^{-2}").unwrap();
        let from_k = convert_units(&[273.15], "K", "W m^{-2}").unwrap();
        assert_eq!(from_c, from_k);
        assert_eq!(from_c, vec![315.6]);
    }

    #[test]
    fn test_length_and_speed() {
        assert_eq!(convert_units(&[1.0, 2.0], "in", "mm").unwrap(), vec![25.4, 50.8]);
        assert_eq!(convert_units(&[25.4], "mm", "in").unwrap(), vec![1.0]);
        assert_eq!(convert_units(&[10.0], "m s^{-1}", "Kt").unwrap(), vec![19.44]);
        assert_eq!(convert_units(&[10.0], "m s-1", "Kt").unwrap(), vec![19.44]);
        assert_eq!(convert_units(&[10.0], "Kt", "m s^{-1}").unwrap(), vec![5.14]);
    }

    #[test]
    fn test_unsupported_pairs() {
        let err = convert_units(&[1.0], "mm", "K").unwrap_err();
        assert!(matches!(err, EarthCmapError::UnsupportedConversion { .. }));

        let err = convert_units(&[1.0], "W m^{-2}", "C").unwrap_err();
        assert!(matches!(err, EarthCmapError::UnsupportedConversion { .. }));

        let err = convert_units(&[1.0], "furlong", "mm").unwrap_err();
        match err {
            EarthCmapError::UnsupportedConversion { from, to } => {
                assert_eq!(from, "furlong");
                assert_eq!(to, "mm");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_alias_spellings_are_same_unit() {
        let values = vec![3.3333];
        assert_eq!(convert_units(&values, "m s-1", "m s^{-1}").unwrap(), values);
    }

    #[test]
    fn test_unit_round_trip_parse() {
        for unit in [
            Unit::Celsius,
            Unit::Kelvin,
            Unit::Irradiance,
            Unit::Inch,
            Unit::Millimeter,
            Unit::MeterPerSecond,
            Unit::Knot,
        ] {
            assert_eq!(unit.symbol().parse::<Unit>().unwrap(), unit);
        }
        assert_eq!(" K ".parse::<Unit>().unwrap(), Unit::Kelvin);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(1.0), 1.0);
    }
}
