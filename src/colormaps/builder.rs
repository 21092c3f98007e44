//! Construction of colormaps and norms from catalog records.

use colorgrad::Color;
use serde::Serialize;
use tracing::debug;

use super::colormap::{Colormap, Rgba};
use super::continuous::ContinuousColormap;
use super::discrete::DiscreteColormap;
use super::norm::{Extend, Norm, NormValue};
use crate::catalog::{self, ColormapKind, ColormapSpec, SpecResolver};
use crate::error::{EarthCmapError, Result};
use crate::units::{convert_units, round2};

/// Options accepted by [`build`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Express break values in these units instead of the record's own
    pub target_units: Option<String>,
    /// Out-of-range handling of the returned norm
    pub extend: Extend,
}

impl BuildOptions {
    pub fn with_units(units: impl Into<String>) -> Self {
        Self {
            target_units: Some(units.into()),
            ..Default::default()
        }
    }

    pub fn extend(mut self, extend: Extend) -> Self {
        self.extend = extend;
        self
    }
}

/// A built colormap of either kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BuiltColormap {
    Discrete(DiscreteColormap),
    Continuous(ContinuousColormap),
}

impl BuiltColormap {
    pub fn kind(&self) -> ColormapKind {
        match self {
            BuiltColormap::Discrete(_) => ColormapKind::Discrete,
            BuiltColormap::Continuous(_) => ColormapKind::Continuous,
        }
    }

    pub fn long_name(&self) -> &str {
        match self {
            BuiltColormap::Discrete(c) => &c.long_name,
            BuiltColormap::Continuous(c) => &c.long_name,
        }
    }

    pub fn units(&self) -> &str {
        match self {
            BuiltColormap::Discrete(c) => &c.units,
            BuiltColormap::Continuous(c) => &c.units,
        }
    }

    /// Break positions in data units
    pub fn positions(&self) -> &[f64] {
        match self {
            BuiltColormap::Discrete(c) => &c.positions,
            BuiltColormap::Continuous(c) => &c.positions,
        }
    }

    pub fn labels(&self) -> &[String] {
        match self {
            BuiltColormap::Discrete(c) => &c.labels,
            BuiltColormap::Continuous(c) => &c.labels,
        }
    }

    /// Anchor colors, one per position
    pub fn colors(&self) -> &[Rgba] {
        match self {
            BuiltColormap::Discrete(c) => &c.colors,
            BuiltColormap::Continuous(c) => &c.colors,
        }
    }

    pub fn as_discrete(&self) -> Option<&DiscreteColormap> {
        match self {
            BuiltColormap::Discrete(c) => Some(c),
            BuiltColormap::Continuous(_) => None,
        }
    }

    pub fn as_continuous(&self) -> Option<&ContinuousColormap> {
        match self {
            BuiltColormap::Continuous(c) => Some(c),
            BuiltColormap::Discrete(_) => None,
        }
    }

    fn inner(&self) -> &dyn Colormap {
        match self {
            BuiltColormap::Discrete(c) => c,
            BuiltColormap::Continuous(c) => c,
        }
    }
}

impl Colormap for BuiltColormap {
    fn map_normalized(&self, value: f32) -> Rgba {
        self.inner().map_normalized(value)
    }

    fn color_for(&self, value: NormValue) -> Rgba {
        self.inner().color_for(value)
    }

    fn entry_count(&self) -> usize {
        self.inner().entry_count()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }
}

/// Resolve `name` and build its colormap and norm
pub fn build<R: SpecResolver + ?Sized>(
    resolver: &R,
    name: &str,
    options: &BuildOptions,
) -> Result<(BuiltColormap, Norm)> {
    let spec = resolver.resolve(name)?;
    build_from_spec(name, &spec, options)
}

/// Build `name` from the process-wide catalog index
pub fn build_global(name: &str, options: &BuildOptions) -> Result<(BuiltColormap, Norm)> {
    build(catalog::global()?, name, options)
}

/// Build a colormap and norm from an already resolved record
pub fn build_from_spec(
    name: &str,
    spec: &ColormapSpec,
    options: &BuildOptions,
) -> Result<(BuiltColormap, Norm)> {
    spec.validate(name)?;

    let mut values = spec.break_values();
    let labels = spec.labels();
    let colors = spec
        .data
        .iter()
        .map(|entry| entry.color.to_color())
        .collect::<std::result::Result<Vec<Color>, String>>()
        .map_err(|message| EarthCmapError::malformed(name, message))?;

    let units = match options.target_units.as_deref() {
        Some(target) if target != spec.units => {
            values = convert_units(&values, &spec.units, target)?;
            target.to_string()
        }
        _ => spec.units.clone(),
    };

    // Rounding after conversion can merge neighbouring breaks
    if values.windows(2).any(|w| w[0] >= w[1]) {
        return Err(EarthCmapError::malformed(
            name,
            format!("break values are not strictly ascending in {}", units),
        ));
    }

    let v_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let v_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    debug!(
        name = name,
        kind = ?spec.kind,
        units = %units,
        v_min = v_min,
        v_max = v_max,
        "Building colormap"
    );

    match spec.kind {
        ColormapKind::Discrete => {
            let cmap = build_discrete(name, spec, values, &colors, labels, units);
            let norm = Norm::boundary(cmap.positions.clone(), cmap.colors.len(), options.extend);
            Ok((BuiltColormap::Discrete(cmap), norm))
        }
        ColormapKind::Continuous => {
            let resolution = spec
                .resolution
                .ok_or_else(|| EarthCmapError::malformed(name, "continuous colormaps require N"))?;
            if v_max <= v_min {
                return Err(EarthCmapError::malformed(
                    name,
                    format!("break values span an empty range in {}", units),
                ));
            }
            let normalized = values
                .iter()
                .map(|v| normalize_break(*v, v_min, v_max))
                .collect();
            let cmap = ContinuousColormap::new(
                name.to_string(),
                spec.long_name.clone(),
                units,
                values,
                normalized,
                &colors,
                labels,
                resolution,
            )?;
            let norm = Norm::linear(v_min, v_max, options.extend);
            Ok((BuiltColormap::Continuous(cmap), norm))
        }
    }
}

fn build_discrete(
    name: &str,
    spec: &ColormapSpec,
    mut positions: Vec<f64>,
    colors: &[Color],
    mut labels: Vec<String>,
    units: String,
) -> DiscreteColormap {
    let mut colors: Vec<Rgba> = colors.iter().map(|c| c.to_rgba8()).collect();
    let midlabels = labels.clone();

    // Overflow class so the last break gets a visible extent
    let overflow = overflow_break(&positions);
    positions.push(overflow);
    if let Some(&last) = colors.last() {
        colors.push(last);
    }
    let overflow_label = format!("> {}", labels.last().map(String::as_str).unwrap_or_default());
    labels.push(overflow_label);

    let midpositions = positions.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();

    DiscreteColormap {
        name: name.to_string(),
        long_name: spec.long_name.clone(),
        units,
        positions,
        colors,
        labels,
        midpositions,
        midlabels,
    }
}

/// Twice the last break, or one more step when doubling does not move past it
fn overflow_break(positions: &[f64]) -> f64 {
    let last = positions[positions.len() - 1];
    let doubled = last * 2.0;
    if doubled > last {
        return doubled;
    }
    match positions.len() {
        1 => last + 1.0,
        n => {
            let step = last - positions[n - 2];
            if step > 0.0 {
                last + step
            } else {
                last + 1.0
            }
        }
    }
}

/// Rescale a break value to [0, 1], rounded to two decimals
pub fn normalize_break(value: f64, v_min: f64, v_max: f64) -> f64 {
    round2((value - v_min) / (v_max - v_min))
}
