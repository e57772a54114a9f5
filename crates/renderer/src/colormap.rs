//! Colormaps and the numeric-to-color conversion of scalar grids.

use crate::raster::PixelRaster;
use plot_common::{PlotError, PlotResult, ScalarGrid};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Minimum pixels before color mapping is split across threads.
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// Transfer function from a value to a position on the colormap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScaling {
    #[default]
    Linear,
    Sqrt,
    Log,
    Squared,
}

impl ColorScaling {
    /// Parse a scaling name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "linear" => Some(Self::Linear),
            "sqrt" => Some(Self::Sqrt),
            "log" => Some(Self::Log),
            "squared" => Some(Self::Squared),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Squared => "squared",
        }
    }

    /// Map `value` to a colormap position in 0..=1.
    ///
    /// NaN stays NaN. A zero-width range puts every value mid-scale.
    pub fn apply(self, value: f64, min: f64, max: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        let delta = max - min;
        if !(delta > 0.0) || !delta.is_finite() {
            return 0.5;
        }

        let frac = ((value - min) / delta).clamp(0.0, 1.0);
        match self {
            Self::Linear => frac,
            Self::Sqrt => frac.sqrt(),
            Self::Squared => frac * frac,
            Self::Log => (frac * delta).ln_1p() / delta.ln_1p(),
        }
    }
}

/// Evenly spaced RGBA color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<[u8; 4]>,
}

const BUILTIN: &[(&str, &[[u8; 4]])] = &[
    ("grey", &[[0, 0, 0, 255], [255, 255, 255, 255]]),
    (
        "heat",
        &[
            [0, 0, 0, 255],
            [186, 0, 0, 255],
            [239, 116, 0, 255],
            [255, 255, 0, 255],
            [255, 255, 255, 255],
        ],
    ),
    (
        "spectrum",
        &[
            [0, 0, 0, 255],
            [0, 0, 255, 255],
            [0, 255, 255, 255],
            [0, 255, 0, 255],
            [255, 255, 0, 255],
            [255, 0, 0, 255],
            [255, 255, 255, 255],
        ],
    ),
    (
        "spectrum2",
        &[
            [0, 0, 255, 255],
            [0, 255, 255, 255],
            [0, 255, 0, 255],
            [255, 255, 0, 255],
            [255, 0, 0, 255],
        ],
    ),
    ("blue", &[[255, 255, 255, 255], [0, 0, 255, 255]]),
    ("red", &[[255, 255, 255, 255], [255, 0, 0, 255]]),
    ("green", &[[255, 255, 255, 255], [0, 255, 0, 255]]),
    ("bluegreen", &[[0, 0, 255, 255], [0, 255, 0, 255]]),
    ("transblack", &[[0, 0, 0, 0], [0, 0, 0, 255]]),
    ("transwhite", &[[255, 255, 255, 0], [255, 255, 255, 255]]),
];

impl Colormap {
    /// Build a colormap from explicit stops.
    pub fn from_stops(name: impl Into<String>, stops: Vec<[u8; 4]>) -> Self {
        Self {
            name: name.into(),
            stops,
        }
    }

    /// Look up a built-in colormap by name.
    pub fn named(name: &str) -> PlotResult<Self> {
        BUILTIN
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(n, stops)| Self::from_stops(*n, stops.to_vec()))
            .ok_or_else(|| PlotError::UnknownColormap(name.to_string()))
    }

    /// Names of the built-in colormaps.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(n, _)| *n)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The same colormap run backwards.
    pub fn inverted(mut self) -> Self {
        self.stops.reverse();
        self
    }

    /// Color at position `t` (clamped to 0..=1), interpolating between stops.
    pub fn color_at(&self, t: f64) -> [u8; 4] {
        match self.stops.len() {
            0 => [0, 0, 0, 0],
            1 => self.stops[0],
            n => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
                let lo = (pos.floor() as usize).min(n - 2);
                interpolate_color(self.stops[lo], self.stops[lo + 1], pos - lo as f64)
            }
        }
    }
}

/// Linear color interpolation
fn interpolate_color(c1: [u8; 4], c2: [u8; 4], t: f64) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        *channel = (c1[i] as f64 * (1.0 - t) + c2[i] as f64 * t).round() as u8;
    }
    out
}

/// Convert a grid into an RGBA raster.
///
/// Row 0 of the raster is the last (highest y) row of the grid. NaN values
/// become fully transparent pixels. `transparency` is a percentage removed
/// from every pixel's opacity; `weights`, if given, must have the grid's
/// width and height and scales each pixel's opacity by its value clamped
/// to 0..=1.
pub fn apply_color_map(
    cmap: &Colormap,
    scaling: ColorScaling,
    grid: &ScalarGrid,
    min: f64,
    max: f64,
    transparency: u8,
    weights: Option<&ScalarGrid>,
) -> PlotResult<PixelRaster> {
    let width = grid.width();
    let height = grid.height();

    if let Some(w) = weights {
        if (w.width(), w.height()) != (width, height) {
            return Err(PlotError::grid_shape_mismatch(
                (width, height),
                (w.width(), w.height()),
            ));
        }
    }
    let weights = weights.map(ScalarGrid::values);

    if grid.is_empty() {
        return Ok(PixelRaster::new(width as u32, height as u32));
    }

    let opacity = 1.0 - f64::from(transparency.min(100)) / 100.0;
    let values = grid.values();
    let stride = width * 4;
    let mut pixels = vec![0u8; width * height * 4];

    let fill_row = |(out_row, chunk): (usize, &mut [u8])| {
        let src_row = height - 1 - out_row;
        let start = src_row * width;
        for (col, px) in chunk.chunks_exact_mut(4).enumerate() {
            let value = values[start + col];
            if value.is_nan() {
                continue;
            }
            let mut color = cmap.color_at(scaling.apply(value, min, max));
            let weight = match weights {
                Some(w) => {
                    let w = w[start + col];
                    if w.is_nan() {
                        0.0
                    } else {
                        w.clamp(0.0, 1.0)
                    }
                }
                None => 1.0,
            };
            color[3] = (color[3] as f64 * opacity * weight).round() as u8;
            px.copy_from_slice(&color);
        }
    };

    if width * height >= PARALLEL_THRESHOLD {
        pixels.par_chunks_mut(stride).enumerate().for_each(fill_row);
    } else {
        pixels.chunks_mut(stride).enumerate().for_each(fill_row);
    }

    PixelRaster::from_rgba(width as u32, height as u32, pixels)
}
