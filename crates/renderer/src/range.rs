//! Value range used for color scaling.

use crate::settings::Bound;
use plot_common::ScalarGrid;
use serde::{Deserialize, Serialize};

/// The `(min, max)` pair that maps onto the ends of the colormap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Smallest and largest finite values, ignoring NaN and infinities.
pub fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Resolve the color scale range from the settings bounds and the grid.
///
/// `Auto` bounds come from the finite values of the grid. A grid without
/// any finite value yields NaN for each `Auto` bound; callers check
/// [`ValueRange::is_finite`] before color mapping.
pub fn compute_range(min: Bound, max: Bound, grid: &ScalarGrid) -> ValueRange {
    let auto = match (min, max) {
        (Bound::Value(_), Bound::Value(_)) => None,
        _ => finite_min_max(grid.values()),
    };

    let resolve = |bound: Bound, pick: fn((f64, f64)) -> f64| match bound {
        Bound::Value(v) => v,
        Bound::Auto => auto.map(pick).unwrap_or(f64::NAN),
    };

    ValueRange::new(resolve(min, |r| r.0), resolve(max, |r| r.1))
}
