//! Data-to-plotter coordinate mapping for plot axes.

use plot_common::{PlotError, PlotResult, PlotterRect};
use serde::{Deserialize, Serialize};

/// Which plotter direction an axis runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDirection {
    Horizontal,
    Vertical,
}

/// Maps data coordinates along one axis into plotter coordinates.
pub trait AxisMapper {
    fn direction(&self) -> AxisDirection;

    /// Map `values` into plotter coordinates inside `bounds`.
    fn data_to_plotter(&self, bounds: &PlotterRect, values: &[f64]) -> PlotResult<Vec<f64>>;
}

/// The pair of axes an image is drawn against.
#[derive(Clone, Copy)]
pub struct Axes<'a> {
    pub x: &'a dyn AxisMapper,
    pub y: &'a dyn AxisMapper,
}

impl<'a> Axes<'a> {
    pub fn new(x: &'a dyn AxisMapper, y: &'a dyn AxisMapper) -> Self {
        Self { x, y }
    }
}

/// Axis with linear scaling between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAxis {
    pub min: f64,
    pub max: f64,
    pub direction: AxisDirection,
    pub reflect: bool,
}

impl LinearAxis {
    pub fn new(min: f64, max: f64, direction: AxisDirection) -> Self {
        Self {
            min,
            max,
            direction,
            reflect: false,
        }
    }

    pub fn horizontal(min: f64, max: f64) -> Self {
        Self::new(min, max, AxisDirection::Horizontal)
    }

    pub fn vertical(min: f64, max: f64) -> Self {
        Self::new(min, max, AxisDirection::Vertical)
    }

    /// Run the axis the other way.
    pub fn inverted(mut self) -> Self {
        self.reflect = !self.reflect;
        self
    }
}

impl AxisMapper for LinearAxis {
    fn direction(&self) -> AxisDirection {
        self.direction
    }

    fn data_to_plotter(&self, bounds: &PlotterRect, values: &[f64]) -> PlotResult<Vec<f64>> {
        let delta = self.max - self.min;
        if delta == 0.0 || !delta.is_finite() {
            return Err(PlotError::axis_mapping(format!(
                "linear axis range {}..{} has no width",
                self.min, self.max
            )));
        }
        Ok(values
            .iter()
            .map(|&v| to_plotter(self.direction, self.reflect, bounds, (v - self.min) / delta))
            .collect())
    }
}

/// Axis with logarithmic scaling; both limits and all values must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogAxis {
    pub min: f64,
    pub max: f64,
    pub direction: AxisDirection,
    pub reflect: bool,
}

impl LogAxis {
    pub fn new(min: f64, max: f64, direction: AxisDirection) -> Self {
        Self {
            min,
            max,
            direction,
            reflect: false,
        }
    }

    /// Run the axis the other way.
    pub fn inverted(mut self) -> Self {
        self.reflect = !self.reflect;
        self
    }
}

impl AxisMapper for LogAxis {
    fn direction(&self) -> AxisDirection {
        self.direction
    }

    fn data_to_plotter(&self, bounds: &PlotterRect, values: &[f64]) -> PlotResult<Vec<f64>> {
        if !(self.min > 0.0 && self.max > 0.0) || self.min == self.max {
            return Err(PlotError::axis_mapping(format!(
                "log axis range {}..{} is invalid",
                self.min, self.max
            )));
        }
        let log_min = self.min.ln();
        let delta = self.max.ln() - log_min;

        values
            .iter()
            .map(|&v| {
                if !(v > 0.0) {
                    return Err(PlotError::axis_mapping(format!(
                        "cannot place {v} on a log axis"
                    )));
                }
                let frac = (v.ln() - log_min) / delta;
                Ok(to_plotter(self.direction, self.reflect, bounds, frac))
            })
            .collect()
    }
}

/// Place an axis fraction inside `bounds`. Vertical axes grow upwards.
fn to_plotter(direction: AxisDirection, reflect: bool, bounds: &PlotterRect, frac: f64) -> f64 {
    let frac = if reflect { 1.0 - frac } else { frac };
    match direction {
        AxisDirection::Horizontal => bounds.left + frac * bounds.width(),
        AxisDirection::Vertical => bounds.bottom - frac * bounds.height(),
    }
}
