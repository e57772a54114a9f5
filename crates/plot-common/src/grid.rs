//! Two-dimensional scalar grids and the datasets that carry them.

use crate::error::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// Identity of a dataset as handed out by a [`crate::Document`].
///
/// A new token is issued whenever a dataset is replaced, so comparing
/// tokens is enough to tell whether cached output refers to the same data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetToken(pub u64);

/// A 2-D array of samples with optional per-axis edge grids.
///
/// Values are stored row-major with row 0 at the lowest data y. Edge grids
/// hold the cell boundaries along an axis (one more entry than cells) and
/// may run in either direction; when absent the axis is uniform across
/// its data range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct ScalarGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
    xrange: (f64, f64),
    yrange: (f64, f64),
    xgrid: Option<Vec<f64>>,
    ygrid: Option<Vec<f64>>,
}

impl ScalarGrid {
    /// Create a grid from row-major values.
    ///
    /// The data range defaults to one unit per cell starting at zero.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> PlotResult<Self> {
        if values.len() != width * height {
            return Err(PlotError::shape_mismatch(width * height, values.len()));
        }

        Ok(Self {
            width,
            height,
            values,
            xrange: (0.0, width as f64),
            yrange: (0.0, height as f64),
            xgrid: None,
            ygrid: None,
        })
    }

    /// Set the x data range covered by the grid.
    pub fn with_xrange(mut self, min: f64, max: f64) -> Self {
        self.xrange = (min, max);
        self
    }

    /// Set the y data range covered by the grid.
    pub fn with_yrange(mut self, min: f64, max: f64) -> Self {
        self.yrange = (min, max);
        self
    }

    /// Attach a non-uniform x edge grid (`width + 1` entries).
    pub fn with_xgrid(mut self, edges: Vec<f64>) -> PlotResult<Self> {
        check_edges("xgrid", &edges, self.width)?;
        self.xgrid = Some(edges);
        Ok(self)
    }

    /// Attach a non-uniform y edge grid (`height + 1` entries).
    pub fn with_ygrid(mut self, edges: Vec<f64>) -> PlotResult<Self> {
        check_edges("ygrid", &edges, self.height)?;
        self.ygrid = Some(edges);
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of the cell at `col`, `row`.
    pub fn value(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn xgrid(&self) -> Option<&[f64]> {
        self.xgrid.as_deref()
    }

    pub fn ygrid(&self) -> Option<&[f64]> {
        self.ygrid.as_deref()
    }

    /// True if either axis carries an explicit edge grid.
    pub fn is_nonlinear(&self) -> bool {
        self.xgrid.is_some() || self.ygrid.is_some()
    }

    /// Data-space extent of the grid on each axis as `(min, max)` pairs.
    pub fn data_ranges(&self) -> ((f64, f64), (f64, f64)) {
        let xr = match &self.xgrid {
            Some(edges) => min_max(edges),
            None => self.xrange,
        };
        let yr = match &self.ygrid {
            Some(edges) => min_max(edges),
            None => self.yrange,
        };
        (xr, yr)
    }

    /// Cell boundaries along x, either the explicit edge grid or uniform
    /// edges across the x range.
    pub fn x_edges(&self) -> Vec<f64> {
        match &self.xgrid {
            Some(edges) => edges.clone(),
            None => uniform_edges(self.xrange, self.width),
        }
    }

    /// Cell boundaries along y, in data row order.
    pub fn y_edges(&self) -> Vec<f64> {
        match &self.ygrid {
            Some(edges) => edges.clone(),
            None => uniform_edges(self.yrange, self.height),
        }
    }
}

fn check_edges(name: &str, edges: &[f64], cells: usize) -> PlotResult<()> {
    if edges.len() != cells + 1 {
        return Err(PlotError::invalid_grid(format!(
            "{} has {} edges for {} cells",
            name,
            edges.len(),
            cells
        )));
    }
    Ok(())
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

fn uniform_edges((min, max): (f64, f64), cells: usize) -> Vec<f64> {
    let step = if cells == 0 { 0.0 } else { (max - min) / cells as f64 };
    (0..=cells).map(|i| min + i as f64 * step).collect()
}

/// Serialized form of [`ScalarGrid`], validated on conversion.
///
/// JSON has no NaN, so missing samples are stored as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    values: Vec<Option<f64>>,
    #[serde(default)]
    xrange: Option<(f64, f64)>,
    #[serde(default)]
    yrange: Option<(f64, f64)>,
    #[serde(default)]
    xgrid: Option<Vec<f64>>,
    #[serde(default)]
    ygrid: Option<Vec<f64>>,
}

impl TryFrom<RawGrid> for ScalarGrid {
    type Error = PlotError;

    fn try_from(raw: RawGrid) -> PlotResult<Self> {
        let values = raw
            .values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let mut grid = ScalarGrid::new(raw.width, raw.height, values)?;
        if let Some((min, max)) = raw.xrange {
            grid = grid.with_xrange(min, max);
        }
        if let Some((min, max)) = raw.yrange {
            grid = grid.with_yrange(min, max);
        }
        if let Some(edges) = raw.xgrid {
            grid = grid.with_xgrid(edges)?;
        }
        if let Some(edges) = raw.ygrid {
            grid = grid.with_ygrid(edges)?;
        }
        Ok(grid)
    }
}

impl From<ScalarGrid> for RawGrid {
    fn from(grid: ScalarGrid) -> Self {
        RawGrid {
            width: grid.width,
            height: grid.height,
            values: grid
                .values
                .into_iter()
                .map(|v| if v.is_nan() { None } else { Some(v) })
                .collect(),
            xrange: Some(grid.xrange),
            yrange: Some(grid.yrange),
            xgrid: grid.xgrid,
            ygrid: grid.ygrid,
        }
    }
}

/// A dataset as stored in a document.
///
/// Only two-dimensional datasets can be drawn as images; the other kinds
/// exist so lookups by name can return them and be rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Dataset {
    #[serde(rename = "1d")]
    OneD { values: Vec<f64> },
    #[serde(rename = "2d")]
    TwoD(ScalarGrid),
}

impl Dataset {
    /// Number of dimensions of the dataset.
    pub fn dimensions(&self) -> usize {
        match self {
            Dataset::OneD { .. } => 1,
            Dataset::TwoD(_) => 2,
        }
    }

    /// The 2-D grid, if this is a two-dimensional dataset.
    pub fn as_grid(&self) -> Option<&ScalarGrid> {
        match self {
            Dataset::TwoD(grid) => Some(grid),
            _ => None,
        }
    }
}

impl From<ScalarGrid> for Dataset {
    fn from(grid: ScalarGrid) -> Self {
        Dataset::TwoD(grid)
    }
}
