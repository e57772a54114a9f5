//! Rebuild decisions and the cached output of the last rebuild.

use crate::range::ValueRange;
use crate::raster::PixelRaster;
use plot_common::{Dataset, DatasetToken, ScalarGrid, Span};

/// Identity of the inputs a raster was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub dataset: DatasetToken,
    pub version: u64,
}

impl CacheKey {
    pub fn new(dataset: DatasetToken, version: u64) -> Self {
        Self { dataset, version }
    }
}

/// A raster ready for placement.
///
/// `extent` holds the plotter spans of a resampled raster; `None` means the
/// raster covers the grid's data range and is placed through the axes.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltImage {
    pub raster: PixelRaster,
    pub extent: Option<(Span, Span)>,
}

/// Outcome of checking the cache against the current dataset.
#[derive(Debug, Clone, Copy)]
pub enum Gate<'d> {
    /// No dataset, or not a 2-D one. Nothing is drawn.
    NoData,
    /// The cached raster can be reused.
    Cached { grid: &'d ScalarGrid },
    /// The raster must be rebuilt and stored under `key`.
    Stale { grid: &'d ScalarGrid, key: CacheKey },
}

/// Last built raster and value range of one image plot.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    key: Option<CacheKey>,
    image: Option<BuiltImage>,
    range: Option<ValueRange>,
    generation: u64,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether output built under `key` must be rebuilt.
    ///
    /// Non-linear grids are always stale: their resampled raster depends on
    /// the current axis mapping.
    pub fn is_stale(&self, key: CacheKey, nonlinear: bool) -> bool {
        nonlinear || self.image.is_none() || self.key != Some(key)
    }

    /// Classify the current dataset at document `version`.
    pub fn evaluate<'d>(
        &self,
        dataset: Option<(DatasetToken, &'d Dataset)>,
        version: u64,
    ) -> Gate<'d> {
        let Some((token, grid)) = dataset.and_then(|(t, d)| d.as_grid().map(|g| (t, g))) else {
            return Gate::NoData;
        };
        let key = CacheKey::new(token, version);
        if self.is_stale(key, grid.is_nonlinear()) {
            Gate::Stale { grid, key }
        } else {
            Gate::Cached { grid }
        }
    }

    /// Replace the cached output after a successful rebuild.
    pub fn store(&mut self, key: CacheKey, image: BuiltImage, range: ValueRange) {
        self.key = Some(key);
        self.image = Some(image);
        self.range = Some(range);
        self.generation += 1;
    }

    /// Record a value range computed outside a full rebuild.
    pub fn set_range(&mut self, range: ValueRange) {
        self.range = Some(range);
    }

    pub fn key(&self) -> Option<CacheKey> {
        self.key
    }

    pub fn image(&self) -> Option<&BuiltImage> {
        self.image.as_ref()
    }

    /// Last computed value range.
    pub fn range(&self) -> Option<ValueRange> {
        self.range
    }

    /// Number of rebuilds stored so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the cached output, keeping the generation count.
    pub fn clear(&mut self) {
        self.key = None;
        self.image = None;
        self.range = None;
    }
}
