//! The image plot element: a color-mapped 2-D dataset drawn against a pair
//! of axes.
//!
//! Each draw asks the [`RenderCache`] whether the raster is still valid,
//! rebuilds it if not, then places, clips and draws it.

use crate::axis::{AxisDirection, Axes};
use crate::cache::{BuiltImage, Gate, RenderCache};
use crate::clip::cut_image_to_fit;
use crate::colormap::{apply_color_map, ColorScaling, Colormap};
use crate::place::draw_placed;
use crate::range::{compute_range, ValueRange};
use crate::resample::{edge_extent, resample_linear};
use crate::settings::ImageSettings;
use crate::surface::DrawSurface;
use plot_common::{Document, PlotError, PlotResult, PlotterRect, ScalarGrid, Span};
use tracing::{debug, warn};

/// What a companion color bar needs to mirror this image.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarParameters {
    pub min: f64,
    pub max: f64,
    pub scaling: ColorScaling,
    pub colormap: String,
    pub transparency: u8,
    pub invert: bool,
}

/// An image plot and its render cache.
#[derive(Debug, Clone)]
pub struct ImagePlot {
    settings: ImageSettings,
    cache: RenderCache,
}

impl ImagePlot {
    pub fn new(settings: ImageSettings) -> PlotResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            cache: RenderCache::new(),
        })
    }

    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Replace the settings. The cached raster is discarded.
    pub fn set_settings(&mut self, settings: ImageSettings) -> PlotResult<()> {
        settings.validate()?;
        self.settings = settings;
        self.cache.clear();
        Ok(())
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    pub fn user_description(&self) -> String {
        self.settings.user_description()
    }

    /// Widen `range` to include the dataset's extent along `direction`.
    pub fn axis_range<D: Document + ?Sized>(
        &self,
        doc: &D,
        direction: AxisDirection,
        range: &mut (f64, f64),
    ) {
        let Some(grid) = self.grid(doc) else {
            return;
        };
        let (xr, yr) = grid.data_ranges();
        let (lo, hi) = match direction {
            AxisDirection::Horizontal => xr,
            AxisDirection::Vertical => yr,
        };
        range.0 = range.0.min(lo);
        range.1 = range.1.max(hi);
    }

    /// Current color scale for a color bar.
    ///
    /// Falls back to the last computed range, or `0..1`, without data.
    pub fn colorbar_parameters<D: Document + ?Sized>(&mut self, doc: &D) -> ColorbarParameters {
        if let Some(grid) = self.grid(doc) {
            let range = compute_range(self.settings.min, self.settings.max, grid);
            self.cache.set_range(range);
        }
        let range = self.cache.range().unwrap_or_default();

        ColorbarParameters {
            min: range.min,
            max: range.max,
            scaling: self.settings.color_scaling,
            colormap: self.settings.color_map.clone(),
            transparency: self.settings.transparency,
            invert: self.settings.color_invert,
        }
    }

    /// Rebuild the cached raster if it is stale.
    ///
    /// Returns the grid being drawn, or `None` when there is no 2-D dataset.
    /// A failed rebuild leaves the previous cache untouched.
    pub fn recompute<'d, D: Document + ?Sized>(
        &mut self,
        doc: &'d D,
        axes: Axes<'_>,
        bounds: &PlotterRect,
    ) -> PlotResult<Option<&'d ScalarGrid>> {
        let dataset = doc.dataset(&self.settings.data);
        match self.cache.evaluate(dataset, doc.change_counter()) {
            Gate::NoData => Ok(None),
            Gate::Cached { grid } => Ok(Some(grid)),
            Gate::Stale { grid, key } => {
                let (image, range) = self.build_image(doc, grid, axes, bounds)?;
                debug!(
                    dataset = %self.settings.data,
                    version = key.version,
                    width = image.raster.width(),
                    height = image.raster.height(),
                    resampled = image.extent.is_some(),
                    "Rebuilt image raster"
                );
                self.cache.store(key, image, range);
                Ok(Some(grid))
            }
        }
    }

    /// Recompute if needed, then draw the image clipped to `bounds`.
    ///
    /// An invalid edge grid is logged and the frame is skipped; other
    /// failures are returned.
    pub fn draw<D, S>(
        &mut self,
        doc: &D,
        axes: Axes<'_>,
        bounds: &PlotterRect,
        surface: &mut S,
    ) -> PlotResult<()>
    where
        D: Document + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let grid = match self.recompute(doc, axes, bounds) {
            Ok(Some(grid)) => grid,
            Ok(None) => return Ok(()),
            Err(e) if e.is_skippable() => {
                warn!(dataset = %self.settings.data, error = %e, "Skipping image");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if self.settings.hide {
            return Ok(());
        }
        let Some(image) = self.cache.image() else {
            return Ok(());
        };

        let (x, y) = match image.extent {
            Some(extent) => extent,
            None => data_extent(grid, axes, bounds)?,
        };
        let smooth = self.settings.smooth;

        if bounds.contains(&PlotterRect::from_spans(x, y)) {
            return draw_placed(surface, x, y, &image.raster, smooth);
        }
        match cut_image_to_fit(x, y, bounds, &image.raster) {
            Some(clipped) => draw_placed(surface, clipped.x, clipped.y, &clipped.raster, smooth),
            None => Ok(()),
        }
    }

    fn grid<'d, D: Document + ?Sized>(&self, doc: &'d D) -> Option<&'d ScalarGrid> {
        doc.dataset(&self.settings.data)
            .and_then(|(_, dataset)| dataset.as_grid())
    }

    fn build_image<D: Document + ?Sized>(
        &self,
        doc: &D,
        grid: &ScalarGrid,
        axes: Axes<'_>,
        bounds: &PlotterRect,
    ) -> PlotResult<(BuiltImage, ValueRange)> {
        let s = &self.settings;

        let range = compute_range(s.min, s.max, grid);
        if !range.is_finite() {
            return Err(PlotError::NoFiniteValues(s.data.clone()));
        }

        let mut cmap = Colormap::named(&s.color_map)?;
        if s.color_invert {
            cmap = cmap.inverted();
        }

        let weights = if s.transparency_data.is_empty() {
            None
        } else {
            self.transparency_grid(doc)
        };

        let raster = apply_color_map(
            &cmap,
            s.color_scaling,
            grid,
            range.min,
            range.max,
            s.transparency,
            weights,
        )?;

        if !grid.is_nonlinear() {
            return Ok((
                BuiltImage {
                    raster,
                    extent: None,
                },
                range,
            ));
        }

        let xpts = axes.x.data_to_plotter(bounds, &grid.x_edges())?;
        let mut ypts = axes.y.data_to_plotter(bounds, &grid.y_edges())?;
        ypts.reverse();

        let raster = resample_linear(&raster, &xpts, &ypts)?;
        Ok((
            BuiltImage {
                raster,
                extent: Some(edge_extent(&xpts, &ypts)),
            },
            range,
        ))
    }

    fn transparency_grid<'d, D: Document + ?Sized>(&self, doc: &'d D) -> Option<&'d ScalarGrid> {
        doc.dataset(&self.settings.transparency_data)
            .and_then(|(_, dataset)| dataset.as_grid())
    }
}

/// Placement spans of an unresampled grid: its data range through the axes.
fn data_extent(grid: &ScalarGrid, axes: Axes<'_>, bounds: &PlotterRect) -> PlotResult<(Span, Span)> {
    let ((x0, x1), (y0, y1)) = grid.data_ranges();
    let xs = axes.x.data_to_plotter(bounds, &[x0, x1])?;
    let ys = axes.y.data_to_plotter(bounds, &[y0, y1])?;
    Ok((Span::new(xs[0], xs[1]), Span::new(ys[0], ys[1])))
}
