//! Cropping of placed rasters to the visible viewport.
//!
//! Trims are whole pixels only, so the cropped raster keeps the pixel size
//! of the original placement. Trailing edges are trimmed one pixel short,
//! which can leave a pixel of overdraw but never a gap.

use crate::raster::PixelRaster;
use plot_common::{PlotterRect, Span};
use tracing::trace;

/// A cropped raster with the spans it should be placed at.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedImage {
    pub x: Span,
    pub y: Span,
    pub raster: PixelRaster,
}

/// Crop `raster`, placed at `x` and `y`, to what is visible in `viewport`.
///
/// Column 0 sits at `x.start` and row 0 at `y.end` (the y span is stored
/// high to low). Either span may be reversed. Returns `None` when nothing
/// of the raster is visible or the raster has no pixels.
pub fn cut_image_to_fit(
    x: Span,
    y: Span,
    viewport: &PlotterRect,
    raster: &PixelRaster,
) -> Option<ClippedImage> {
    if raster.is_empty() {
        return None;
    }
    let (width, height) = raster.dimensions();

    let cols = cut_axis(x.start, x.end, viewport.left, viewport.right, width)?;
    let rows = cut_axis(y.end, y.start, viewport.top, viewport.bottom, height)?;

    trace!(
        first_col = cols.first,
        last_col = cols.last,
        first_row = rows.first,
        last_row = rows.last,
        "Cropping image to viewport"
    );

    let raster = raster.crop(
        cols.first,
        rows.first,
        cols.last - cols.first + 1,
        rows.last - rows.first + 1,
    );

    Some(ClippedImage {
        x: Span::new(cols.start, cols.end),
        y: Span::new(rows.end, rows.start),
        raster,
    })
}

/// Pixels kept along one axis and the plotter coordinates they span.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisCut {
    first: u32,
    last: u32,
    start: f64,
    end: f64,
}

/// Cut one axis with `pixels` pixels running from `start` (pixel 0) to
/// `end`, against the visible interval `lo..=hi`.
fn cut_axis(start: f64, end: f64, lo: f64, hi: f64, pixels: u32) -> Option<AxisCut> {
    let pix = (end - start) / pixels as f64;
    if pix == 0.0 || !pix.is_finite() {
        return None;
    }
    if start.max(end) < lo || start.min(end) > hi {
        return None;
    }

    let size = pix.abs();
    let (leading, trailing) = if pix > 0.0 {
        (lo - start, end - hi)
    } else {
        (start - hi, lo - end)
    };

    let mut first = 0i64;
    let mut last = pixels as i64 - 1;
    let mut cut = AxisCut {
        first: 0,
        last: 0,
        start,
        end,
    };

    if leading > 0.0 {
        let d = (leading / size).floor() as i64;
        first += d;
        cut.start += d as f64 * pix;
    }
    if trailing > 0.0 {
        let d = ((trailing / size).floor() as i64 - 1).max(0);
        last -= d;
        cut.end -= d as f64 * pix;
    }

    if first > last {
        return None;
    }
    cut.first = first as u32;
    cut.last = last as u32;
    Some(cut)
}
