//! Final placement of a raster on a drawing surface.

use crate::raster::PixelRaster;
use crate::surface::{DrawSurface, SavedState};
use plot_common::{PlotResult, PlotterRect, Span};

/// Device-space origin and signed extent of a placed raster.
///
/// A negative width or height means the raster is mirrored along that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Placement for an x span and a (high-to-low) y span.
    pub fn from_spans(x: Span, y: Span) -> Self {
        Self {
            x: x.start,
            y: y.end,
            width: x.end - x.start,
            height: y.start - y.end,
        }
    }

    /// True if nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width == 0.0
            || self.height == 0.0
    }

    pub fn is_mirrored(&self) -> bool {
        self.width < 0.0 || self.height < 0.0
    }

    /// Whole-pixel size of the target area.
    pub fn target_size(&self) -> (u32, u32) {
        (
            self.width.abs().round() as u32,
            self.height.abs().round() as u32,
        )
    }
}

/// Draw `raster` placed at the given spans.
///
/// With `smooth` the raster is first rescaled to the target size with an
/// interpolating filter; otherwise the surface scales it. Mirrored
/// placements are drawn inside a saved state that is restored even when
/// drawing fails.
pub fn draw_placed<S: DrawSurface + ?Sized>(
    surface: &mut S,
    x: Span,
    y: Span,
    raster: &PixelRaster,
    smooth: bool,
) -> PlotResult<()> {
    let placement = Placement::from_spans(x, y);
    if placement.is_empty() || raster.is_empty() {
        return Ok(());
    }

    let smoothed;
    let image = if smooth {
        let (w, h) = placement.target_size();
        smoothed = raster.scaled_smooth(w, h);
        &smoothed
    } else {
        raster
    };

    if !placement.is_mirrored() {
        let target =
            PlotterRect::from_xywh(placement.x, placement.y, placement.width, placement.height);
        return surface.draw_image(&target, image);
    }

    let mut state = SavedState::new(surface);
    state.translate(placement.x, placement.y);
    state.scale(placement.width.signum(), placement.height.signum());
    let target = PlotterRect::from_xywh(0.0, 0.0, placement.width.abs(), placement.height.abs());
    state.draw_image(&target, image)
}
