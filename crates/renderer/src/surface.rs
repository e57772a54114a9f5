//! Drawing surfaces that placed rasters are rendered onto.

use std::ops::{Deref, DerefMut};

use crate::png::encode_png;
use crate::raster::PixelRaster;
use plot_common::{PlotError, PlotResult, PlotterRect};
use tiny_skia::{
    Color, FilterQuality, IntSize, Paint, Pattern, Pixmap, Rect, SpreadMode, Transform,
};

/// A target with a save/restore transform stack and an image primitive.
pub trait DrawSurface {
    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching [`DrawSurface::save`].
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn scale(&mut self, sx: f64, sy: f64);

    /// Draw `raster` stretched over `target`, ignoring aspect ratio.
    fn draw_image(&mut self, target: &PlotterRect, raster: &PixelRaster) -> PlotResult<()>;
}

/// Scoped transform state: saves on creation and restores on drop, so the
/// surface is restored on every exit path.
pub struct SavedState<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Off-screen surface backed by a `tiny_skia` pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Transform,
    stack: Vec<Transform>,
}

impl PixmapSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> PlotResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            PlotError::Surface(format!("cannot create {width}x{height} surface"))
        })?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            stack: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole surface with a straight-alpha color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        self.pixmap
            .fill(Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));
    }

    /// Current transform from user to device space.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Number of saved states not yet restored.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Straight-alpha color of a device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Copy the surface out as a straight-alpha raster.
    pub fn to_raster(&self) -> PlotResult<PixelRaster> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        PixelRaster::from_rgba(self.width(), self.height(), data)
    }

    /// Encode the surface as PNG.
    pub fn encode_png(&self) -> PlotResult<Vec<u8>> {
        encode_png(&self.to_raster()?)
    }
}

impl DrawSurface for PixmapSurface {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.transform = saved;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(dx as f32, dy as f32);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform.pre_scale(sx as f32, sy as f32);
    }

    fn draw_image(&mut self, target: &PlotterRect, raster: &PixelRaster) -> PlotResult<()> {
        let rect = Rect::from_xywh(
            target.left as f32,
            target.top as f32,
            target.width() as f32,
            target.height() as f32,
        )
        .ok_or_else(|| PlotError::Surface(format!("invalid target rectangle {target:?}")))?;

        let source = to_pixmap(raster)?;
        let sx = rect.width() / source.width() as f32;
        let sy = rect.height() / source.height() as f32;

        let mut paint = Paint::default();
        paint.shader = Pattern::new(
            source.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Nearest,
            1.0,
            Transform::from_row(sx, 0.0, 0.0, sy, rect.left(), rect.top()),
        );

        self.pixmap.fill_rect(rect, &paint, self.transform, None);
        Ok(())
    }
}

/// Premultiply a raster into a pixmap.
fn to_pixmap(raster: &PixelRaster) -> PlotResult<Pixmap> {
    let size = IntSize::from_wh(raster.width(), raster.height())
        .ok_or_else(|| PlotError::Surface("cannot draw an empty raster".to_string()))?;

    let mut data = raster.as_raw().to_vec();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for channel in &mut px[..3] {
            *channel = ((*channel as u16 * a + 127) / 255) as u8;
        }
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| PlotError::Surface("raster does not fit a pixmap".to_string()))
}
