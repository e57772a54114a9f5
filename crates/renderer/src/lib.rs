//! Color-mapped image rendering for 2-D scalar grids.
//!
//! # Pipeline
//!
//! ```text
//! Dataset + ImageSettings
//!        │
//!        ▼
//!  range::compute_range ──► colormap::apply_color_map ──► PixelRaster
//!                                                            │
//!                               (non-linear edge grids only) ▼
//!                                            resample::resample_linear
//!                                                            │
//!                                                            ▼
//!                       clip::cut_image_to_fit ──► place::draw_placed ──► DrawSurface
//! ```
//!
//! [`image_plot::ImagePlot`] drives the pipeline and keeps the last raster
//! in a [`cache::RenderCache`], rebuilding it only when the dataset, the
//! document change counter, or a non-linear grid requires it.

pub mod axis;
pub mod cache;
pub mod clip;
pub mod colormap;
pub mod image_plot;
pub mod place;
pub mod png;
pub mod range;
pub mod raster;
pub mod resample;
pub mod settings;
pub mod surface;

pub use axis::{Axes, AxisDirection, AxisMapper, LinearAxis, LogAxis};
pub use cache::{BuiltImage, CacheKey, Gate, RenderCache};
pub use clip::{cut_image_to_fit, ClippedImage};
pub use colormap::{apply_color_map, ColorScaling, Colormap};
pub use image_plot::{ColorbarParameters, ImagePlot};
pub use place::{draw_placed, Placement};
pub use range::{compute_range, ValueRange};
pub use raster::PixelRaster;
pub use resample::{edge_extent, resample_linear, MAX_RESAMPLE_SIZE};
pub use settings::{Bound, ImageSettings};
pub use surface::{DrawSurface, PixmapSurface, SavedState};
