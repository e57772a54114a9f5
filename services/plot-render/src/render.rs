//! One-shot rendering of a document dataset to PNG bytes.

use anyhow::{bail, Context, Result};
use tracing::info;

use plot_common::{MemoryDocument, PlotterRect};
use renderer::{
    Axes, AxisDirection, AxisMapper, ImagePlot, ImageSettings, LinearAxis, LogAxis,
    PixmapSurface,
};

use crate::config::Args;

/// Load the document and settings named by `args` and render them.
pub fn render(args: &Args) -> Result<Vec<u8>> {
    let doc = MemoryDocument::from_file(&args.document)
        .with_context(|| format!("Failed to load document {}", args.document.display()))?;

    let mut settings = match &args.settings {
        Some(path) => ImageSettings::from_file(path)
            .with_context(|| format!("Failed to load settings {}", path.display()))?,
        None => ImageSettings::default(),
    };
    if let Some(data) = &args.data {
        settings.data = data.clone();
    }

    render_document(&doc, settings, args)
}

/// Render `settings` against an already loaded document.
pub fn render_document(doc: &MemoryDocument, settings: ImageSettings, args: &Args) -> Result<Vec<u8>> {
    let mut plot = ImagePlot::new(settings).context("Invalid image settings")?;

    let x_range = match args.x_range {
        Some(range) => range,
        None => data_range(&plot, doc, AxisDirection::Horizontal)?,
    };
    let y_range = match args.y_range {
        Some(range) => range,
        None => data_range(&plot, doc, AxisDirection::Vertical)?,
    };

    let x_axis = build_axis(x_range, AxisDirection::Horizontal, args.log_x, args.invert_x);
    let y_axis = build_axis(y_range, AxisDirection::Vertical, args.log_y, args.invert_y);
    let axes = Axes::new(x_axis.as_ref(), y_axis.as_ref());

    let bounds = plot_bounds(args.width, args.height, args.margin)?;

    let mut surface = PixmapSurface::new(args.width, args.height)?;
    surface.fill(args.background);
    plot.draw(doc, axes, &bounds, &mut surface)
        .with_context(|| format!("Failed to draw {}", plot.user_description()))?;

    let colorbar = plot.colorbar_parameters(doc);
    info!(
        plot = %plot.user_description(),
        min = colorbar.min,
        max = colorbar.max,
        width = args.width,
        height = args.height,
        "Rendered image"
    );

    Ok(surface.encode_png()?)
}

fn data_range(plot: &ImagePlot, doc: &MemoryDocument, direction: AxisDirection) -> Result<(f64, f64)> {
    let mut range = (f64::INFINITY, f64::NEG_INFINITY);
    plot.axis_range(doc, direction, &mut range);
    if !(range.0.is_finite() && range.1.is_finite()) || range.0 == range.1 {
        bail!(
            "Dataset \"{}\" has no {:?} extent; pass an explicit axis range",
            plot.settings().data,
            direction
        );
    }
    Ok(range)
}

fn build_axis(
    (min, max): (f64, f64),
    direction: AxisDirection,
    log: bool,
    invert: bool,
) -> Box<dyn AxisMapper> {
    match (log, invert) {
        (true, true) => Box::new(LogAxis::new(min, max, direction).inverted()),
        (true, false) => Box::new(LogAxis::new(min, max, direction)),
        (false, true) => Box::new(LinearAxis::new(min, max, direction).inverted()),
        (false, false) => Box::new(LinearAxis::new(min, max, direction)),
    }
}

fn plot_bounds(width: u32, height: u32, margin: f64) -> Result<PlotterRect> {
    let bounds = PlotterRect::new(
        margin,
        margin,
        width as f64 - margin,
        height as f64 - margin,
    );
    if margin.is_nan() || margin < 0.0 || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        bail!("Margin {} leaves no plot area in {}x{}", margin, width, height);
    }
    Ok(bounds)
}
