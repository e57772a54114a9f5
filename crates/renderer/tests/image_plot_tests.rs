//! End-to-end tests for the image plot element.
//!
//! Covers the rebuild decisions of the render cache, the no-data and hide
//! paths, error handling, and rendered output on a pixmap surface.

use plot_common::{Document, MemoryDocument, PlotError, PlotterRect, ScalarGrid};
use renderer::{
    apply_color_map, Axes, Bound, ColorScaling, Colormap, ImagePlot, ImageSettings, LinearAxis,
    LogAxis, AxisDirection, PixmapSurface,
};
use test_utils::fixtures::{documents, viewports};
use test_utils::{
    assert_approx_eq, create_grid_with_nans, create_noisy_values, create_ramp_grid, fixtures,
};

// ============================================================================
// Helper functions
// ============================================================================

/// Axes mapping `0..4` on both axes onto a 4x4 pixel viewport.
fn unit_axes() -> (LinearAxis, LinearAxis) {
    (LinearAxis::horizontal(0.0, 4.0), LinearAxis::vertical(0.0, 4.0))
}

const BOUNDS_4: PlotterRect = PlotterRect {
    left: 0.0,
    top: 0.0,
    right: 4.0,
    bottom: 4.0,
};

fn doc_with(grid: ScalarGrid) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.insert("img", grid);
    doc
}

fn draw(plot: &mut ImagePlot, doc: &MemoryDocument, surface: &mut PixmapSurface) -> Result<(), PlotError> {
    let (x, y) = unit_axes();
    plot.draw(doc, Axes::new(&x, &y), &BOUNDS_4, surface)
}

fn is_blank(surface: &PixmapSurface) -> bool {
    (0..surface.height()).all(|y| (0..surface.width()).all(|x| surface.pixel(x, y) == Some([0, 0, 0, 0])))
}

// ============================================================================
// Cache tests
// ============================================================================

#[test]
fn test_unchanged_inputs_reuse_raster() {
    let doc = doc_with(create_ramp_grid(4, 4));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    draw(&mut plot, &doc, &mut surface).unwrap();
    assert_eq!(plot.cache().generation(), 1);
}

#[test]
fn test_change_counter_forces_rebuild() {
    let mut doc = doc_with(create_ramp_grid(4, 4));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    doc.touch();
    draw(&mut plot, &doc, &mut surface).unwrap();
    assert_eq!(plot.cache().generation(), 2);
}

#[test]
fn test_replaced_dataset_forces_rebuild() {
    let mut doc = doc_with(create_ramp_grid(4, 4));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    let first_key = plot.cache().key().unwrap();
    doc.insert("img", create_ramp_grid(2, 2));
    draw(&mut plot, &doc, &mut surface).unwrap();

    let second_key = plot.cache().key().unwrap();
    assert_ne!(first_key.dataset, second_key.dataset);
    assert_eq!(plot.cache().generation(), 2);
    assert_eq!(plot.cache().image().unwrap().raster.dimensions(), (2, 2));
}

#[test]
fn test_nonlinear_grid_rebuilds_every_draw() {
    let grid = create_ramp_grid(2, 2).with_xgrid(vec![0.0, 1.0, 4.0]).unwrap();
    let doc = doc_with(grid);
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    for _ in 0..3 {
        draw(&mut plot, &doc, &mut surface).unwrap();
    }
    assert_eq!(plot.cache().generation(), 3);
    assert!(plot.cache().image().unwrap().extent.is_some());
}

#[test]
fn test_new_settings_discard_cache() {
    let doc = doc_with(create_ramp_grid(4, 4));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    draw(&mut plot, &doc, &mut surface).unwrap();

    let mut settings = ImageSettings::for_dataset("img");
    settings.color_map = "heat".to_string();
    plot.set_settings(settings).unwrap();
    assert!(plot.cache().image().is_none());

    draw(&mut plot, &doc, &mut surface).unwrap();
    assert_eq!(plot.cache().generation(), 2);
}

// ============================================================================
// No-data and hide tests
// ============================================================================

#[test]
fn test_missing_dataset_draws_nothing() {
    let doc = MemoryDocument::new();
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    assert!(is_blank(&surface));
    assert_eq!(plot.cache().generation(), 0);
}

#[test]
fn test_one_dimensional_dataset_draws_nothing() {
    let doc = MemoryDocument::from_json(fixtures::documents::NONLINEAR_WITH_MASK).unwrap();
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("line")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    assert!(is_blank(&surface));
    assert!(plot.cache().image().is_none());
}

#[test]
fn test_hidden_plot_recomputes_but_draws_nothing() {
    let doc = doc_with(create_ramp_grid(4, 4));
    let mut settings = ImageSettings::for_dataset("img");
    settings.hide = true;
    let mut plot = ImagePlot::new(settings).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    assert!(is_blank(&surface));
    assert_eq!(plot.cache().generation(), 1);
}

// ============================================================================
// Error handling tests
// ============================================================================

#[test]
fn test_all_nan_fails_and_keeps_cache() {
    let mut doc = doc_with(create_ramp_grid(4, 4));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    draw(&mut plot, &doc, &mut surface).unwrap();
    let key = plot.cache().key();

    doc.insert("img", ScalarGrid::new(2, 2, vec![f64::NAN; 4]).unwrap());
    let err = draw(&mut plot, &doc, &mut surface).unwrap_err();

    assert!(matches!(err, PlotError::NoFiniteValues(_)));
    assert_eq!(plot.cache().generation(), 1);
    assert_eq!(plot.cache().key(), key);
    assert_eq!(plot.cache().image().unwrap().raster.dimensions(), (4, 4));
}

#[test]
fn test_all_nan_with_explicit_bounds_draws_transparent() {
    let doc = doc_with(ScalarGrid::new(2, 2, vec![f64::NAN; 4]).unwrap());
    let mut settings = ImageSettings::for_dataset("img");
    settings.min = Bound::Value(0.0);
    settings.max = Bound::Value(1.0);
    let mut plot = ImagePlot::new(settings).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    assert!(is_blank(&surface));
}

#[test]
fn test_degenerate_edge_grid_is_skipped() {
    let grid = create_ramp_grid(3, 1).with_xgrid(vec![1.0, 1.0, 1.0, 1.0]).unwrap();
    let doc = doc_with(grid);
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    draw(&mut plot, &doc, &mut surface).unwrap();
    assert!(is_blank(&surface));
    assert!(plot.cache().image().is_none());
}

#[test]
fn test_unknown_colormap_propagates() {
    let doc = doc_with(create_ramp_grid(2, 2));
    let mut settings = ImageSettings::for_dataset("img");
    settings.color_map = "plasma-ish".to_string();
    let mut plot = ImagePlot::new(settings).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    let err = draw(&mut plot, &doc, &mut surface).unwrap_err();
    assert!(matches!(err, PlotError::UnknownColormap(_)));
}

#[test]
fn test_axis_mapping_failure_propagates() {
    let doc = doc_with(create_ramp_grid(2, 2));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    // the grid starts at zero, which a log axis cannot place
    let x = LogAxis::new(1.0, 10.0, AxisDirection::Horizontal);
    let y = LinearAxis::vertical(0.0, 2.0);

    let err = plot
        .draw(&doc, Axes::new(&x, &y), &BOUNDS_4, &mut surface)
        .unwrap_err();
    assert!(matches!(err, PlotError::AxisMapping(_)));
}

// ============================================================================
// Rendering tests
// ============================================================================

#[test]
fn test_uniform_grid_renders_base_raster() {
    let grid = create_ramp_grid(4, 4);
    let doc = doc_with(grid.clone());
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    draw(&mut plot, &doc, &mut surface).unwrap();

    let grey = Colormap::named("grey").unwrap();
    let expected = apply_color_map(&grey, ColorScaling::Linear, &grid, 0.0, 15.0, 0, None).unwrap();
    assert_eq!(plot.cache().image().unwrap().raster, expected);
    assert_eq!(surface.to_raster().unwrap(), expected);

    // top-left shows the highest data row
    assert_eq!(surface.pixel(0, 0), expected.pixel(0, 0));
    assert_eq!(surface.pixel(3, 0), Some([255, 255, 255, 255]));
    assert_eq!(surface.pixel(0, 3), Some([0, 0, 0, 255]));
}

#[test]
fn test_oversized_image_is_clipped() {
    let doc = doc_with(create_ramp_grid(4, 4));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    // data 1..3 fills the viewport, two pixels per cell
    let x = LinearAxis::horizontal(1.0, 3.0);
    let y = LinearAxis::vertical(1.0, 3.0);
    plot.draw(&doc, Axes::new(&x, &y), &BOUNDS_4, &mut surface)
        .unwrap();

    let grey = Colormap::named("grey").unwrap();
    let color = |v: f64| grey.color_at(v / 15.0);
    // top-left is data column 1, row 2; bottom-right is column 2, row 1
    assert_eq!(surface.pixel(0, 0), Some(color(9.0)));
    assert_eq!(surface.pixel(1, 1), Some(color(9.0)));
    assert_eq!(surface.pixel(3, 3), Some(color(6.0)));
}

#[test]
fn test_inverted_axis_mirrors_image() {
    let doc = doc_with(create_ramp_grid(4, 1).with_yrange(0.0, 4.0));
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    let x = LinearAxis::horizontal(0.0, 4.0).inverted();
    let y = LinearAxis::vertical(0.0, 4.0);
    plot.draw(&doc, Axes::new(&x, &y), &BOUNDS_4, &mut surface)
        .unwrap();

    assert_eq!(surface.pixel(0, 2), Some([255, 255, 255, 255]));
    assert_eq!(surface.pixel(3, 2), Some([0, 0, 0, 255]));
    assert_eq!(surface.depth(), 0);
}

#[test]
fn test_nonlinear_grid_renders_cells_at_edges() {
    // one narrow and one wide column over x 0..4
    let grid = ScalarGrid::new(2, 1, vec![0.0, 1.0])
        .unwrap()
        .with_yrange(0.0, 4.0)
        .with_xgrid(vec![0.0, 1.0, 4.0])
        .unwrap();
    let doc = doc_with(grid);
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    draw(&mut plot, &doc, &mut surface).unwrap();

    assert_eq!(surface.pixel(0, 1), Some([0, 0, 0, 255]));
    assert_eq!(surface.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(surface.pixel(3, 1), Some([255, 255, 255, 255]));
}

#[test]
fn test_transparency_mask_scales_alpha() {
    let mut doc = doc_with(ScalarGrid::new(2, 1, vec![1.0, 1.0]).unwrap());
    doc.insert("mask", ScalarGrid::new(2, 1, vec![0.0, 0.5]).unwrap());
    let settings = ImageSettings::from_json(fixtures::settings::MASKED).unwrap();
    let mut plot = ImagePlot::new(settings).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    draw(&mut plot, &doc, &mut surface).unwrap();

    let raster = &plot.cache().image().unwrap().raster;
    assert_eq!(raster.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(raster.pixel(1, 0).unwrap()[3], 128);
}

#[test]
fn test_transposed_mask_is_rejected() {
    let mut doc = doc_with(create_ramp_grid(2, 3));
    doc.insert("mask", ScalarGrid::new(3, 2, vec![1.0; 6]).unwrap());
    let settings = ImageSettings::from_json(fixtures::settings::MASKED).unwrap();
    let mut plot = ImagePlot::new(settings).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();

    let err = draw(&mut plot, &doc, &mut surface).unwrap_err();
    assert!(matches!(err, PlotError::ShapeMismatch { .. }));
    assert!(is_blank(&surface));
    assert!(plot.cache().image().is_none());
}

#[test]
fn test_settings_fixture_parses_into_plot() {
    let settings = ImageSettings::from_json(fixtures::settings::HEAT_LOG).unwrap();
    let doc = doc_with(create_ramp_grid(4, 4));
    let mut plot = ImagePlot::new(settings).unwrap();

    assert_eq!(plot.user_description(), "img, log, heat");
    let params = plot.colorbar_parameters(&doc);
    assert_eq!((params.min, params.max), (0.0, 20.0));
    assert_eq!(params.scaling, ColorScaling::Log);
    assert_eq!(params.transparency, 25);
    assert!(params.invert);
    assert!(doc.dataset("img").is_some());
}

#[test]
fn test_fixture_document_in_offset_viewport() {
    let doc = MemoryDocument::from_json(documents::UNIFORM_4X4).unwrap();
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(300, 150).unwrap();
    let (x, y) = unit_axes();
    plot.draw(&doc, Axes::new(&x, &y), &viewports::WIDE_OFFSET, &mut surface)
        .unwrap();

    // 50x25 plotter units per cell
    assert_eq!(surface.pixel(60, 110), Some([0, 0, 0, 255]));
    assert_eq!(surface.pixel(240, 30), Some([255, 255, 255, 255]));
    assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0]));
    assert_eq!(surface.pixel(260, 60), Some([0, 0, 0, 0]));
}

#[test]
fn test_nan_cells_are_transparent() {
    let values = create_grid_with_nans(4, 4, &[(1, 2)]);
    let doc = doc_with(ScalarGrid::new(4, 4, values).unwrap());
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();
    let mut surface = PixmapSurface::new(4, 4).unwrap();
    draw(&mut plot, &doc, &mut surface).unwrap();

    // data row 2 is the second raster row from the top
    assert_eq!(surface.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(surface.pixel(0, 1).unwrap()[3], 255);
    assert_eq!(surface.pixel(1, 2).unwrap()[3], 255);
}

#[test]
fn test_colorbar_range_tracks_values() {
    let values = create_noisy_values(16, 8, 42);
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let doc = doc_with(ScalarGrid::new(16, 8, values).unwrap());
    let mut plot = ImagePlot::new(ImageSettings::for_dataset("img")).unwrap();

    let params = plot.colorbar_parameters(&doc);
    assert_approx_eq!(params.min, lo, 1e-12);
    assert_approx_eq!(params.max, hi, 1e-12);
    assert_eq!(params.colormap, "grey");

    let mut surface = PixmapSurface::new(100, 100).unwrap();
    let x = LinearAxis::horizontal(0.0, 16.0);
    let y = LinearAxis::vertical(0.0, 8.0);
    plot.draw(&doc, Axes::new(&x, &y), &viewports::SQUARE_100, &mut surface)
        .unwrap();
    assert_eq!(plot.cache().image().unwrap().raster.dimensions(), (16, 8));
}
