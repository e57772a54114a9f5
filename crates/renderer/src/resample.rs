//! Resampling of rasters defined over non-uniform edge grids.
//!
//! Each source cell spans an interval between two adjacent edges. The output
//! raster is uniform, sized so the narrowest source cell covers at least two
//! output pixels, and every output pixel takes the color of the source cell
//! containing its center. Edge lists may run in either direction; the
//! output always runs from the smallest coordinate to the largest.

use crate::raster::PixelRaster;
use plot_common::{PlotError, PlotResult, Span};
use tracing::debug;

/// Largest output size along either axis.
pub const MAX_RESAMPLE_SIZE: usize = 1024;

/// Resample `raster` onto a uniform grid.
///
/// `xpts` holds the column edges (`width + 1` entries) and `ypts` the row
/// edges (`height + 1` entries), both in raster order. The result covers
/// the span returned by [`edge_extent`] for the same edges.
///
/// Output column 0 and row 0 always sit at the lowest coordinate; the order
/// of the input edges is not kept.
pub fn resample_linear(raster: &PixelRaster, xpts: &[f64], ypts: &[f64]) -> PlotResult<PixelRaster> {
    let (width, height) = raster.dimensions();
    let cols = AxisPlan::new("x", xpts, width as usize)?;
    let rows = AxisPlan::new("y", ypts, height as usize)?;

    debug!(
        src_width = width,
        src_height = height,
        out_width = cols.index.len(),
        out_height = rows.index.len(),
        "Resampling non-linear grid"
    );

    let mut out = PixelRaster::new(cols.index.len() as u32, rows.index.len() as u32);
    for (oy, &sy) in rows.index.iter().enumerate() {
        for (ox, &sx) in cols.index.iter().enumerate() {
            if let Some(px) = raster.pixel(sx as u32, sy as u32) {
                out.put_pixel(ox as u32, oy as u32, px);
            }
        }
    }
    Ok(out)
}

/// Plotter extent covered by edge lists, as placement spans.
///
/// The x span runs low to high; the y span is stored high to low.
pub fn edge_extent(xpts: &[f64], ypts: &[f64]) -> (Span, Span) {
    let (xmin, xmax) = bounds(xpts);
    let (ymin, ymax) = bounds(ypts);
    (Span::new(xmin, xmax), Span::new(ymax, ymin))
}

/// Output size along one axis for ascending edges.
fn output_size(edges: &[f64], mindelta: f64) -> usize {
    let lo = edges[0];
    let hi = edges[edges.len() - 1];
    let size = ((hi - lo) / (mindelta * 0.5) + 0.01) as usize;
    size.clamp(1, MAX_RESAMPLE_SIZE)
}

/// Source index for every output pixel along one axis.
struct AxisPlan {
    index: Vec<usize>,
}

impl AxisPlan {
    fn new(axis: &str, pts: &[f64], cells: usize) -> PlotResult<Self> {
        if cells == 0 {
            return Err(PlotError::invalid_grid(format!("{axis} axis has no cells")));
        }
        if pts.len() != cells + 1 {
            return Err(PlotError::invalid_grid(format!(
                "{axis} edge grid has {} entries for {cells} cells",
                pts.len()
            )));
        }
        if pts.iter().any(|v| !v.is_finite()) {
            return Err(PlotError::invalid_grid(format!(
                "{axis} edge grid has non-finite entries"
            )));
        }

        let descending = pts[0] > pts[cells];
        let mut edges = pts.to_vec();
        if descending {
            edges.reverse();
        }

        let mindelta = edges
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f64::INFINITY, f64::min);
        if mindelta <= 0.0 {
            return Err(PlotError::invalid_grid(format!(
                "{axis} edge grid is not strictly monotonic"
            )));
        }

        let size = output_size(&edges, mindelta);
        let lo = edges[0];
        let step = (edges[cells] - lo) / size as f64;

        // Cell k covers [edges[k], edges[k + 1]); centers only increase, so
        // the cursor never moves back.
        let mut k = 0;
        let index = (0..size)
            .map(|i| {
                let center = lo + (i as f64 + 0.5) * step;
                while k + 1 < cells && center >= edges[k + 1] {
                    k += 1;
                }
                if descending {
                    cells - 1 - k
                } else {
                    k
                }
            })
            .collect();

        Ok(Self { index })
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(values: &[u8]) -> PixelRaster {
        let mut raster = PixelRaster::new(values.len() as u32, 1);
        for (x, &v) in values.iter().enumerate() {
            raster.put_pixel(x as u32, 0, [v, 0, 0, 255]);
        }
        raster
    }

    fn red_row(raster: &PixelRaster) -> Vec<u8> {
        (0..raster.width())
            .map(|x| raster.pixel(x, 0).unwrap()[0])
            .collect()
    }

    #[test]
    fn test_uniform_edges_double_resolution() {
        let raster = columns(&[10, 20, 30]);
        let out = resample_linear(&raster, &[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0]).unwrap();
        assert_eq!(out.dimensions(), (6, 2));
        assert_eq!(red_row(&out), vec![10, 10, 20, 20, 30, 30]);
    }

    #[test]
    fn test_uneven_edges() {
        let raster = columns(&[1, 2]);
        // cell 0 is 1 wide, cell 1 is 3 wide
        let out = resample_linear(&raster, &[0.0, 1.0, 4.0], &[0.0, 1.0]).unwrap();
        assert_eq!(out.width(), 8);
        assert_eq!(red_row(&out), vec![1, 1, 2, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_descending_edges_keep_geometry() {
        let raster = columns(&[1, 2, 3]);
        let out = resample_linear(&raster, &[3.0, 2.0, 0.0, -1.0], &[0.0, 1.0]).unwrap();
        // lowest coordinate belongs to the last source column
        assert_eq!(red_row(&out), vec![3, 3, 2, 2, 2, 2, 1, 1]);
    }

    #[test]
    fn test_size_capped() {
        let raster = columns(&[1, 2]);
        let out = resample_linear(&raster, &[0.0, 0.0001, 100.0], &[0.0, 1.0]).unwrap();
        assert_eq!(out.width() as usize, MAX_RESAMPLE_SIZE);
        assert_eq!(out.height(), 2);
        // the sliver cell is narrower than one output pixel
        assert!(red_row(&out).iter().all(|&v| v == 2));
    }

    #[test]
    fn test_single_cell() {
        let raster = columns(&[9]);
        let out = resample_linear(&raster, &[5.0, 6.0], &[2.0, 1.0]).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.pixel(1, 1).unwrap()[0], 9);
    }

    #[test]
    fn test_degenerate_edges_rejected() {
        let raster = columns(&[1, 2]);
        let cases: [&[f64]; 4] = [
            &[1.0, 1.0, 1.0],
            &[0.0, 2.0, 1.0],
            &[0.0, 1.0],
            &[0.0, f64::NAN, 2.0],
        ];
        for xpts in cases {
            let err = resample_linear(&raster, xpts, &[0.0, 1.0]).unwrap_err();
            assert!(err.is_skippable(), "{xpts:?}");
        }
        assert!(resample_linear(&PixelRaster::new(0, 1), &[0.0], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_edge_extent() {
        let (x, y) = edge_extent(&[4.0, 0.0, 2.0], &[10.0, 30.0]);
        assert_eq!(x, Span::new(0.0, 4.0));
        assert_eq!(y, Span::new(30.0, 10.0));
    }
}
