//! Synthetic grids, edge grids and rasters with predictable contents.

use plot_common::ScalarGrid;

/// Row-major values where each cell holds its own index (`row * width + col`).
///
/// # Example
///
/// ```
/// use test_utils::create_ramp_values;
///
/// let values = create_ramp_values(4, 2);
/// assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
/// ```
pub fn create_ramp_values(width: usize, height: usize) -> Vec<f64> {
    (0..width * height).map(|i| i as f64).collect()
}

/// A grid of [`create_ramp_values`] with one data unit per cell.
pub fn create_ramp_grid(width: usize, height: usize) -> ScalarGrid {
    ScalarGrid::new(width, height, create_ramp_values(width, height))
        .expect("ramp values match grid shape")
}

/// Edges splitting `start..end` into `cells` equal cells.
///
/// `end` may be below `start` for descending edges.
pub fn create_uniform_edges(start: f64, end: f64, cells: usize) -> Vec<f64> {
    let step = (end - start) / cells.max(1) as f64;
    (0..=cells).map(|i| start + step * i as f64).collect()
}

/// Edges starting at `start` whose cell widths grow by `ratio` per cell.
///
/// The first cell is `first` wide.
pub fn create_stretched_edges(start: f64, first: f64, ratio: f64, cells: usize) -> Vec<f64> {
    let mut edges = Vec::with_capacity(cells + 1);
    let mut edge = start;
    let mut width = first;
    edges.push(edge);
    for _ in 0..cells {
        edge += width;
        width *= ratio;
        edges.push(edge);
    }
    edges
}

/// A grid with NaN at the given `(col, row)` positions and zeros elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f64> {
    let mut data = vec![0.0; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f64::NAN;
        }
    }
    data
}

/// Deterministic pseudo-random values in `0..100`.
pub fn create_noisy_values(width: usize, height: usize, seed: u32) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 10_000) as f64 / 100.0);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Opaque RGBA pixels whose red channel is the column and green the row.
///
/// Every pixel of a raster up to 256x256 is distinct, so resampled or
/// cropped output can be traced back to its source pixel.
pub fn create_indexed_rgba_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
        }
    }
    pixels
}
