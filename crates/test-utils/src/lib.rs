//! Test helpers shared by the image-plot crates.
//!
//! - `generators`: ramp, NaN, noise and edge-grid data plus traceable RGBA pixels
//! - `fixtures`: document and settings JSON, plotter viewports
//! - `paths`: scratch directories and fixture files
//!
//! Pulled in as a dev-dependency (`test-utils = { path = "../test-utils" }`).

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use generators::*;
pub use paths::*;

/// Assert two numbers differ by at most `epsilon`; both sides are cast to `f64`.
///
/// ```ignore
/// assert_approx_eq!(plot_x, 12.5, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: {:?} and {:?} differ by {:?} (epsilon {:?})",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of placement spans.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_span_approx_eq;
///
/// assert_span_approx_eq!(Span::new(0.0001, 9.9999), (0.0, 10.0), 0.001);
/// ```
#[macro_export]
macro_rules! assert_span_approx_eq {
    ($span:expr, ($start:expr, $end:expr), $epsilon:expr) => {{
        let span = $span;
        $crate::assert_approx_eq!(span.start, $start, $epsilon);
        $crate::assert_approx_eq!(span.end, $end, $epsilon);
    }};
}
