//! Plotter-space rectangles and placement spans.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in plotter (device) coordinates.
///
/// Plotter space has y growing downwards, so `top <= bottom` for a
/// well-formed viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotterRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotterRect {
    /// Create a new rectangle from its edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and size.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width of the rectangle in plotter units.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the rectangle in plotter units.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Check if this rectangle intersects another.
    pub fn intersects(&self, other: &PlotterRect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Compute the intersection of two rectangles.
    pub fn intersection(&self, other: &PlotterRect) -> Option<PlotterRect> {
        if !self.intersects(other) {
            return None;
        }

        Some(PlotterRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        })
    }

    /// Check if a point is contained within this rectangle.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Check whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &PlotterRect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Build the rectangle covered by an x span and a (high-to-low) y span.
    pub fn from_spans(x: Span, y: Span) -> Self {
        Self::new(x.min(), y.min(), x.max(), y.max())
    }
}

/// A pair of plotter coordinates along one axis.
///
/// The order of the endpoints carries orientation, not magnitude: a span
/// whose `end` is smaller than its `start` describes an inverted axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    /// Create a span from its two endpoints.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Signed length (`end - start`).
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Smaller endpoint.
    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    /// Larger endpoint.
    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }

    /// True when the endpoints are in descending order.
    pub fn is_descending(&self) -> bool {
        self.end < self.start
    }

    /// The same span with its endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

impl From<(f64, f64)> for Span {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}
