//! Common types shared across the image plotting crates.

pub mod document;
pub mod error;
pub mod grid;
pub mod rect;

pub use document::{Document, MemoryDocument};
pub use error::{PlotError, PlotResult};
pub use grid::{Dataset, DatasetToken, ScalarGrid};
pub use rect::{PlotterRect, Span};
