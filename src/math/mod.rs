//! Fixed-shape matrix type used for every gather element.
//!
//! `Array2` is a row-major buffer with explicit dimensions. Gathers are
//! sequences of `Array2` values, and the reindexing routines copy whole rows
//! between them, so row access is the main thing this type optimizes for.
pub mod matrix;

pub use matrix::{Array2, ShapeError};
