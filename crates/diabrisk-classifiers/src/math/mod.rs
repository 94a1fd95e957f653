//! Small ndarray-like containers used by the data pipeline.
//!
//! `Array2` holds row-major samples x features, `Array1` holds per-sample
//! values such as labels. Both stay dependency-free.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
