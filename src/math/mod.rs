//! 2D affine geometry
//!
//! - `Point2` / `Matrix2x3`: canvas-order affine matrices
//! - `Transform`: local position/rotation/scale of a scene node

pub mod matrix;
pub mod transform;

pub use matrix::{Matrix2x3, Point2, RowMajor};
pub use transform::Transform;
