//! 2D affine matrix math
//!
//! Matrices are stored the way a canvas `setTransform` call expects them:
//! `[a, b, c, d, e, f]` represents
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! Row-major form (`[[a, c, e], [b, d, f]]`) is what the camera works in.

use std::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// 2D point / vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    /// Point at (x, y)
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, other: Point2) -> Point2 {
        Point2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, other: Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Row-major 2x3 matrix as the camera computes it: `[[a, c, e], [b, d, f]]`
pub type RowMajor = [[f64; 3]; 2];

/// Affine 2D transform, homogeneous row omitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2x3(pub [f64; 6]);

impl Matrix2x3 {
    pub const IDENTITY: Matrix2x3 = Matrix2x3([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Build from canvas-order components
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self([a, b, c, d, e, f])
    }

    /// Reinterpret a row-major `[[a, c, e], [b, d, f]]` matrix.
    pub fn from_row_major(m: &RowMajor) -> Self {
        Self([m[0][0], m[1][0], m[0][1], m[1][1], m[0][2], m[1][2]])
    }

    /// Inverse of `from_row_major`
    pub fn to_row_major(&self) -> RowMajor {
        let [a, b, c, d, e, f] = self.0;
        [[a, c, e], [b, d, f]]
    }

    /// Scale by `sx` horizontally and `sy` vertically, no translation.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    pub fn a(&self) -> f64 { self.0[0] }
    pub fn b(&self) -> f64 { self.0[1] }
    pub fn c(&self) -> f64 { self.0[2] }
    pub fn d(&self) -> f64 { self.0[3] }
    pub fn e(&self) -> f64 { self.0[4] }
    pub fn f(&self) -> f64 { self.0[5] }

    /// `self * rhs`: `rhs` is applied first, then `self`.
    pub fn multiply(&self, rhs: &Matrix2x3) -> Matrix2x3 {
        let [a11, a12, a21, a22, a31, a32] = self.0;
        let [b11, b12, b21, b22, b31, b32] = rhs.0;
        Matrix2x3([
            a11 * b11 + a21 * b12,
            a12 * b11 + a22 * b12,
            a11 * b21 + a21 * b22,
            a12 * b21 + a22 * b22,
            a11 * b31 + a21 * b32 + a31,
            a12 * b31 + a22 * b32 + a32,
        ])
    }

    pub fn determinant(&self) -> f64 {
        self.a() * self.d() - self.b() * self.c()
    }

    /// Standard affine inverse. A zero (or non-finite) determinant is a
    /// configuration error, never a NaN-filled matrix.
    pub fn inverse(&self) -> Result<Matrix2x3> {
        let [a, b, c, d, e, f] = self.0;
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return Err(EngineError::degenerate(format!(
                "cannot invert matrix {:?} (determinant {})",
                self.0, det
            )));
        }
        Ok(Matrix2x3([
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * f - d * e) / det,
            (b * e - a * f) / det,
        ]))
    }

    pub fn apply(&self, p: Point2) -> Point2 {
        let [a, b, c, d, e, f] = self.0;
        Point2 {
            x: a * p.x + c * p.y + e,
            y: b * p.x + d * p.y + f,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Default for Matrix2x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix2x3 {
    type Output = Matrix2x3;
    fn mul(self, rhs: Matrix2x3) -> Matrix2x3 {
        self.multiply(&rhs)
    }
}

/// Relative float comparison used by the tests across the crate.
#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= 1e-9 * scale
}

#[cfg(test)]
pub(crate) fn matrix_approx_eq(m: &Matrix2x3, n: &Matrix2x3) -> bool {
    m.0.iter().zip(n.0.iter()).all(|(a, b)| approx_eq(*a, *b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_round_trip_layout() {
        let rm: RowMajor = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let m = Matrix2x3::from_row_major(&rm);
        // a=1, b=4, c=2, d=5, e=3, f=6
        assert_eq!(m.0, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(m.to_row_major(), rm);
    }

    #[test]
    fn test_apply_matches_row_major_reading() {
        let m = Matrix2x3::from_row_major(&[[2.0, 0.5, 10.0], [0.25, -3.0, 7.0]]);
        let p = m.apply(Point2::new(4.0, 2.0));
        assert!(approx_eq(p.x, 2.0 * 4.0 + 0.5 * 2.0 + 10.0));
        assert!(approx_eq(p.y, 0.25 * 4.0 - 3.0 * 2.0 + 7.0));
    }

    #[test]
    fn test_multiply_applies_rhs_first() {
        let translate = Matrix2x3::new(1.0, 0.0, 0.0, 1.0, 5.0, 0.0);
        let scale = Matrix2x3::scaling(2.0, 2.0);
        let p = Point2::new(1.0, 1.0);

        // scale then translate
        let st = translate * scale;
        assert_eq!(st.apply(p), Point2::new(7.0, 2.0));
        // translate then scale
        let ts = scale * translate;
        assert_eq!(ts.apply(p), Point2::new(12.0, 2.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = Matrix2x3::new(300.0, 0.2, -0.7, -300.0, 400.0, 300.0);
        let inv = m.inverse().unwrap();
        let p = Point2::new(-12.5, 3.25);
        let back = inv.apply(m.apply(p));
        assert!(approx_eq(back.x, p.x));
        assert!(approx_eq(back.y, p.y));
        assert!(matrix_approx_eq(&(m * inv), &Matrix2x3::IDENTITY));
    }

    #[test]
    fn test_inverse_of_singular_matrix_fails() {
        let m = Matrix2x3::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        let err = m.inverse().unwrap_err();
        assert!(matches!(err, EngineError::DegenerateTransform { .. }));
    }

    #[test]
    fn test_inverse_of_infinite_matrix_fails() {
        let m = Matrix2x3::new(f64::INFINITY, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert!(m.inverse().is_err());
    }
}
