//! Local transform of a scene node
//!
//! A `Transform` is position/rotation/scale relative to the parent scope
//! (world, layer or camera). Composition into the parent scope happens in
//! `TransformStack::push`; this module only knows how to build the local
//! matrix.
//!
//! Local order is scale, then rotate, then translate. Setting `scale.y` to
//! `-1` flips an image's vertical axis without touching rotation, which is how
//! y-down images are drawn into the y-up world.

use serde::{Deserialize, Serialize};

use super::matrix::{Matrix2x3, Point2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point2,
    /// Radians, counter-clockwise in a y-up space
    pub rotation: f64,
    /// Per-axis scale; negative flips the axis
    pub scale: Point2,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Point2::ZERO,
        rotation: 0.0,
        scale: Point2 { x: 1.0, y: 1.0 },
    };

    pub fn from_position(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale = Point2::new(sx, sy);
        self
    }

    /// Image-style transform: y axis flipped so a y-down bitmap reads
    /// upright in y-up world space.
    pub fn flipped_y(mut self) -> Self {
        self.scale.y = -self.scale.y;
        self
    }

    /// Move by (dx, dy) in the parent's space
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position + Point2::new(dx, dy);
    }

    /// Add to the rotation, in radians
    pub fn rotate(&mut self, radians: f64) {
        self.rotation += radians;
    }

    /// The local matrix `B`:
    ///
    /// ```text
    /// | sx*cos  -sy*sin  px |
    /// | sx*sin   sy*cos  py |
    /// ```
    pub fn to_matrix(&self) -> Matrix2x3 {
        let (sin_phi, cos_phi) = self.rotation.sin_cos();
        let (sx, sy) = (self.scale.x, self.scale.y);
        Matrix2x3::new(
            sx * cos_phi,
            sx * sin_phi,
            -sy * sin_phi,
            sy * cos_phi,
            self.position.x,
            self.position.y,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::approx_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_matrix(), Matrix2x3::IDENTITY);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let t = Transform::from_position(10.0, 20.0)
            .with_rotation(FRAC_PI_2)
            .with_scale(2.0, 1.0);
        // (1, 0) -> scaled (2, 0) -> rotated (0, 2) -> translated (10, 22)
        let p = t.to_matrix().apply(Point2::new(1.0, 0.0));
        assert!(approx_eq(p.x, 10.0));
        assert!(approx_eq(p.y, 22.0));
    }

    #[test]
    fn test_flip_y_keeps_rotation_semantics() {
        let t = Transform::IDENTITY.with_rotation(FRAC_PI_2).flipped_y();
        // x axis still rotates to +y
        let px = t.to_matrix().apply(Point2::new(1.0, 0.0));
        assert!(approx_eq(px.x, 0.0));
        assert!(approx_eq(px.y, 1.0));
        // y axis is flipped before rotation: (0,1) -> (0,-1) -> (1,0)
        let py = t.to_matrix().apply(Point2::new(0.0, 1.0));
        assert!(approx_eq(py.x, 1.0));
        assert!(approx_eq(py.y, 0.0));
    }
}
