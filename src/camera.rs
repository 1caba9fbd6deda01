//! 2D camera: canonical screen space to surface pixels
//!
//! World objects are authored in a device-independent space where the
//! minimum viewport (default 2x2 units, y-up) is always visible. The camera
//! turns that into a surface-pixel matrix, letter-boxing when the aspect
//! ratio must be kept.
//!
//! Two derived quantities:
//! - forward matrix: recomputed by `update_transform` (lazily, when dirty)
//! - inverse matrix: cached, dropped whenever the forward matrix changes or
//!   the camera is mutated, rebuilt on the next read

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::math::{Matrix2x3, Point2, RowMajor, Transform};
use crate::render::{Surface, TransformStack};

/// Logical screen rectangle the camera parameters are authored in.
/// Spans roughly [-1, 1] per axis by convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalSpace {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CanonicalSpace {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            width: 2.0,
            height: 2.0,
        }
    }
}

/// Portion of world space guaranteed to be visible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinViewport {
    pub width: f64,
    pub height: f64,
    /// Uniform scale (letter-box) instead of stretching each axis
    pub keep_aspect: bool,
    /// Center the letter-boxed viewport; otherwise anchor it top-left
    pub center: bool,
}

impl Default for MinViewport {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 2.0,
            keep_aspect: true,
            center: true,
        }
    }
}

/// Optional camera logic: movement during the update pass and a drawable
/// (e.g. a reticle) rendered in the camera's own local space.
pub trait CameraBehavior {
    fn update(&mut self, _transform: &mut Transform, _dt: f64) {}
    fn draw(&self, _surface: &mut dyn Surface) {}
}

pub struct Camera {
    transform: Transform,
    canonical: CanonicalSpace,
    viewport: MinViewport,
    forward: RowMajor,
    /// `None` means stale
    inverse: Option<RowMajor>,
    forward_dirty: bool,
    behavior: Option<Box<dyn CameraBehavior>>,
}

impl Camera {
    /// Camera at the origin; dirty until the first `update_transform`.
    pub fn new(canonical: CanonicalSpace, viewport: MinViewport) -> Self {
        Self {
            transform: Transform::IDENTITY,
            canonical,
            viewport,
            forward: Matrix2x3::IDENTITY.to_row_major(),
            inverse: None,
            forward_dirty: true,
            behavior: None,
        }
    }

    /// Builder form of `set_behavior`
    pub fn with_behavior(mut self, behavior: impl CameraBehavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Install or remove the camera behavior
    pub fn set_behavior(&mut self, behavior: Option<Box<dyn CameraBehavior>>) {
        self.behavior = behavior;
    }

    // =========================================================================
    // Parameters (every mutation invalidates)
    // =========================================================================

    /// Camera transform in world space
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World point shown at the canonical centre
    pub fn position(&self) -> Point2 {
        self.transform.position
    }

    /// Replace the camera transform (invalidates)
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.invalidate();
    }

    /// Move the camera to a world position (invalidates)
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.transform.position = Point2::new(x, y);
        self.invalidate();
    }

    /// Move the camera by a world-space delta (invalidates)
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
        self.invalidate();
    }

    /// Logical screen rectangle
    pub fn canonical_space(&self) -> &CanonicalSpace {
        &self.canonical
    }

    /// Replace the logical screen rectangle (invalidates)
    pub fn set_canonical_space(&mut self, canonical: CanonicalSpace) {
        self.canonical = canonical;
        self.invalidate();
    }

    /// Minimum visible region
    pub fn viewport(&self) -> &MinViewport {
        &self.viewport
    }

    /// Replace the minimum visible region (invalidates)
    pub fn set_viewport(&mut self, viewport: MinViewport) {
        self.viewport = viewport;
        self.invalidate();
    }

    /// Resize signal: forward matrix must be recomputed before next draw.
    pub fn mark_dirty(&mut self) {
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.forward_dirty = true;
        self.inverse = None;
    }

    /// Forward matrix needs recomputing
    pub fn is_dirty(&self) -> bool {
        self.forward_dirty
    }

    /// Inverse will be rebuilt on next read
    pub fn is_inverse_stale(&self) -> bool {
        self.inverse.is_none()
    }

    // =========================================================================
    // Forward transform
    // =========================================================================

    /// Recompute the forward matrix for a surface of the given pixel size.
    pub fn update_transform(&mut self, surface_width: f64, surface_height: f64) -> Result<()> {
        let vp = self.viewport;
        if vp.width == 0.0 || vp.height == 0.0 || !vp.width.is_finite() || !vp.height.is_finite() {
            let err = EngineError::degenerate(format!(
                "minimum viewport must be non-zero and finite (got {}x{})",
                vp.width, vp.height
            ));
            log::error!("{}", err);
            return Err(err);
        }

        let mut scx = surface_width / vp.width;
        let mut scy = surface_height / vp.height;
        if vp.keep_aspect {
            let s = scx.min(scy);
            scx = s;
            scy = s;
        }
        if scx == 0.0 || scy == 0.0 || !scx.is_finite() || !scy.is_finite() {
            let err = EngineError::degenerate(format!(
                "camera scale {}x{} for surface {}x{}",
                scx, scy, surface_width, surface_height
            ));
            log::error!("{}", err);
            return Err(err);
        }

        let css = self.canonical;
        let (offset_x, offset_y) = if vp.keep_aspect && !vp.center {
            // Minimum viewport's top-left corner on the surface's top-left
            (scx * vp.width / 2.0, scy * vp.height / 2.0)
        } else {
            (
                surface_width * css.width / 4.0 + css.center_x * scx,
                surface_height * css.height / 4.0 - css.center_y * scy,
            )
        };

        let pos = self.transform.position;
        // Surface is y-down, canonical space is y-up
        let forward = [
            [scx, 0.0, offset_x - pos.x * scx],
            [0.0, -scy, pos.y * scy + offset_y],
        ];
        if !Matrix2x3::from_row_major(&forward).is_finite() {
            let err = EngineError::degenerate(format!(
                "non-finite camera matrix {:?} (position {:?}, canonical {:?})",
                forward, pos, css
            ));
            log::error!("{}", err);
            return Err(err);
        }
        self.forward = forward;
        self.forward_dirty = false;
        self.inverse = None;
        Ok(())
    }

    /// Recompute only if a resize or mutation marked the camera dirty.
    pub fn refresh(&mut self, surface_width: f64, surface_height: f64) -> Result<()> {
        if self.forward_dirty {
            self.update_transform(surface_width, surface_height)?;
        }
        Ok(())
    }

    /// Forward matrix in row-major form, as the transform stack consumes it
    pub fn forward_row_major(&self) -> &RowMajor {
        &self.forward
    }

    /// Forward matrix in canvas order
    pub fn forward_matrix(&self) -> Matrix2x3 {
        Matrix2x3::from_row_major(&self.forward)
    }

    /// World point to surface pixels using the current forward matrix.
    pub fn to_surface_coordinates(&self, world: Point2) -> Point2 {
        self.forward_matrix().apply(world)
    }

    // =========================================================================
    // Inverse transform
    // =========================================================================

    /// Invert the current forward matrix and cache it.
    pub fn update_inverse_transform(&mut self) -> Result<()> {
        let inverse = self.forward_matrix().inverse().map_err(|e| {
            log::error!("camera inverse failed: {}", e);
            e
        })?;
        self.inverse = Some(inverse.to_row_major());
        Ok(())
    }

    /// Inverse matrix, rebuilt first if stale.
    pub fn inverse_matrix(&mut self) -> Result<Matrix2x3> {
        if self.inverse.is_none() {
            self.update_inverse_transform()?;
        }
        match &self.inverse {
            Some(rm) => Ok(Matrix2x3::from_row_major(rm)),
            None => Err(EngineError::degenerate("camera inverse unavailable")),
        }
    }

    /// Surface-local pixel coordinates to world coordinates.
    pub fn to_world_coordinates(&mut self, local: Point2) -> Result<Point2> {
        Ok(self.inverse_matrix()?.apply(local))
    }

    // =========================================================================
    // Scene participation
    // =========================================================================

    /// Run the behavior's update; invalidates if it moved the camera.
    pub fn update(&mut self, dt: f64) {
        if let Some(behavior) = self.behavior.as_mut() {
            let before = self.transform;
            behavior.update(&mut self.transform, dt);
            if self.transform != before {
                self.invalidate();
            }
        }
    }

    /// Draw the behavior's drawable in camera-local space.
    pub fn draw(&self, stack: &mut TransformStack, surface: &mut dyn Surface) {
        if let Some(behavior) = self.behavior.as_ref() {
            stack.scoped(&self.transform, surface, |_, surface| behavior.draw(surface));
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CanonicalSpace::default(), MinViewport::default())
    }
}
