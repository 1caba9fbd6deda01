//! Surface pixels to world / GUI coordinates
//!
//! GUI space is [0,1]x[0,1] over the whole surface, independent of the
//! camera. World space goes through the camera's cached inverse.

use crate::camera::Camera;
use crate::error::Result;
use crate::math::Point2;
use crate::render::SurfaceSize;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    surface: SurfaceSize,
}

impl InputMapper {
    pub fn new(surface: SurfaceSize) -> Self {
        Self { surface }
    }

    /// Surface size the mapping was last set for
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn set_surface(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    /// Page coordinates to surface-local pixels, given where the surface's
    /// top-left corner sits on the page. Offsets are rounded to whole pixels.
    pub fn page_to_local(page: Point2, surface_origin: Point2) -> Point2 {
        page - Point2::new(surface_origin.x.round(), surface_origin.y.round())
    }

    /// Normalized GUI coordinates; `None` until the surface has an area.
    pub fn local_to_gui(&self, local: Point2) -> Option<Point2> {
        if self.surface.is_empty() {
            return None;
        }
        Some(Point2::new(
            local.x / self.surface.width as f64,
            local.y / self.surface.height as f64,
        ))
    }

    /// World coordinates through the camera inverse.
    ///
    /// The camera is refreshed first if a resize left it dirty, so the
    /// mapping always matches what the next frame will draw.
    pub fn local_to_world(&self, camera: &mut Camera, local: Point2) -> Result<Point2> {
        camera.refresh(self.surface.width as f64, self.surface.height as f64)?;
        camera.to_world_coordinates(local)
    }
}
