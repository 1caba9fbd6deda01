//! Layers
//!
//! A layer is an intermediate transform scope between the world and its
//! objects. Its optional behavior runs after the camera has updated, so it
//! can follow this tick's camera position (parallax backgrounds, HUD-like
//! world layers).

use crate::camera::Camera;
use crate::math::{Matrix2x3, Point2, Transform};
use crate::render::{Surface, TransformStack};

use super::object::{draw_object, GameObject};
use super::slots::{ObjectId, ObjectSlots};

/// Post-camera layer logic
pub trait LayerBehavior {
    fn update(&mut self, transform: &mut Transform, camera: &Camera, dt: f64);
}

/// Moves the layer with the camera by a per-axis factor.
///
/// 0.0 keeps the layer fixed in the world, 1.0 pins it to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub factor_x: f64,
    pub factor_y: f64,
}

impl Parallax {
    pub fn new(factor_x: f64, factor_y: f64) -> Self {
        Self { factor_x, factor_y }
    }
}

impl LayerBehavior for Parallax {
    fn update(&mut self, transform: &mut Transform, camera: &Camera, _dt: f64) {
        let cam = camera.position();
        transform.position = Point2::new(cam.x * self.factor_x, cam.y * self.factor_y);
    }
}

#[derive(Default)]
pub struct Layer {
    pub transform: Transform,
    objects: ObjectSlots<dyn GameObject>,
    behavior: Option<Box<dyn LayerBehavior>>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_behavior(mut self, behavior: impl LayerBehavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn add(&mut self, object: impl GameObject + 'static) -> ObjectId {
        self.objects.insert(Box::new(object))
    }

    pub fn add_boxed(&mut self, object: Box<dyn GameObject>) -> ObjectId {
        self.objects.insert(object)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        self.objects.remove(id)
    }

    pub fn objects(&self) -> &ObjectSlots<dyn GameObject> {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectSlots<dyn GameObject> {
        &mut self.objects
    }

    /// Object updates (before the camera)
    pub fn update_objects(&mut self, dt: f64) {
        for (_, object) in self.objects.iter_mut() {
            object.update(dt);
        }
    }

    /// Layer's own hook (after the camera)
    pub fn update(&mut self, camera: &Camera, dt: f64) {
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.update(&mut self.transform, camera, dt);
        }
    }

    pub fn draw(&self, stack: &mut TransformStack, surface: &mut dyn Surface) {
        stack.push(&self.transform);
        for (_, object) in self.objects.iter() {
            draw_object(object, stack, surface);
        }
        stack.pop();
    }

    /// Map a world-space point into this layer's local space.
    /// `None` if the layer transform cannot be inverted (zero scale).
    pub fn to_local(&self, world: Point2) -> Option<Point2> {
        match self.transform.to_matrix().inverse() {
            Ok(inv) => Some(inv.apply(world)),
            Err(e) => {
                log::warn!("layer not hit-testable: {}", e);
                None
            }
        }
    }

    /// Matrix from this layer's local space to world space
    pub fn local_matrix(&self) -> Matrix2x3 {
        self.transform.to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::approx_eq;

    #[test]
    fn test_parallax_follows_camera_by_factor() {
        let mut layer = Layer::new().with_behavior(Parallax::new(0.5, 0.0));
        let mut camera = Camera::default();
        camera.set_position(4.0, 2.0);

        layer.update(&camera, 0.016);
        assert_eq!(layer.transform.position, Point2::new(2.0, 0.0));
    }

    #[test]
    fn test_to_local_inverts_layer_transform() {
        let layer = Layer::new()
            .with_transform(Transform::from_position(10.0, 0.0).with_scale(2.0, 2.0));
        let local = layer.to_local(Point2::new(14.0, 6.0)).unwrap();
        assert!(approx_eq(local.x, 2.0));
        assert!(approx_eq(local.y, 3.0));
        let world = layer.local_matrix().apply(local);
        assert!(approx_eq(world.x, 14.0));
    }

    #[test]
    fn test_zero_scale_layer_is_not_hit_testable() {
        let layer = Layer::new().with_transform(Transform::IDENTITY.with_scale(0.0, 1.0));
        assert!(layer.to_local(Point2::new(1.0, 1.0)).is_none());
    }
}
