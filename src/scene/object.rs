//! Game objects
//!
//! A game object is anything with a transform that can update, draw itself
//! in its own local space and react to pointer events. Every hook except
//! the transform accessors has a no-op default.

use crate::math::{Point2, Transform};
use crate::render::{Surface, TransformStack};

pub trait GameObject {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    fn update(&mut self, _dt: f64) {}

    /// Draw in local coordinates; the composed matrix is already installed.
    fn draw(&self, _surface: &mut dyn Surface) {}

    /// Hit test. `point` is in the coordinate space of the owning container.
    fn event_inside(&self, _point: Point2) -> bool {
        false
    }

    /// Returns true when the event was handled.
    fn on_click(&mut self, _point: Point2) -> bool {
        false
    }

    fn on_press(&mut self, _point: Point2) -> bool {
        false
    }

    fn on_release(&mut self, _point: Point2) -> bool {
        false
    }
}

/// push -> draw -> pop for one object
pub fn draw_object(object: &dyn GameObject, stack: &mut TransformStack, surface: &mut dyn Surface) {
    stack.scoped(object.transform(), surface, |_, surface| object.draw(surface));
}
