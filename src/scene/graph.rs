//! Scene graph
//!
//! One camera, an ordered list of layers and a list of top-level objects.
//! Traversal order is fixed:
//!
//! - update: layer objects, top-level objects, camera, layer hooks
//! - draw: layers, top-level objects, camera drawable
//!
//! Layer hooks run after the camera so they see this tick's camera state.

use crate::camera::Camera;
use crate::error::Result;
use crate::input::PointerKind;
use crate::math::Point2;
use crate::render::{Color, Surface, SurfaceSize, TransformStack};

use super::layer::Layer;
use super::object::{draw_object, GameObject};
use super::slots::{ObjectId, ObjectSlots};

pub struct SceneGraph {
    pub layers: ObjectSlots<Layer>,
    pub objects: ObjectSlots<dyn GameObject>,
    pub camera: Camera,
    pub background: Color,
}

impl SceneGraph {
    /// Empty scene around `camera`, black background
    pub fn new(camera: Camera) -> Self {
        Self {
            layers: ObjectSlots::new(),
            objects: ObjectSlots::new(),
            camera,
            background: Color::BLACK,
        }
    }

    /// Append a layer; layers draw in insertion order
    pub fn add_layer(&mut self, layer: Layer) -> ObjectId {
        self.layers.insert(Box::new(layer))
    }

    /// Append a top-level object, drawn after all layers
    pub fn add_object(&mut self, object: impl GameObject + 'static) -> ObjectId {
        self.objects.insert(Box::new(object))
    }

    /// Layer by id, if it has not been removed
    pub fn layer_mut(&mut self, id: ObjectId) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }

    /// Steps (b) to (e) of the update pass. The world hook runs before this.
    pub fn update(&mut self, dt: f64) {
        for (_, layer) in self.layers.iter_mut() {
            layer.update_objects(dt);
        }
        for (_, object) in self.objects.iter_mut() {
            object.update(dt);
        }
        self.camera.update(dt);
        let camera = &self.camera;
        for (_, layer) in self.layers.iter_mut() {
            layer.update(camera, dt);
        }
    }

    /// Depth-first draw under the camera transform.
    ///
    /// The forward matrix is recomputed only if the camera is dirty.
    pub fn draw(
        &mut self,
        stack: &mut TransformStack,
        surface: &mut dyn Surface,
        size: SurfaceSize,
    ) -> Result<()> {
        self.camera.refresh(size.width as f64, size.height as f64)?;
        stack.reset(self.camera.forward_row_major());

        for (_, layer) in self.layers.iter() {
            layer.draw(stack, surface);
        }
        for (_, object) in self.objects.iter() {
            draw_object(object, stack, surface);
        }
        self.camera.draw(stack, surface);

        if stack.depth() != 0 {
            log::warn!("transform stack unbalanced after draw (depth {})", stack.depth());
        }
        Ok(())
    }

    /// Offer a world-space pointer event to every object whose hit test
    /// accepts it. Layer objects are tested in their layer's local space.
    /// Returns true if any object handled it.
    pub fn dispatch(&mut self, kind: PointerKind, world: Point2) -> bool {
        let mut handled = false;

        for (_, layer) in self.layers.iter_mut() {
            let Some(local) = layer.to_local(world) else {
                continue;
            };
            for (_, object) in layer.objects_mut().iter_mut() {
                if object.event_inside(local) {
                    handled |= notify(object, kind, local);
                }
            }
        }

        for (_, object) in self.objects.iter_mut() {
            if object.event_inside(world) {
                handled |= notify(object, kind, world);
            }
        }

        handled
    }
}

fn notify(object: &mut dyn GameObject, kind: PointerKind, point: Point2) -> bool {
    match kind {
        PointerKind::Click => object.on_click(point),
        PointerKind::Press => object.on_press(point),
        PointerKind::Release => object.on_release(point),
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraBehavior;
    use crate::math::matrix::matrix_approx_eq;
    use crate::math::{Matrix2x3, Transform};
    use crate::render::{DrawCall, Rect, RecordingSurface};
    use crate::scene::layer::Parallax;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Unit square centred on its position; logs into a shared trace
    struct Tracer {
        name: &'static str,
        transform: Transform,
        trace: Rc<RefCell<Vec<String>>>,
    }

    impl Tracer {
        fn new(name: &'static str, transform: Transform, trace: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                transform,
                trace: trace.clone(),
            }
        }
    }

    impl GameObject for Tracer {
        fn transform(&self) -> &Transform {
            &self.transform
        }
        fn transform_mut(&mut self) -> &mut Transform {
            &mut self.transform
        }
        fn update(&mut self, _dt: f64) {
            self.trace.borrow_mut().push(format!("update {}", self.name));
        }
        fn draw(&self, surface: &mut dyn Surface) {
            surface.fill_rect(Rect::new(-0.5, -0.5, 1.0, 1.0), Color::WHITE);
        }
        fn event_inside(&self, point: Point2) -> bool {
            let p = self.transform.position;
            (point.x - p.x).abs() <= 0.5 && (point.y - p.y).abs() <= 0.5
        }
        fn on_click(&mut self, point: Point2) -> bool {
            self.trace
                .borrow_mut()
                .push(format!("click {} {:.1},{:.1}", self.name, point.x, point.y));
            true
        }
    }

    /// Moves the camera by (3, -1) units per second
    struct Pan;

    impl CameraBehavior for Pan {
        fn update(&mut self, transform: &mut Transform, dt: f64) {
            transform.translate(3.0 * dt, -1.0 * dt);
        }
    }

    fn trace() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_update_order_layers_objects_camera_hooks() {
        let log = trace();
        let mut scene = SceneGraph::default();
        let mut layer = Layer::new().with_behavior(Parallax::new(1.0, 1.0));
        layer.add(Tracer::new("layered", Transform::IDENTITY, &log));
        let layer_id = scene.add_layer(layer);
        scene.add_object(Tracer::new("top", Transform::IDENTITY, &log));
        scene.camera.set_behavior(Some(Box::new(Pan)));

        scene.update(0.5);

        assert_eq!(*log.borrow(), vec!["update layered", "update top"]);
        assert_eq!(scene.camera.position(), Point2::new(1.5, -0.5));
        // Layer hook ran after the camera moved in this same tick
        let layer = scene.layer_mut(layer_id).unwrap();
        assert_eq!(layer.transform.position, Point2::new(1.5, -0.5));

        scene.update(0.5);
        let layer = scene.layer_mut(layer_id).unwrap();
        assert_eq!(layer.transform.position, Point2::new(3.0, -1.0));
    }

    #[test]
    fn test_draw_composes_camera_layer_object() {
        let log = trace();
        let mut scene = SceneGraph::default();
        let mut layer = Layer::new().with_transform(Transform::from_position(0.5, 0.0));
        layer.add(Tracer::new("a", Transform::from_position(0.0, 0.25), &log));
        scene.add_layer(layer);

        let mut stack = TransformStack::new();
        let mut surface = RecordingSurface::new();
        scene
            .draw(&mut stack, &mut surface, SurfaceSize::new(800, 600))
            .unwrap();

        assert_eq!(stack.depth(), 0);
        assert_eq!(surface.commands.len(), 1);
        let expected = scene
            .camera
            .forward_matrix()
            .multiply(&Transform::from_position(0.5, 0.0).to_matrix())
            .multiply(&Transform::from_position(0.0, 0.25).to_matrix());
        assert!(matrix_approx_eq(&surface.commands[0].matrix, &expected));
        assert!(matches!(surface.commands[0].call, DrawCall::FillRect { .. }));
    }

    #[test]
    fn test_draw_refreshes_camera_only_when_dirty() {
        let mut scene = SceneGraph::default();
        let mut stack = TransformStack::new();
        let mut surface = RecordingSurface::new();

        scene
            .draw(&mut stack, &mut surface, SurfaceSize::new(800, 600))
            .unwrap();
        let first = scene.camera.forward_matrix();
        assert!(!scene.camera.is_dirty());

        // Not dirty: a different size is ignored until someone marks it
        scene
            .draw(&mut stack, &mut surface, SurfaceSize::new(400, 400))
            .unwrap();
        assert_eq!(scene.camera.forward_matrix(), first);

        scene.camera.mark_dirty();
        scene
            .draw(&mut stack, &mut surface, SurfaceSize::new(400, 400))
            .unwrap();
        assert_ne!(scene.camera.forward_matrix(), first);
        assert_eq!(scene.camera.forward_matrix(), Matrix2x3::new(200.0, 0.0, 0.0, -200.0, 200.0, 200.0));
    }

    #[test]
    fn test_dispatch_notifies_every_match() {
        let log = trace();
        let mut scene = SceneGraph::default();
        let mut layer = Layer::new().with_transform(Transform::from_position(10.0, 0.0));
        // Layer-local (0,0) is world (10,0)
        layer.add(Tracer::new("layered", Transform::IDENTITY, &log));
        scene.add_layer(layer);
        scene.add_object(Tracer::new("near", Transform::from_position(10.0, 0.0), &log));
        scene.add_object(Tracer::new("far", Transform::from_position(-5.0, 0.0), &log));

        let handled = scene.dispatch(PointerKind::Click, Point2::new(10.2, 0.0));
        assert!(handled);
        assert_eq!(
            *log.borrow(),
            vec!["click layered 0.2,0.0", "click near 10.2,0.0"]
        );
    }

    #[test]
    fn test_dispatch_miss_is_unhandled() {
        let log = trace();
        let mut scene = SceneGraph::default();
        scene.add_object(Tracer::new("a", Transform::IDENTITY, &log));
        assert!(!scene.dispatch(PointerKind::Click, Point2::new(5.0, 5.0)));
        // Press has no handler on the tracer
        assert!(!scene.dispatch(PointerKind::Press, Point2::ZERO));
        assert!(log.borrow().is_empty());
    }
}
