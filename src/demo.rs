//! Demo scene: a parallax star layer, a clickable spinning square, a
//! flipped sprite and a reticle camera steered with the arrow keys.

use easel::asset::AssetId;
use easel::camera::CameraBehavior;
use easel::engine::Engine;
use easel::math::{Point2, Transform};
use easel::render::{Color, Rect, Surface};
use easel::scene::{FrameContext, GameObject, Layer, Parallax, SceneGraph, World, WorldHooks};

const CAMERA_SPEED: f64 = 0.2;

/// Square that spins; clicking it reverses the spin.
struct Spinner {
    transform: Transform,
    speed: f64,
    color: Color,
}

impl GameObject for Spinner {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn update(&mut self, dt: f64) {
        self.transform.rotate(self.speed * dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::new(-0.5, -0.5, 1.0, 1.0), self.color);
    }

    fn event_inside(&self, point: Point2) -> bool {
        match self.transform.to_matrix().inverse() {
            Ok(inv) => {
                let local = inv.apply(point);
                Rect::new(-0.5, -0.5, 1.0, 1.0).contains(local.x, local.y)
            }
            Err(_) => false,
        }
    }

    fn on_click(&mut self, _point: Point2) -> bool {
        self.speed = -self.speed;
        log::info!("spinner reversed ({:+.1} rad/s)", self.speed);
        true
    }
}

/// Image object; image rows run top-down, so the y axis is flipped.
struct Sprite {
    transform: Transform,
    image: AssetId,
    frame: Rect,
}

impl GameObject for Sprite {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_image(self.image, self.frame, Rect::new(-0.5, -0.5, 1.0, 1.0));
    }
}

struct Star {
    transform: Transform,
}

impl GameObject for Star {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::new(-0.01, -0.01, 0.02, 0.02), Color::rgb(200, 200, 255));
    }
}

/// Crosshair drawn at the camera position
struct Reticle;

impl CameraBehavior for Reticle {
    fn draw(&self, surface: &mut dyn Surface) {
        let c = Color::rgba(255, 255, 255, 160);
        surface.fill_rect(Rect::new(-0.1, -0.005, 0.2, 0.01), c);
        surface.fill_rect(Rect::new(-0.005, -0.1, 0.01, 0.2), c);
    }
}

#[derive(Default)]
struct DemoHooks {
    /// Arrow keys currently held (x, y)
    steer: (f64, f64),
}

impl WorldHooks for DemoHooks {
    fn update_world(&mut self, scene: &mut SceneGraph, _ctx: &FrameContext, dt: f64) {
        let (dx, dy) = self.steer;
        if dx != 0.0 || dy != 0.0 {
            scene.camera.translate(dx * CAMERA_SPEED * dt, dy * CAMERA_SPEED * dt);
        }
    }

    fn draw_gui(&self, surface: &mut dyn Surface) {
        // HUD strip along the top
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 0.04), Color::rgba(0, 0, 0, 128));
    }

    fn on_key_down(&mut self, _scene: &mut SceneGraph, key: &str) {
        match key {
            "Left" => self.steer.0 = -1.0,
            "Right" => self.steer.0 = 1.0,
            "Up" => self.steer.1 = 1.0,
            "Down" => self.steer.1 = -1.0,
            _ => {}
        }
    }

    fn on_key_up(&mut self, _scene: &mut SceneGraph, key: &str) {
        match key {
            "Left" | "Right" => self.steer.0 = 0.0,
            "Up" | "Down" => self.steer.1 = 0.0,
            _ => {}
        }
    }
}

pub fn build_world(engine: &Engine, hero: AssetId) -> World {
    let mut world = engine.new_world(DemoHooks::default());
    let scene = &mut world.scene;
    scene.camera.set_behavior(Some(Box::new(Reticle)));

    let mut stars = Layer::new().with_behavior(Parallax::new(0.5, 0.5));
    for i in 0..40 {
        // Deterministic scatter over a 6x4 area
        let x = ((i * 37) % 60) as f64 / 10.0 - 3.0;
        let y = ((i * 53) % 40) as f64 / 10.0 - 2.0;
        stars.add(Star {
            transform: Transform::from_position(x, y),
        });
    }
    scene.add_layer(stars);

    scene.add_object(Spinner {
        transform: Transform::from_position(-0.4, 0.0).with_scale(0.5, 0.5),
        speed: 1.5,
        color: Color::rgb(255, 170, 0),
    });
    scene.add_object(Sprite {
        transform: Transform::from_position(0.5, 0.0)
            .with_scale(0.6, 0.6)
            .flipped_y(),
        image: hero,
        frame: Rect::new(0.0, 0.0, 32.0, 32.0),
    });

    world
}
