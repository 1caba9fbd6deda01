//! World: the root container of one game state
//!
//! A world is a scene graph plus the game-state specific hooks: a global
//! update step, background and GUI drawing, GUI-first input handling and
//! key events. The loading screen and the main game are two worlds; the
//! engine swaps them.

use crate::asset::{AssetRegistry, LoadingPhase};
use crate::error::Result;
use crate::input::{InputMapper, KeyEvent, KeyKind, PointerEvent, PointerKind};
use crate::math::Point2;
use crate::render::{Rect, Surface, SurfaceSize, TransformStack};

use super::graph::SceneGraph;

/// Read-only engine state visible to world hooks during a tick or event
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub assets: &'a AssetRegistry,
    pub phase: LoadingPhase,
}

/// State transitions a world asks the engine for. Applied after the
/// current frame or event has been fully processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldRequest {
    /// Leave the loading screen and activate the standby world
    Start { muted: bool },
}

pub trait WorldHooks {
    /// Global logic, runs before any object in the scene updates.
    fn update_world(&mut self, _scene: &mut SceneGraph, _ctx: &FrameContext, _dt: f64) {}

    /// Drawn in GUI space before the scene.
    fn draw_background(&self, scene: &SceneGraph, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::UNIT, scene.background);
    }

    /// Drawn in GUI space after the scene, outside the camera transform.
    fn draw_gui(&self, _surface: &mut dyn Surface) {}

    /// GUI handlers get first refusal on every pointer event.
    /// Returning true stops the event from reaching the world.
    fn on_gui_click(&mut self, _gui: Point2, _ctx: &FrameContext) -> bool {
        false
    }

    fn on_gui_press(&mut self, _gui: Point2, _ctx: &FrameContext) -> bool {
        false
    }

    fn on_gui_release(&mut self, _gui: Point2, _ctx: &FrameContext) -> bool {
        false
    }

    fn on_key_down(&mut self, _scene: &mut SceneGraph, _key: &str) {}
    fn on_key_up(&mut self, _scene: &mut SceneGraph, _key: &str) {}

    fn take_request(&mut self) -> Option<WorldRequest> {
        None
    }
}

/// Hooks for a world with no behavior of its own
pub struct PlainWorld;

impl WorldHooks for PlainWorld {}

pub struct World {
    pub scene: SceneGraph,
    hooks: Box<dyn WorldHooks>,
    stack: TransformStack,
}

impl World {
    /// World owning `scene`, driven by `hooks`
    pub fn new(scene: SceneGraph, hooks: impl WorldHooks + 'static) -> Self {
        Self {
            scene,
            hooks: Box::new(hooks),
            stack: TransformStack::new(),
        }
    }

    /// World hook first, then the scene graph's own update pass.
    pub fn update(&mut self, dt: f64, ctx: &FrameContext) {
        self.hooks.update_world(&mut self.scene, ctx, dt);
        self.scene.update(dt);
    }

    /// Background, scene under the camera, then GUI.
    pub fn draw(&mut self, surface: &mut dyn Surface, size: SurfaceSize) -> Result<()> {
        let gui = size.gui_matrix();

        surface.set_transform(gui);
        self.hooks.draw_background(&self.scene, surface);

        self.scene.draw(&mut self.stack, surface, size)?;

        surface.set_transform(gui);
        self.hooks.draw_gui(surface);
        Ok(())
    }

    /// GUI first; the world only sees events the GUI left unhandled.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        mapper: &InputMapper,
        ctx: &FrameContext,
    ) -> Result<bool> {
        let local = event.position();
        if let Some(gui) = mapper.local_to_gui(local) {
            let captured = match event.kind {
                PointerKind::Click => self.hooks.on_gui_click(gui, ctx),
                PointerKind::Press => self.hooks.on_gui_press(gui, ctx),
                PointerKind::Release => self.hooks.on_gui_release(gui, ctx),
            };
            if captured {
                return Ok(true);
            }
        }

        let world = mapper.local_to_world(&mut self.scene.camera, local)?;
        Ok(self.scene.dispatch(event.kind, world))
    }

    /// Route a key event to the matching hook
    pub fn handle_key(&mut self, event: &KeyEvent) {
        match event.kind {
            KeyKind::Down => self.hooks.on_key_down(&mut self.scene, &event.name),
            KeyKind::Up => self.hooks.on_key_up(&mut self.scene, &event.name),
        }
    }

    /// Pending state-change request, if the hooks raised one
    pub fn take_request(&mut self) -> Option<WorldRequest> {
        self.hooks.take_request()
    }
}
