//! Engine context
//!
//! Owns everything a running game needs: surface size, the active and
//! standby worlds, the asset registry, the loading gate and settings.
//! The platform drives it from outside: one `on_tick` per display refresh,
//! plus pointer, key and resize events between ticks.
//!
//! World swaps are plain `&mut self` operations, so they can only happen
//! between ticks. Requests a world raises while it is being updated or
//! handling an event are applied once that call has finished.

mod run_state;

pub use run_state::{FrameReport, RunState};

use crate::asset::{AssetRegistry, LoadingGate, LoadingPhase, LoadingScreen};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::input::{InputMapper, KeyEvent, PointerEvent};
use crate::math::Point2;
use crate::observable::Observable;
use crate::render::{Surface, SurfaceSize};
use crate::scene::{FrameContext, SceneGraph, World, WorldHooks, WorldRequest};

/// Runtime settings with change notification
#[derive(Debug)]
pub struct Settings {
    pub accept_key_events: Observable<bool>,
    pub muted: Observable<bool>,
}

pub struct Engine {
    config: EngineConfig,
    mapper: InputMapper,
    run: RunState,
    active: Option<World>,
    standby: Option<World>,
    assets: AssetRegistry,
    gate: LoadingGate,
    pub settings: Settings,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let settings = Settings {
            accept_key_events: Observable::new(config.accept_key_events),
            muted: Observable::new(false),
        };
        Self {
            config,
            mapper: InputMapper::default(),
            run: RunState::default(),
            active: None,
            standby: None,
            assets: AssetRegistry::new(),
            gate: LoadingGate::active(),
            settings,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Empty world using the configured camera and background.
    pub fn new_world(&self, hooks: impl WorldHooks + 'static) -> World {
        let mut scene = SceneGraph::new(self.config.camera.build());
        scene.background = self.config.background;
        World::new(scene, hooks)
    }

    // =========================================================================
    // Run control
    // =========================================================================

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn start(&mut self) {
        if !self.run.running {
            self.run.running = true;
            log::info!("engine started");
        }
    }

    pub fn stop(&mut self) {
        if self.run.running {
            self.run.running = false;
            log::info!("engine stopped");
        }
    }

    pub fn pause(&mut self) {
        self.run.paused = true;
        log::info!("paused");
    }

    pub fn sleep(&mut self) {
        self.run.asleep = true;
        log::info!("asleep");
    }

    /// Clears both pause and sleep.
    pub fn resume(&mut self) {
        self.run.paused = false;
        self.run.asleep = false;
        log::info!("resumed");
    }

    // =========================================================================
    // Surface
    // =========================================================================

    pub fn surface_size(&self) -> SurfaceSize {
        self.mapper.surface()
    }

    /// Resize signal. Returns false if the size did not change.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let size = SurfaceSize::new(width, height);
        if size == self.mapper.surface() {
            return false;
        }
        log::debug!("surface resized to {}x{}", width, height);
        self.mapper.set_surface(size);
        for world in self.active.iter_mut().chain(self.standby.iter_mut()) {
            world.scene.camera.mark_dirty();
        }
        true
    }

    // =========================================================================
    // Worlds and loading
    // =========================================================================

    pub fn active_world(&self) -> Option<&World> {
        self.active.as_ref()
    }

    pub fn active_world_mut(&mut self) -> Option<&mut World> {
        self.active.as_mut()
    }

    pub fn standby_world(&self) -> Option<&World> {
        self.standby.as_ref()
    }

    /// Replace the active world, returning the previous one.
    pub fn set_active_world(&mut self, mut world: World) -> Option<World> {
        world.scene.camera.mark_dirty();
        log::info!("active world replaced");
        self.active.replace(world)
    }

    /// Show the loading screen until the registered assets are in, keeping
    /// `main` in standby until the player confirms the start.
    pub fn begin_loading(&mut self, main: World) -> Option<World> {
        self.gate = LoadingGate::new(self.config.loading.min_display_time);
        self.standby = Some(main);
        log::info!("loading {} assets", self.assets.len());
        let loading = self.new_world(LoadingScreen::new());
        self.set_active_world(loading)
    }

    pub fn phase(&self) -> LoadingPhase {
        self.gate.phase()
    }

    /// Confirm step of the loading gate: swap the standby world in.
    /// Refused before the gate is ready or with nothing in standby.
    pub fn confirm_start(&mut self, muted: bool) -> bool {
        if self.standby.is_none() {
            log::warn!("start confirmed with no world waiting");
            return false;
        }
        if !self.gate.confirm() {
            return false;
        }
        self.settings.muted.set(muted);
        std::mem::swap(&mut self.active, &mut self.standby);
        if let Some(world) = self.active.as_mut() {
            world.scene.camera.mark_dirty();
        }
        log::info!("game started {}", if muted { "muted" } else { "with sound" });
        true
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    fn apply_requests(&mut self) {
        while let Some(request) = self.active.as_mut().and_then(World::take_request) {
            match request {
                WorldRequest::Start { muted } => {
                    self.confirm_start(muted);
                }
            }
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// One frame: update (unless paused, asleep or the step is out of
    /// range), then draw (unless asleep or the surface has no area).
    pub fn on_tick(&mut self, elapsed: f64, surface: &mut dyn Surface) -> Result<FrameReport> {
        let mut report = FrameReport::default();
        if !self.run.should_draw() {
            return Ok(report);
        }

        let size = self.mapper.surface();
        let Some(world) = self.active.as_mut() else {
            log::debug!("tick ignored: {}", EngineError::MissingActiveWorld);
            return Ok(report);
        };

        if self.run.should_update() {
            let threshold = self.config.skip_update_threshold;
            if elapsed >= threshold || elapsed < 0.0 || !elapsed.is_finite() {
                log::debug!("update skipped (elapsed {:.3}s)", elapsed);
            } else {
                self.gate.update(elapsed, &self.assets);
                let ctx = FrameContext {
                    assets: &self.assets,
                    phase: self.gate.phase(),
                };
                world.update(elapsed, &ctx);
                report.updated = true;
            }
        }

        if size.is_empty() {
            log::debug!("draw skipped: surface has no area");
        } else {
            world.draw(surface, size)?;
            report.drawn = true;
        }

        self.apply_requests();
        Ok(report)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Pointer event in surface-local pixels. Returns true if something
    /// handled it.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Result<bool> {
        if self.mapper.surface().is_empty() {
            log::debug!("pointer event dropped: surface has no area");
            return Ok(false);
        }
        let Some(world) = self.active.as_mut() else {
            log::debug!("pointer event dropped: {}", EngineError::MissingActiveWorld);
            return Ok(false);
        };
        let ctx = FrameContext {
            assets: &self.assets,
            phase: self.gate.phase(),
        };
        let handled = world.handle_pointer(event, &self.mapper, &ctx)?;
        self.apply_requests();
        Ok(handled)
    }

    /// Key event; ignored unless key events are accepted.
    pub fn on_key(&mut self, event: &KeyEvent) {
        if !self.settings.accept_key_events.value() {
            return;
        }
        match self.active.as_mut() {
            Some(world) => world.handle_key(event),
            None => log::debug!("key event dropped: {}", EngineError::MissingActiveWorld),
        }
        self.apply_requests();
    }

    /// Normalized GUI coordinates; `None` on a zero-area surface.
    pub fn local_to_gui(&self, local: Point2) -> Option<Point2> {
        self.mapper.local_to_gui(local)
    }

    /// World coordinates under the active world's camera.
    ///
    /// A zero-area surface has no world mapping yet; that is reported as
    /// `DegenerateTransform` without touching the camera.
    pub fn local_to_world(&mut self, local: Point2) -> Result<Point2> {
        let world = self.active.as_mut().ok_or(EngineError::MissingActiveWorld)?;
        let surface = self.mapper.surface();
        if surface.is_empty() {
            log::debug!(
                "no world mapping on a {}x{} surface",
                surface.width,
                surface.height
            );
            return Err(EngineError::degenerate("surface has no area"));
        }
        self.mapper.local_to_world(&mut world.scene.camera, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::MinViewport;
    use crate::math::matrix::approx_eq;
    use crate::render::RecordingSurface;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Counts updates and records key names
    struct Counter {
        updates: Rc<Cell<u32>>,
        keys: Rc<RefCell<Vec<String>>>,
    }

    impl WorldHooks for Counter {
        fn update_world(&mut self, _scene: &mut SceneGraph, _ctx: &FrameContext, _dt: f64) {
            self.updates.set(self.updates.get() + 1);
        }

        fn on_key_down(&mut self, _scene: &mut SceneGraph, key: &str) {
            self.keys.borrow_mut().push(key.to_string());
        }
    }

    struct Fixture {
        engine: Engine,
        updates: Rc<Cell<u32>>,
        keys: Rc<RefCell<Vec<String>>>,
    }

    fn fixture() -> Fixture {
        let mut engine = Engine::new(EngineConfig::default());
        let updates = Rc::new(Cell::new(0));
        let keys = Rc::new(RefCell::new(Vec::new()));
        let world = engine.new_world(Counter {
            updates: updates.clone(),
            keys: keys.clone(),
        });
        engine.set_active_world(world);
        engine.resize(800, 600);
        engine.start();
        Fixture {
            engine,
            updates,
            keys,
        }
    }

    fn tick(engine: &mut Engine, elapsed: f64) -> FrameReport {
        let mut surface = RecordingSurface::new();
        engine.on_tick(elapsed, &mut surface).unwrap()
    }

    #[test]
    fn test_tick_updates_then_draws() {
        let mut f = fixture();
        let mut surface = RecordingSurface::new();
        let report = f.engine.on_tick(0.016, &mut surface).unwrap();
        assert_eq!(report, FrameReport { updated: true, drawn: true });
        assert_eq!(f.updates.get(), 1);
        // Background fill at least
        assert!(!surface.commands.is_empty());
    }

    #[test]
    fn test_large_or_negative_step_skips_update_only() {
        let mut f = fixture();
        assert_eq!(tick(&mut f.engine, 0.1), FrameReport { updated: false, drawn: true });
        assert_eq!(tick(&mut f.engine, 0.5), FrameReport { updated: false, drawn: true });
        assert_eq!(tick(&mut f.engine, -0.01), FrameReport { updated: false, drawn: true });
        assert_eq!(f.updates.get(), 0);
    }

    #[test]
    fn test_pause_sleep_resume_stop() {
        let mut f = fixture();

        f.engine.pause();
        assert_eq!(tick(&mut f.engine, 0.016), FrameReport { updated: false, drawn: true });

        f.engine.sleep();
        assert_eq!(tick(&mut f.engine, 0.016), FrameReport::default());

        f.engine.resume();
        assert_eq!(tick(&mut f.engine, 0.016), FrameReport { updated: true, drawn: true });

        f.engine.stop();
        assert_eq!(tick(&mut f.engine, 0.016), FrameReport::default());
        assert_eq!(f.updates.get(), 1);
    }

    #[test]
    fn test_missing_world_is_noop() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.resize(800, 600);
        engine.start();
        assert_eq!(tick(&mut engine, 0.016), FrameReport::default());
        assert!(!engine.on_pointer(PointerEvent::click(1.0, 1.0)).unwrap());
        assert_eq!(
            engine.local_to_world(Point2::ZERO),
            Err(EngineError::MissingActiveWorld)
        );
    }

    #[test]
    fn test_zero_area_surface_skips_draw_and_input() {
        let mut f = fixture();
        f.engine.resize(0, 600);
        assert_eq!(tick(&mut f.engine, 0.016), FrameReport { updated: true, drawn: false });
        assert!(!f.engine.on_pointer(PointerEvent::click(1.0, 1.0)).unwrap());
    }

    #[test_log::test]
    fn test_local_to_world_on_empty_surface_is_quiet() {
        let mut f = fixture();
        f.engine.resize(0, 600);

        let err = f.engine.local_to_world(Point2::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, EngineError::DegenerateTransform { .. }));
        // The camera was never asked to rebuild against a 0x600 surface
        let camera = &f.engine.active_world().unwrap().scene.camera;
        assert!(camera.is_dirty());
        assert_eq!(camera.forward_matrix(), crate::math::Matrix2x3::IDENTITY);

        f.engine.resize(800, 600);
        assert!(f.engine.local_to_world(Point2::new(400.0, 300.0)).is_ok());
    }

    #[test]
    fn test_resize_marks_camera_dirty_only_on_change() {
        let mut f = fixture();
        tick(&mut f.engine, 0.016);
        assert!(!f.engine.active_world().unwrap().scene.camera.is_dirty());

        assert!(!f.engine.resize(800, 600));
        assert!(!f.engine.active_world().unwrap().scene.camera.is_dirty());

        assert!(f.engine.resize(1024, 768));
        assert!(f.engine.active_world().unwrap().scene.camera.is_dirty());

        tick(&mut f.engine, 0.016);
        let p = f.engine.local_to_world(Point2::new(512.0, 384.0)).unwrap();
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 0.0));
    }

    #[test]
    fn test_degenerate_viewport_fails_the_frame() {
        let mut config = EngineConfig::default();
        config.camera.viewport = MinViewport {
            width: 0.0,
            ..MinViewport::default()
        };
        let mut engine = Engine::new(config);
        let world = engine.new_world(crate::scene::PlainWorld);
        engine.set_active_world(world);
        engine.resize(800, 600);
        engine.start();

        let mut surface = RecordingSurface::new();
        let err = engine.on_tick(0.016, &mut surface).unwrap_err();
        assert!(matches!(err, EngineError::DegenerateTransform { .. }));
    }

    #[test]
    fn test_keys_gated_by_setting() {
        let mut f = fixture();
        f.engine.on_key(&KeyEvent::down("Space"));
        assert!(f.keys.borrow().is_empty());

        f.engine.settings.accept_key_events.set(true);
        f.engine.on_key(&KeyEvent::down("Space"));
        f.engine.on_key(&KeyEvent::up("Space"));
        assert_eq!(*f.keys.borrow(), vec!["Space".to_string()]);
    }

    #[test_log::test]
    fn test_loading_flow_swaps_on_confirm() {
        let mut config = EngineConfig::default();
        config.loading.min_display_time = 0.05;
        let mut engine = Engine::new(config);
        let img = engine.assets_mut().register_image("hero.png");

        let updates = Rc::new(Cell::new(0));
        let main = engine.new_world(Counter {
            updates: updates.clone(),
            keys: Rc::new(RefCell::new(Vec::new())),
        });
        assert!(engine.begin_loading(main).is_none());
        engine.resize(800, 600);
        engine.start();

        let muted_changes = Rc::new(Cell::new(0));
        let counter = muted_changes.clone();
        engine
            .settings
            .muted
            .subscribe(move |_, _| counter.set(counter.get() + 1));

        for _ in 0..5 {
            tick(&mut engine, 0.02);
        }
        // Time is up but the image is still pending
        assert_eq!(engine.phase(), LoadingPhase::Loading);
        assert!(!engine.confirm_start(false));
        // Clicks are not captured while loading
        assert!(!engine.on_pointer(PointerEvent::click(600.0, 300.0)).unwrap());

        engine.assets_mut().mark_loaded(img);
        tick(&mut engine, 0.02);
        assert_eq!(engine.phase(), LoadingPhase::ReadyToStart);
        assert_eq!(updates.get(), 0);

        // Right half starts muted
        assert!(engine.on_pointer(PointerEvent::click(600.0, 300.0)).unwrap());
        assert_eq!(engine.phase(), LoadingPhase::Active);
        assert!(engine.settings.muted.value());
        assert_eq!(muted_changes.get(), 1);
        assert!(engine.standby_world().is_some());

        tick(&mut engine, 0.02);
        assert_eq!(updates.get(), 1);
    }
}
