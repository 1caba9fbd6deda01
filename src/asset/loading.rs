//! Loading gate
//!
//! Loading -> ReadyToStart once every asset has settled and the minimum
//! display time has run out, then ReadyToStart -> Active when the player
//! confirms. The two conditions are independent: fast loads still show
//! the loading screen for the full minimum time.

use crate::math::Point2;
use crate::render::{Color, Rect, Surface};
use crate::scene::{FrameContext, SceneGraph, WorldHooks, WorldRequest};

use super::registry::AssetRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Loading,
    ReadyToStart,
    Active,
}

#[derive(Debug, Clone)]
pub struct LoadingGate {
    min_time_left: f64,
    phase: LoadingPhase,
    progress: f64,
}

impl LoadingGate {
    pub fn new(min_display_time: f64) -> Self {
        Self {
            min_time_left: min_display_time,
            phase: LoadingPhase::Loading,
            progress: 0.0,
        }
    }

    /// A gate that has already been passed (no loading screen in use)
    pub fn active() -> Self {
        Self {
            min_time_left: 0.0,
            phase: LoadingPhase::Active,
            progress: 1.0,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn min_time_left(&self) -> f64 {
        self.min_time_left
    }

    /// Advance the countdown and poll the registry.
    pub fn update(&mut self, dt: f64, assets: &AssetRegistry) {
        if self.phase != LoadingPhase::Loading {
            return;
        }
        if self.min_time_left > 0.0 {
            self.min_time_left -= dt;
        }
        self.progress = assets.loaded_fraction();

        if assets.all_settled() && self.min_time_left <= 0.0 {
            self.phase = LoadingPhase::ReadyToStart;
            log::info!(
                "loading complete ({}/{} assets loaded)",
                assets.loaded_count(),
                assets.len()
            );
        }
    }

    /// Player confirmation. Refused unless the gate is ready.
    pub fn confirm(&mut self) -> bool {
        if self.phase == LoadingPhase::ReadyToStart {
            self.phase = LoadingPhase::Active;
            true
        } else {
            log::warn!("start confirmed while {:?}; ignored", self.phase);
            false
        }
    }
}

/// Background colour for a load fraction: red when empty, green when full.
pub fn loading_color(progress: f64) -> Color {
    let p = progress.clamp(0.0, 1.0);
    Color::rgb(
        ((1.0 - p) * 223.0).floor() as u8,
        (p * 191.0).floor() as u8,
        63,
    )
}

/// World hooks for the loading screen.
///
/// Shows a progress marker; once the gate is ready, a click on the left
/// half starts with sound and a click on the right half starts muted.
#[derive(Debug, Default)]
pub struct LoadingScreen {
    progress: f64,
    ready: bool,
    request: Option<WorldRequest>,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorldHooks for LoadingScreen {
    fn update_world(&mut self, scene: &mut SceneGraph, ctx: &FrameContext, _dt: f64) {
        self.progress = ctx.assets.loaded_fraction();
        self.ready = ctx.phase == LoadingPhase::ReadyToStart;
        scene.background = loading_color(self.progress);
    }

    fn draw_gui(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            Rect::new(self.progress - 0.05, 0.1, 0.1, 0.8),
            Color::WHITE,
        );
        if self.ready {
            // Start choice: with sound | muted
            surface.fill_rect(Rect::new(0.0, 0.0, 0.5, 1.0), Color::rgba(255, 255, 255, 48));
            surface.fill_rect(Rect::new(0.5, 0.0, 0.5, 1.0), Color::rgba(0, 0, 0, 48));
        }
    }

    fn on_gui_click(&mut self, gui: Point2, ctx: &FrameContext) -> bool {
        if ctx.phase != LoadingPhase::ReadyToStart {
            return false;
        }
        self.request = Some(WorldRequest::Start {
            muted: gui.x >= 0.5,
        });
        true
    }

    fn take_request(&mut self) -> Option<WorldRequest> {
        self.request.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_waits_for_min_time_and_assets() {
        let mut assets = AssetRegistry::new();
        let a = assets.register_image("a.png");
        let b = assets.register_sound("b.ogg");
        let mut gate = LoadingGate::new(3.0);

        gate.update(1.0, &assets);
        assert_eq!(gate.phase(), LoadingPhase::Loading);

        // Both assets arrive at t=1.5
        gate.update(0.5, &assets);
        assets.mark_loaded(a);
        assets.mark_loaded(b);
        assert_eq!(gate.phase(), LoadingPhase::Loading);

        gate.update(1.0, &assets);
        assert_eq!(gate.phase(), LoadingPhase::Loading);
        assert_eq!(gate.progress(), 1.0);

        gate.update(0.5, &assets);
        assert_eq!(gate.phase(), LoadingPhase::ReadyToStart);
    }

    #[test]
    fn test_gate_waits_for_assets_after_min_time() {
        let mut assets = AssetRegistry::new();
        let a = assets.register_image("a.png");
        let mut gate = LoadingGate::new(0.5);

        gate.update(1.0, &assets);
        gate.update(1.0, &assets);
        assert_eq!(gate.phase(), LoadingPhase::Loading);
        assert_eq!(gate.progress(), 0.0);

        assets.mark_loaded(a);
        gate.update(0.016, &assets);
        assert_eq!(gate.phase(), LoadingPhase::ReadyToStart);
    }

    #[test_log::test]
    fn test_confirm_only_when_ready() {
        let assets = AssetRegistry::new();
        let mut gate = LoadingGate::new(1.0);
        assert!(!gate.confirm());
        assert_eq!(gate.phase(), LoadingPhase::Loading);

        gate.update(1.0, &assets);
        assert!(gate.confirm());
        assert_eq!(gate.phase(), LoadingPhase::Active);
        assert!(!gate.confirm());
    }

    #[test]
    fn test_loading_color_endpoints() {
        assert_eq!(loading_color(0.0), Color::rgb(223, 0, 63));
        assert_eq!(loading_color(1.0), Color::rgb(0, 191, 63));
        assert_eq!(loading_color(0.5), Color::rgb(111, 95, 63));
    }

    #[test]
    fn test_loading_screen_start_choice() {
        let assets = AssetRegistry::new();
        let mut screen = LoadingScreen::new();
        let loading = FrameContext {
            assets: &assets,
            phase: LoadingPhase::Loading,
        };
        assert!(!screen.on_gui_click(Point2::new(0.2, 0.5), &loading));
        assert_eq!(screen.take_request(), None);

        let ready = FrameContext {
            assets: &assets,
            phase: LoadingPhase::ReadyToStart,
        };
        assert!(screen.on_gui_click(Point2::new(0.2, 0.5), &ready));
        assert_eq!(screen.take_request(), Some(WorldRequest::Start { muted: false }));
        assert!(screen.on_gui_click(Point2::new(0.8, 0.5), &ready));
        assert_eq!(screen.take_request(), Some(WorldRequest::Start { muted: true }));
        assert_eq!(screen.take_request(), None);
    }
}
