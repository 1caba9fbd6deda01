//! easel: a lightweight 2D game framework over a canvas-like surface
//!
//! World objects are authored in a device-independent, y-up space. A camera
//! maps that space onto whatever surface size the platform reports,
//! letter-boxing to keep the aspect ratio, and maps pointer events back:
//!
//! - `math`: affine matrices and local transforms
//! - `render`: the `Surface` seam, `TransformStack`, macroquad backend
//! - `camera`: canonical space -> surface pixels, with cached inverse
//! - `scene`: worlds, layers, game objects, GUI-first input dispatch
//! - `input`: pointer/key events and coordinate mapping
//! - `asset`: asset registry and the loading gate
//! - `engine`: the context object the platform drives once per frame

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod asset;
pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod math;
pub mod observable;
pub mod render;
pub mod scene;

pub use camera::{Camera, CameraBehavior, CanonicalSpace, MinViewport};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, FrameReport, RunState, Settings};
pub use error::{EngineError, Result};
