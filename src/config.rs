//! Engine configuration
//!
//! Stored as RON. Every field has a default, so a config file only needs
//! to name what it changes:
//!
//! ```text
//! (
//!   skip_update_threshold: 0.05,
//!   camera: (viewport: (width: 4.0, height: 3.0)),
//!   background: "#203040",
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::camera::{Camera, CanonicalSpace, MinViewport};
use crate::render::Color;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frames whose elapsed time reaches this (seconds) skip the update
    /// pass but still draw.
    pub skip_update_threshold: f64,
    pub loading: LoadingConfig,
    pub camera: CameraConfig,
    pub background: Color,
    pub accept_key_events: bool,
    pub window: WindowConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skip_update_threshold: 0.1,
            loading: LoadingConfig::default(),
            camera: CameraConfig::default(),
            background: Color::BLACK,
            accept_key_events: false,
            window: WindowConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Minimum time the loading screen stays up, in seconds
    pub min_display_time: f64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            min_display_time: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub canonical: CanonicalSpace,
    pub viewport: MinViewport,
}

impl CameraConfig {
    pub fn build(&self) -> Camera {
        Camera::new(self.canonical, self.viewport)
    }
}

/// Demo window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl EngineConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Missing file gives the defaults silently; a broken one is logged and
    /// also gives the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
