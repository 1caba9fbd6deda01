//! Asset tracking and the loading gate
//!
//! The backend loads assets; this module only records their completion
//! and decides when the loading screen may hand over to the game.

mod loading;
mod registry;

pub use loading::{loading_color, LoadingGate, LoadingPhase, LoadingScreen};
pub use registry::{AssetEntry, AssetId, AssetKind, AssetRegistry, AssetState};
