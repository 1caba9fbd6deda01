//! Input handling
//!
//! Raw pointer and key events as delivered by the platform, plus the
//! mapping from surface pixels into world and GUI coordinates.

mod event;
mod mapper;

pub use event::{KeyEvent, KeyKind, PointerEvent, PointerKind};
pub use mapper::InputMapper;
