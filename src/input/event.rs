use crate::math::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Click,
    Press,
    Release,
}

/// Pointer event in surface-local pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Click, x, y)
    }

    pub fn press(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Press, x, y)
    }

    pub fn release(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Release, x, y)
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Down,
    Up,
}

/// Keyboard event, keyed by the platform's key name ("ArrowLeft", "Space", ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub name: String,
    pub kind: KeyKind,
}

impl KeyEvent {
    pub fn down(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: KeyKind::Down,
        }
    }

    pub fn up(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: KeyKind::Up,
        }
    }
}
