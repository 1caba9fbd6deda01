//! Render surface seam
//!
//! The core never draws pixels itself. It configures a transform on a
//! `Surface` and then issues draw calls in the current local space; a
//! backend (macroquad window, or the in-memory `RecordingSurface` used by
//! tests) turns those (matrix, draw-call) pairs into output.

mod color;
pub mod macroquad_surface;
pub mod stack;

pub use color::{Color, ParseColorError};
pub use macroquad_surface::MacroquadSurface;
pub use stack::TransformStack;

use crate::asset::AssetId;
use crate::math::Matrix2x3;

/// Axis-aligned rectangle in whatever space is current on the surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// The full 0..1 unit square (GUI / canonical background space)
    pub const UNIT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Check if point is inside (right/bottom edges exclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Corners in draw order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x, self.y),
            (self.right(), self.y),
            (self.right(), self.bottom()),
            (self.x, self.bottom()),
        ]
    }
}

/// Pixel size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area surface cannot be drawn to or hit-tested against
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Matrix mapping normalized 0..1 GUI space onto the surface
    pub fn gui_matrix(&self) -> Matrix2x3 {
        Matrix2x3::scaling(self.width as f64, self.height as f64)
    }
}

/// Drawing primitives supplied by the rendering backend.
///
/// All coordinates are in the local space established by the last
/// `set_transform` call.
pub trait Surface {
    fn set_transform(&mut self, matrix: Matrix2x3);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Blit the `src` pixel region of an image asset into `dest`.
    fn draw_image(&mut self, image: AssetId, src: Rect, dest: Rect);
}

/// A single primitive together with the transform it was issued under
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect { rect: Rect, color: Color },
    Image { image: AssetId, src: Rect, dest: Rect },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub matrix: Matrix2x3,
    pub call: DrawCall,
}

/// Headless surface that records every draw call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    current: Matrix2x3,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Empty recording with the identity transform installed
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn set_transform(&mut self, matrix: Matrix2x3) {
        self.current = matrix;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand {
            matrix: self.current,
            call: DrawCall::FillRect { rect, color },
        });
    }

    fn draw_image(&mut self, image: AssetId, src: Rect, dest: Rect) {
        self.commands.push(DrawCommand {
            matrix: self.current,
            call: DrawCall::Image { image, src, dest },
        });
    }
}
