//! Transform stack for scene-graph traversal
//!
//! Level 0 holds the camera's forward matrix. Each container or object
//! pushes its local transform before drawing and pops afterwards, so a draw
//! call always sees the fully composed matrix of its scope.

use crate::error::EngineError;
use crate::math::{Matrix2x3, RowMajor, Transform};

use super::Surface;

#[derive(Debug, Clone)]
pub struct TransformStack {
    /// Composed matrices; entries above `depth` are stale scratch space
    levels: Vec<Matrix2x3>,
    depth: usize,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            levels: vec![Matrix2x3::IDENTITY],
            depth: 0,
        }
    }

    /// Seed level 0 from the camera's row-major forward matrix.
    pub fn reset(&mut self, camera: &RowMajor) {
        self.levels[0] = Matrix2x3::from_row_major(camera);
        self.depth = 0;
    }

    /// Compose `transform` into the current top and make it the new top.
    pub fn push(&mut self, transform: &Transform) {
        let child = self.levels[self.depth].multiply(&transform.to_matrix());
        self.depth += 1;
        if self.depth < self.levels.len() {
            self.levels[self.depth] = child;
        } else {
            self.levels.push(child);
        }
    }

    /// Drop the top level. Popping at depth 0 is a caller bug; it is logged
    /// and otherwise ignored.
    pub fn pop(&mut self) {
        if self.depth == 0 {
            log::warn!("{}", EngineError::StackUnderflow);
            return;
        }
        self.depth -= 1;
    }

    pub fn current_matrix(&self) -> Matrix2x3 {
        self.levels[self.depth]
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Push, hand the surface to `draw` with the composed matrix installed,
    /// then pop.
    pub fn scoped<S, F>(&mut self, transform: &Transform, surface: &mut S, draw: F)
    where
        S: Surface + ?Sized,
        F: FnOnce(&mut Self, &mut S),
    {
        self.push(transform);
        surface.set_transform(self.current_matrix());
        draw(self, surface);
        self.pop();
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
