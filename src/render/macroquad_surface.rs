//! macroquad-backed drawing surface
//!
//! macroquad draws in window pixels with a y-down origin at the top-left,
//! which is exactly the space the camera's forward matrix targets. Every
//! primitive is pre-transformed on the CPU and emitted as triangles, so
//! arbitrary affine matrices (rotation, flips, non-uniform scale) work
//! without touching macroquad's own camera.

use std::collections::HashMap;

use macroquad::prelude::{
    draw_mesh, draw_triangle, vec2, Color as MqColor, Mesh, Texture2D, Vertex,
};

use crate::asset::AssetId;
use crate::math::{Matrix2x3, Point2};

use super::{Color, Rect, Surface};

pub struct MacroquadSurface {
    matrix: Matrix2x3,
    textures: HashMap<AssetId, Texture2D>,
}

impl MacroquadSurface {
    pub fn new() -> Self {
        Self {
            matrix: Matrix2x3::IDENTITY,
            textures: HashMap::new(),
        }
    }

    /// Register a decoded texture for an image asset.
    pub fn insert_texture(&mut self, id: AssetId, texture: Texture2D) {
        self.textures.insert(id, texture);
    }

    fn project(&self, x: f64, y: f64) -> (f32, f32) {
        let p = self.matrix.apply(Point2::new(x, y));
        (p.x as f32, p.y as f32)
    }
}

impl Default for MacroquadSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn to_mq(color: Color) -> MqColor {
    MqColor::from_rgba(color.r, color.g, color.b, color.a)
}

impl Surface for MacroquadSurface {
    fn set_transform(&mut self, matrix: Matrix2x3) {
        self.matrix = matrix;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let [p0, p1, p2, p3] = rect.corners().map(|(x, y)| {
            let (px, py) = self.project(x, y);
            vec2(px, py)
        });
        let c = to_mq(color);
        draw_triangle(p0, p1, p2, c);
        draw_triangle(p0, p2, p3, c);
    }

    fn draw_image(&mut self, image: AssetId, src: Rect, dest: Rect) {
        let Some(texture) = self.textures.get(&image) else {
            log::debug!("image {:?} has no texture yet, skipping", image);
            return;
        };
        let (tw, th) = (texture.width() as f64, texture.height() as f64);
        if tw == 0.0 || th == 0.0 {
            return;
        }

        let uv = src.corners().map(|(x, y)| ((x / tw) as f32, (y / th) as f32));
        let vertices = dest
            .corners()
            .iter()
            .zip(uv.iter())
            .map(|(&(x, y), &(u, v))| {
                let (px, py) = self.project(x, y);
                Vertex::new(px, py, 0.0, u, v, macroquad::color::WHITE)
            })
            .collect();

        let mesh = Mesh {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
            texture: Some(texture.clone()),
        };
        draw_mesh(&mesh);
    }
}
