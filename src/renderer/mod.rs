//! Drawing seam and rasterized shapes
//!
//! The game never talks to a window directly. Everything is drawn through the
//! [`Surface`] trait; [`Mask`] is the one surface the core ships, used to
//! rasterize walls and silhouettes for collision tests.

pub mod mask;
pub mod shapes;

pub use mask::{Collidable, Mask};

use glam::Vec2;

/// RGBA colour
pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const RED: Color = [255, 0, 0, 255];
pub const GREY: Color = [122, 122, 122, 255];

/// Something polygons can be rasterized onto
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Thick line drawn as a filled quad
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let dir = (to - from).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let half = dir.perp() * (width / 2.0);
        self.fill_polygon(&[from + half, to + half, to - half, from - half], color);
    }
}
