//! Per-pixel occupancy masks
//!
//! A mask is a binary bitmap used for precise overlap tests between a body's
//! silhouette and the rasterized walls of the map. Offsets are always the
//! position of the other mask's top-left corner in this mask's space.

use glam::{IVec2, Vec2};

use super::{Color, Surface};
use crate::geometry::polygon::polygon_bounds;

/// Alpha above which a drawn colour counts as solid
const ALPHA_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Empty mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Mask with every pixel set
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width as usize) * (height as usize)],
        }
    }

    /// Tight mask around a filled polygon, together with the world position
    /// of its top-left corner
    pub fn from_polygon(points: &[Vec2]) -> (Self, IVec2) {
        let Some((min, max)) = polygon_bounds(points) else {
            return (Self::new(0, 0), IVec2::ZERO);
        };
        let origin = min.floor();
        let extent = (max.ceil() - origin).max(Vec2::ONE);
        let mut mask = Self::new(extent.x as u32, extent.y as u32);
        let local: Vec<Vec2> = points.iter().map(|p| *p - origin).collect();
        mask.fill_polygon_bits(&local, true);
        (mask, origin.as_ivec2())
    }

    /// Filled disc of `radius`, `2 * radius` pixels across (rounded up)
    pub fn disc(radius: f32) -> Self {
        let side = (2.0 * radius).ceil().max(1.0) as u32;
        let mut mask = Self::new(side, side);
        let centre = Vec2::splat(side as f32 / 2.0);
        for y in 0..side as i32 {
            for x in 0..side as i32 {
                let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if pixel.distance_squared(centre) <= radius * radius {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Out-of-bounds pixels read as unset
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.bits[i])
    }

    /// Out-of-bounds writes are ignored
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if let Some(i) = self.index(x, y) {
            self.bits[i] = value;
        }
    }

    /// Number of set pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn invert(&mut self) {
        for bit in &mut self.bits {
            *bit = !*bit;
        }
    }

    /// Union `other` into this mask with its top-left corner at `offset`
    pub fn draw(&mut self, other: &Mask, offset: IVec2) {
        for (x, y) in shared_area(self.size(), other.size(), offset) {
            if other.get(x - offset.x, y - offset.y) {
                self.set(x, y, true);
            }
        }
    }

    /// First pixel (row-major, in this mask's space) set in both masks, with
    /// `other`'s top-left corner placed at `offset`
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        shared_area(self.size(), other.size(), offset)
            .find(|&(x, y)| self.get(x, y) && other.get(x - offset.x, y - offset.y))
            .map(|(x, y)| IVec2::new(x, y))
    }

    /// Scanline fill sampling pixel centres, even-odd rule
    fn fill_polygon_bits(&mut self, points: &[Vec2], value: bool) {
        let Some((min, max)) = polygon_bounds(points) else {
            return;
        };
        if points.len() < 3 {
            return;
        }
        let row_start = (min.y.floor() as i32).max(0);
        let row_end = (max.y.ceil() as i32).min(self.height as i32);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in row_start..row_end {
            let cy = y as f32 + 0.5;
            crossings.clear();
            for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
                if (a.y <= cy && b.y > cy) || (b.y <= cy && a.y > cy) {
                    crossings.push(a.x + (cy - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let from = ((span[0] - 0.5).ceil() as i32).max(0);
                let to = ((span[1] - 0.5).ceil() as i32).min(self.width as i32);
                for x in from..to {
                    self.set(x, y, value);
                }
            }
        }
    }
}

/// Pixel coordinates (in the receiver's space) covered by both masks
fn shared_area(
    (width, height): (u32, u32),
    (other_width, other_height): (u32, u32),
    offset: IVec2,
) -> impl Iterator<Item = (i32, i32)> {
    let x0 = offset.x.max(0);
    let y0 = offset.y.max(0);
    let x1 = (offset.x + other_width as i32).min(width as i32);
    let y1 = (offset.y + other_height as i32).min(height as i32);
    (y0..y1.max(y0)).flat_map(move |y| (x0..x1.max(x0)).map(move |x| (x, y)))
}

impl Surface for Mask {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if color[3] > ALPHA_THRESHOLD {
            self.fill_polygon_bits(points, true);
        }
    }
}

/// Anything that can be mask-tested against the map
pub trait Collidable {
    /// Silhouette of the body
    fn mask(&self) -> &Mask;
    /// World position of the silhouette's top-left corner
    fn mask_offset(&self) -> IVec2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::BLACK;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ]
    }

    #[test]
    fn test_fill_axis_aligned_rect_is_exact() {
        let mut mask = Mask::new(50, 50);
        mask.fill_polygon(&rect(10.0, 5.0, 20.0, 10.0), BLACK);
        assert_eq!(mask.count(), 200);
        assert!(mask.get(10, 5));
        assert!(mask.get(29, 14));
        assert!(!mask.get(30, 14));
        assert!(!mask.get(10, 15));
    }

    #[test]
    fn test_transparent_colour_draws_nothing() {
        let mut mask = Mask::new(20, 20);
        mask.fill_polygon(&rect(0.0, 0.0, 10.0, 10.0), [0, 0, 0, 0]);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_fill_clips_to_bounds() {
        let mut mask = Mask::new(10, 10);
        mask.fill_polygon(&rect(-5.0, -5.0, 10.0, 10.0), BLACK);
        assert_eq!(mask.count(), 25);
    }

    #[test]
    fn test_triangle_area_roughly_matches() {
        let mut mask = Mask::new(100, 100);
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(80.0, 0.0), Vec2::new(0.0, 80.0)];
        mask.fill_polygon(&tri, BLACK);
        let count = mask.count() as f32;
        assert!((count - 3200.0).abs() < 100.0, "count {}", count);
    }

    #[test]
    fn test_overlap_reports_first_pixel_in_receiver_space() {
        let mut field = Mask::new(100, 100);
        field.fill_polygon(&rect(40.0, 40.0, 10.0, 10.0), BLACK);
        let body = Mask::full(5, 5);

        assert_eq!(field.overlap(&body, IVec2::new(0, 0)), None);
        assert_eq!(field.overlap(&body, IVec2::new(37, 38)), Some(IVec2::new(40, 40)));
        assert_eq!(field.overlap(&body, IVec2::new(48, 49)), Some(IVec2::new(48, 49)));
        // Partially outside the field
        assert_eq!(field.overlap(&body, IVec2::new(-3, -3)), None);
        assert_eq!(field.overlap(&body, IVec2::new(200, 200)), None);
    }

    #[test]
    fn test_draw_unions_and_invert() {
        let mut field = Mask::new(10, 10);
        field.draw(&Mask::full(3, 3), IVec2::new(8, 8));
        assert_eq!(field.count(), 4);
        field.draw(&Mask::full(3, 3), IVec2::new(0, 0));
        assert_eq!(field.count(), 13);
        field.invert();
        assert_eq!(field.count(), 87);
        assert!(!field.get(9, 9));
    }

    #[test]
    fn test_disc() {
        let disc = Mask::disc(15.0);
        assert_eq!(disc.size(), (30, 30));
        assert!(disc.get(15, 15));
        assert!(!disc.get(0, 0));
        let area = std::f32::consts::PI * 225.0;
        assert!((disc.count() as f32 - area).abs() < 40.0);
    }

    #[test]
    fn test_from_polygon_offsets_to_bounds() {
        let (mask, offset) = Mask::from_polygon(&rect(300.0, 95.0, 10.0, 10.0));
        assert_eq!(offset, IVec2::new(300, 95));
        assert_eq!(mask.size(), (10, 10));
        assert_eq!(mask.count(), 100);
    }
}
