//! Points and value-hashed point keys

use glam::Vec2;

/// Absolute positions are plain vectors
pub type Point2D = Vec2;

/// Hashable, component-value identity of a point
///
/// `Vec2` is not `Eq`/`Hash`, so sets of wall endpoints go through this key.
/// `-0.0` and `0.0` map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    x: u32,
    y: u32,
}

impl PointKey {
    pub fn point(self) -> Point2D {
        Vec2::new(f32::from_bits(self.x), f32::from_bits(self.y))
    }
}

impl From<Point2D> for PointKey {
    fn from(p: Point2D) -> Self {
        // Adding 0.0 folds negative zero into positive zero
        Self {
            x: (p.x + 0.0).to_bits(),
            y: (p.y + 0.0).to_bits(),
        }
    }
}
