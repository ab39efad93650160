//! Infinite straight lines

use glam::Vec2;

use crate::error::GeometryError;

/// An infinite line through `point` along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Straight2D {
    pub point: Vec2,
    /// Never zero-length
    direction: Vec2,
}

impl Straight2D {
    pub fn new(point: Vec2, direction: Vec2) -> Result<Self, GeometryError> {
        if direction.length_squared() == 0.0 {
            return Err(GeometryError::DegenerateInput("straight line with zero direction"));
        }
        Ok(Self { point, direction })
    }

    /// Line through two distinct points
    pub fn through(a: Vec2, b: Vec2) -> Result<Self, GeometryError> {
        Self::new(a, b - a)
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Unit normal (direction rotated a quarter turn)
    pub fn normal(&self) -> Vec2 {
        self.direction.perp().normalize()
    }

    /// Cross product of the direction with `p - point`
    #[inline]
    pub fn cross_to(&self, p: Vec2) -> f32 {
        self.direction.perp_dot(p - self.point)
    }

    /// Colinearity test; the cross product is truncated to an integer so
    /// float noise on points that sit on the line does not reject them
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.cross_to(p).trunc() == 0.0
    }

    /// Line parameter `t` of the foot of the perpendicular from `p`
    /// (`point + direction * t`)
    pub fn parameter_of(&self, p: Vec2) -> f32 {
        (p - self.point).dot(self.direction) / self.direction.length_squared()
    }

    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        self.point + self.direction * self.parameter_of(p)
    }

    /// Perpendicular distance
    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        self.cross_to(p).abs() / self.direction.length()
    }

    /// Intersection point, `None` for parallel lines
    pub fn intersection(&self, other: &Straight2D) -> Option<Vec2> {
        let denom = self.direction.perp_dot(other.direction);
        if denom == 0.0 {
            return None;
        }
        let t = (other.point - self.point).perp_dot(other.direction) / denom;
        Some(self.point + self.direction * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_direction_rejected() {
        assert!(Straight2D::new(Vec2::ZERO, Vec2::ZERO).is_err());
    }

    #[test]
    fn test_distance_and_closest_point() {
        let line = Straight2D::through(Vec2::new(0.0, 10.0), Vec2::new(5.0, 10.0)).unwrap();
        let p = Vec2::new(-100.0, 4.0);
        assert!((line.distance_to_point(p) - 6.0).abs() < 1e-4);
        assert!((line.closest_point(p) - Vec2::new(-100.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_contains_point_beyond_defining_points() {
        let line = Straight2D::through(Vec2::ZERO, Vec2::new(1.0, 1.0)).unwrap();
        assert!(line.contains_point(Vec2::new(250.0, 250.0)));
        assert!(line.contains_point(Vec2::new(-3.0, -3.0)));
        assert!(!line.contains_point(Vec2::new(3.0, 5.0)));
    }

    #[test]
    fn test_intersection() {
        let a = Straight2D::new(Vec2::ZERO, Vec2::X).unwrap();
        let b = Straight2D::new(Vec2::new(3.0, -2.0), Vec2::Y).unwrap();
        let hit = a.intersection(&b).unwrap();
        assert!((hit - Vec2::new(3.0, 0.0)).length() < 1e-4);

        let parallel = Straight2D::new(Vec2::new(0.0, 1.0), Vec2::new(2.0, 0.0)).unwrap();
        assert!(a.intersection(&parallel).is_none());
    }
}
