//! Finite line segments
//!
//! Walls answer their distance and reflection queries through the cached
//! segment built here.

use glam::Vec2;

use super::straight::Straight2D;
use crate::error::GeometryError;
use crate::math::Vec2Ext;

/// A segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub start: Vec2,
    pub end: Vec2,
}

impl Line2D {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// `end - start`
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// The infinite line carrying this segment
    pub fn straight(&self) -> Result<Straight2D, GeometryError> {
        Straight2D::through(self.start, self.end)
    }

    /// Unit normal of the segment (not oriented towards anything)
    pub fn normal(&self) -> Result<Vec2, GeometryError> {
        Ok(self.straight()?.normal())
    }

    /// Segment parameter of `p` in `[0, 1]`, or `None` when `p` is not on
    /// the segment
    pub fn parametric_position_of(&self, p: Vec2) -> Option<f32> {
        let Ok(line) = self.straight() else {
            // Zero-length segment: only its single point lies on it
            return (p == self.start).then_some(0.0);
        };
        if !line.contains_point(p) {
            return None;
        }
        let t = line.parameter_of(p);
        (0.0..=1.0).contains(&t).then_some(t)
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.parametric_position_of(p).is_some()
    }

    /// Closest point of the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        match self.straight() {
            Ok(line) => self.start + self.direction() * line.parameter_of(p).clamp(0.0, 1.0),
            Err(_) => self.start,
        }
    }

    /// Perpendicular distance when the foot of the perpendicular lies on the
    /// segment, otherwise the distance to the nearer endpoint
    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        let Ok(line) = self.straight() else {
            return p.distance(self.start);
        };
        let t = line.parameter_of(p);
        if (0.0..=1.0).contains(&t) {
            line.distance_to_point(p)
        } else {
            p.distance(self.start).min(p.distance(self.end))
        }
    }

    /// Bounce an incoming `direction` off this segment
    ///
    /// The normal is flipped to face the incoming vector (enclosed angle at
    /// most 90°), the direction is mirrored about it, and the result is
    /// negated so it points away from the wall. Always a unit vector.
    pub fn reflect(&self, direction: Vec2) -> Result<Vec2, GeometryError> {
        let mut normal = self.normal()?;
        if normal.angle_between(direction)? > std::f32::consts::FRAC_PI_2 {
            normal = -normal;
        }
        let mirrored = direction.reflect_across(normal)?;
        Ok(-mirrored.normalize())
    }
}
