//! Walls: thick directed line segments
//!
//! The rectangle a wall occupies is built once, at construction, with the
//! path polygon builder. Drawing and mask generation both use that cached
//! polygon, so a wall rasterizes exactly like its collision footprint.

use glam::Vec2;

use crate::error::GeometryError;
use crate::geometry::{Line2D, PathPolygon};
use crate::math::Vec2Ext;
use crate::renderer::{BLACK, Color, Surface, shapes};

/// A single wall. Immutable once built; replace it to change geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    start: Vec2,
    end: Vec2,
    width: f32,
    color: Color,
    direction: Vec2,
    length: f32,
    line: Line2D,
    polygon: PathPolygon,
}

impl Wall {
    pub const STANDARD_WIDTH: f32 = 10.0;

    pub fn new(start: Vec2, end: Vec2) -> Result<Self, GeometryError> {
        Self::with_width(start, end, Self::STANDARD_WIDTH)
    }

    pub fn with_width(start: Vec2, end: Vec2, width: f32) -> Result<Self, GeometryError> {
        let direction = end - start;
        let length = direction.length();
        // A zero-length wall keeps angle 0 and collapses to a zero-area band
        let angle = if length > 0.0 {
            direction.to_angle_from_x_axis()?
        } else {
            0.0
        };
        let polygon = shapes::band(start, angle, length, width, 0.0)?;

        Ok(Self {
            start,
            end,
            width,
            color: BLACK,
            direction,
            length,
            line: Line2D::new(start, end),
            polygon,
        })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// `end - start`
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Angle of the wall against the x axis (0 for zero-length walls)
    pub fn angle(&self) -> f32 {
        self.direction.to_angle_from_x_axis().unwrap_or(0.0)
    }

    pub fn line(&self) -> &Line2D {
        &self.line
    }

    pub fn polygon(&self) -> &PathPolygon {
        &self.polygon
    }

    /// Endpoints rounded to whole pixels, as stored in map files
    pub fn endpoints_i32(&self) -> [i32; 4] {
        [
            self.start.x.round() as i32,
            self.start.y.round() as i32,
            self.end.x.round() as i32,
            self.end.y.round() as i32,
        ]
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_polygon(self.polygon.points(), self.color);
    }

    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        self.line.distance_to_point(p)
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.line.contains_point(p)
    }

    /// Outgoing unit direction for something hitting this wall
    pub fn reflect(&self, direction: Vec2) -> Result<Vec2, GeometryError> {
        self.line.reflect(direction)
    }
}
