//! Polygons described by a path of relative vectors
//!
//! A path is walked cumulatively from an origin; every step end becomes a
//! polygon point. The whole path (and the positional offset) can be rotated
//! around the origin, which is how oriented rectangles for walls and tank
//! silhouettes are produced.

use glam::{Mat2, Vec2};

use crate::error::GeometryError;
use crate::math::{Vec2Ext, rotation_matrix};

/// Decimal places points are rounded to before the closure comparison
pub const CLOSURE_DECIMALS: i32 = 2;

/// Construction options for [`PathPolygon::build`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions {
    /// Added to every computed point (rotated along with the path)
    pub position_offset: Vec2,
    /// Base rotation of the path axes against the x axis
    pub rotation_offset: f32,
    /// The last point must coincide with the closing point
    pub closed: bool,
    /// Close on the (offset) origin; otherwise the first path point is the
    /// closing point and is dropped from the point list
    pub close_origin: bool,
    /// Fill in a missing closing point. Not supported: requesting it on a
    /// path that does not close is an error.
    pub auto_close: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            position_offset: Vec2::ZERO,
            rotation_offset: 0.0,
            closed: true,
            close_origin: true,
            auto_close: false,
        }
    }
}

/// Linear vector art: a polygon built from a path of relative vectors
#[derive(Debug, Clone, PartialEq)]
pub struct PathPolygon {
    origin: Vec2,
    path: Vec<Vec2>,
    options: PathOptions,
    /// Rotation applied on top of `options.rotation_offset`
    rotation: f32,
    points: Vec<Vec2>,
}

impl PathPolygon {
    /// Walk `path` from `origin` and validate closure
    pub fn build(
        origin: Vec2,
        path: impl Into<Vec<Vec2>>,
        options: PathOptions,
    ) -> Result<Self, GeometryError> {
        let path = path.into();
        let points = compute_points(origin, &path, &options, options.rotation_offset)?;
        Ok(Self {
            origin,
            path,
            options,
            rotation: 0.0,
            points,
        })
    }

    /// Recompute the points with a net rotation of `rotation_offset + angle`.
    /// The path vectors themselves are left untouched.
    pub fn rotate(&mut self, angle: f32) -> Result<(), GeometryError> {
        self.points = compute_points(
            self.origin,
            &self.path,
            &self.options,
            self.options.rotation_offset + angle,
        )?;
        self.rotation = angle;
        Ok(())
    }

    /// Move the reference point, keeping the current rotation
    pub fn set_origin(&mut self, origin: Vec2) -> Result<(), GeometryError> {
        self.points = compute_points(
            origin,
            &self.path,
            &self.options,
            self.options.rotation_offset + self.rotation,
        )?;
        self.origin = origin;
        Ok(())
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Points as integer pixel tuples
    pub fn point_tuples(&self) -> Vec<(i32, i32)> {
        self.points
            .iter()
            .map(|p| (p.x.round() as i32, p.y.round() as i32))
            .collect()
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for an empty polygon
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        polygon_bounds(&self.points)
    }

    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }
}

fn compute_points(
    origin: Vec2,
    path: &[Vec2],
    options: &PathOptions,
    net_rotation: f32,
) -> Result<Vec<Vec2>, GeometryError> {
    let m = if net_rotation != 0.0 {
        rotation_matrix(net_rotation)
    } else {
        Mat2::IDENTITY
    };
    let offset = m * options.position_offset;

    let mut cursor = origin;
    let mut points: Vec<Vec2> = path
        .iter()
        .map(|v| {
            cursor += m * *v;
            cursor + offset
        })
        .collect();

    let first = if options.close_origin || points.is_empty() {
        None
    } else {
        Some(points.remove(0))
    };

    if options.closed {
        let target = if options.close_origin {
            origin + offset
        } else {
            first.ok_or_else(|| GeometryError::InvalidGeometry("empty closed path".into()))?
        };
        let last = points
            .last()
            .copied()
            .ok_or_else(|| GeometryError::InvalidGeometry("empty closed path".into()))?;

        if !same_rounded(last, target) {
            if options.auto_close {
                return Err(GeometryError::InvalidGeometry(
                    "auto-close is not supported".into(),
                ));
            }
            let which = if options.close_origin {
                "origin"
            } else {
                "first path point"
            };
            return Err(GeometryError::InvalidGeometry(format!(
                "last point {} must equal the {} {}",
                last, which, target
            )));
        }
    }

    Ok(points)
}

/// Equality after rounding, tolerating values that straddle a rounding step
fn same_rounded(a: Vec2, b: Vec2) -> bool {
    let unit = 10f32.powi(-CLOSURE_DECIMALS);
    let diff = (a.rounded(CLOSURE_DECIMALS) - b.rounded(CLOSURE_DECIMALS)).abs();
    diff.x <= unit * 1.5 && diff.y <= unit * 1.5
}

/// Shoelace area (absolute)
pub fn polygon_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f32 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum();
    twice.abs() / 2.0
}

pub fn polygon_bounds(points: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
    )
}
