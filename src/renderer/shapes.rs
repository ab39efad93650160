//! Shape generation for 2D primitives
//!
//! All shapes are produced with the path polygon builder so their outlines
//! match what the collision masks are rasterized from.

use glam::Vec2;

use crate::error::GeometryError;
use crate::geometry::polygon::{PathOptions, PathPolygon};
use crate::math::Vec2Ext;

/// Rectangle path: along x, down y, back, up
pub fn rect_path(width: f32, height: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(width, 0.0),
        Vec2::new(0.0, height),
        Vec2::new(-width, 0.0),
        Vec2::new(0.0, -height),
    ]
}

/// Rectangle of `length x thickness` laid along `angle` from `start`,
/// centred on that centre line and extended by `overhang` past both ends
pub fn band(
    start: Vec2,
    angle: f32,
    length: f32,
    thickness: f32,
    overhang: f32,
) -> Result<PathPolygon, GeometryError> {
    PathPolygon::build(
        start,
        rect_path(length + 2.0 * overhang, thickness),
        PathOptions {
            position_offset: Vec2::new(-overhang, -thickness / 2.0),
            rotation_offset: angle,
            ..Default::default()
        },
    )
}

/// `width x height` rectangle centred on `center`, rotated by `rotation`.
/// [`PathPolygon::rotate`] turns it about the centre.
pub fn centered_rect(
    center: Vec2,
    width: f32,
    height: f32,
    rotation: f32,
) -> Result<PathPolygon, GeometryError> {
    PathPolygon::build(
        center,
        rect_path(width, height),
        PathOptions {
            position_offset: Vec2::new(-width / 2.0, -height / 2.0),
            rotation_offset: rotation,
            ..Default::default()
        },
    )
}

/// Regular polygon approximating a circle
pub fn circle(center: Vec2, radius: f32, segments: usize) -> Result<PathPolygon, GeometryError> {
    let segments = segments.max(3);
    let step = std::f32::consts::TAU / segments as f32;
    let path: Vec<Vec2> = (0..segments)
        .map(|i| {
            let a = Vec2::from_angle(i as f32 * step);
            let b = Vec2::from_angle((i + 1) as f32 * step);
            (b - a) * radius
        })
        .collect();
    PathPolygon::build(
        center,
        path,
        PathOptions {
            position_offset: Vec2::new(radius, 0.0),
            ..Default::default()
        },
    )
}

/// Arrow dimensions for [`vector_arrow`]
#[derive(Debug, Clone, Copy)]
pub struct ArrowStyle {
    pub length: f32,
    pub line_width: f32,
    pub head_length: f32,
    pub head_width: f32,
    /// Multiply `length` by the vector's magnitude
    pub scale: bool,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            length: 100.0,
            line_width: 7.0,
            head_length: 20.0,
            head_width: 14.0,
            scale: true,
        }
    }
}

/// Debug overlay arrow starting at `origin` and pointing along `vector`
///
/// The path starts with a jump to the tip and walks the outline back to it,
/// so it closes on its first point rather than on the origin.
pub fn vector_arrow(
    origin: Vec2,
    vector: Vec2,
    style: ArrowStyle,
) -> Result<PathPolygon, GeometryError> {
    let angle = vector.to_angle_from_x_axis()?;
    let length = if style.scale {
        style.length * vector.length()
    } else {
        style.length
    };
    let (hl, hw, lw) = (style.head_length, style.head_width / 2.0, style.line_width / 2.0);

    let path = vec![
        Vec2::new(length, 0.0),
        Vec2::new(-hl, -hw),
        Vec2::new(0.0, hw - lw),
        Vec2::new(hl - length, 0.0),
        Vec2::new(0.0, 2.0 * lw),
        Vec2::new(length - hl, 0.0),
        Vec2::new(0.0, hw - lw),
        Vec2::new(hl, -hw),
    ];
    PathPolygon::build(
        origin,
        path,
        PathOptions {
            rotation_offset: angle,
            close_origin: false,
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_band_along_x() {
        let b = band(Vec2::new(100.0, 100.0), 0.0, 400.0, 10.0, 0.0).unwrap();
        let (min, max) = b.bounds().unwrap();
        assert!((min - Vec2::new(100.0, 95.0)).length() < 1e-3);
        assert!((max - Vec2::new(500.0, 105.0)).length() < 1e-3);
    }

    #[test]
    fn test_band_overhang_grows_both_ends() {
        let b = band(Vec2::new(0.0, 0.0), FRAC_PI_2, 50.0, 4.0, 5.0).unwrap();
        let (min, max) = b.bounds().unwrap();
        assert!((min - Vec2::new(-2.0, -5.0)).length() < 1e-3);
        assert!((max - Vec2::new(2.0, 55.0)).length() < 1e-3);
    }

    #[test]
    fn test_centered_rect_rotates_about_center() {
        let mut r = centered_rect(Vec2::new(50.0, 50.0), 20.0, 10.0, 0.0).unwrap();
        r.rotate(FRAC_PI_2).unwrap();
        let (min, max) = r.bounds().unwrap();
        assert!((min - Vec2::new(45.0, 40.0)).length() < 1e-3);
        assert!((max - Vec2::new(55.0, 60.0)).length() < 1e-3);
    }

    #[test]
    fn test_circle_closes() {
        let c = circle(Vec2::new(10.0, 10.0), 15.0, 24).unwrap();
        assert_eq!(c.points().len(), 24);
        for p in c.points() {
            assert!((p.distance(Vec2::new(10.0, 10.0)) - 15.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_arrow_tip_points_along_vector() {
        let arrow = vector_arrow(Vec2::ZERO, Vec2::new(0.0, 1.0), ArrowStyle::default()).unwrap();
        // Seven outline points, the last one is the tip
        assert_eq!(arrow.points().len(), 7);
        let tip = *arrow.points().last().unwrap();
        assert!((tip - Vec2::new(0.0, 100.0)).length() < 1e-2);
    }

    #[test]
    fn test_arrow_for_zero_vector_fails() {
        assert!(vector_arrow(Vec2::ZERO, Vec2::ZERO, ArrowStyle::default()).is_err());
    }
}
