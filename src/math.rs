//! 2D vector and matrix algebra on top of glam
//!
//! `Vec2` plays the role of the plain vector type and `Mat2` of the 2x2
//! matrix. The extra operations the collision code needs live in
//! [`Vec2Ext`]; every one of them is pure and returns a new value.

use glam::{Mat2, Vec2};

use crate::error::GeometryError;

/// Build a rotation matrix for `angle` radians (counter-clockwise in a y-up
/// frame, clockwise on screen where y grows downward)
#[inline]
pub fn rotation_matrix(angle: f32) -> Mat2 {
    let (sin, cos) = angle.sin_cos();
    Mat2::from_cols(Vec2::new(cos, sin), Vec2::new(-sin, cos))
}

/// Build a matrix from two basis vectors (its columns)
#[inline]
pub fn basis_matrix(x_axis: Vec2, y_axis: Vec2) -> Mat2 {
    Mat2::from_cols(x_axis, y_axis)
}

/// Round a scalar to a fixed number of decimals
#[inline]
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).round() / factor
}

fn require_nonzero(v: Vec2, what: &'static str) -> Result<f32, GeometryError> {
    let len = v.length();
    if len == 0.0 || !len.is_finite() {
        return Err(GeometryError::DegenerateInput(what));
    }
    Ok(len)
}

/// Named vector operations used throughout the geometry and collision code
pub trait Vec2Ext: Sized {
    /// Enclosed angle in `[0, π]`
    fn angle_between(self, other: Vec2) -> Result<f32, GeometryError>;
    /// Angle against the positive x axis in `[0, 2π)`
    fn to_angle_from_x_axis(self) -> Result<f32, GeometryError>;
    /// Vector projection onto `axis`
    fn projection_onto(self, axis: Vec2) -> Result<Vec2, GeometryError>;
    /// Mirror across the line spanned by `axis`: `2 * projection - self`
    fn reflect_across(self, axis: Vec2) -> Result<Vec2, GeometryError>;
    fn rotate_by(self, angle: f32) -> Vec2;
    /// Component-wise rounding to `decimals` places
    fn rounded(self, decimals: i32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    fn angle_between(self, other: Vec2) -> Result<f32, GeometryError> {
        let a = require_nonzero(self, "angle between a zero-length vector")?;
        let b = require_nonzero(other, "angle between a zero-length vector")?;
        // Clamp so rounding noise on parallel vectors never produces NaN
        let cos = (self.dot(other) / (a * b)).clamp(-1.0, 1.0);
        Ok(cos.acos())
    }

    fn to_angle_from_x_axis(self) -> Result<f32, GeometryError> {
        let angle = self.angle_between(Vec2::X)?;
        if self.y < 0.0 {
            Ok(std::f32::consts::TAU - angle)
        } else {
            Ok(angle)
        }
    }

    fn projection_onto(self, axis: Vec2) -> Result<Vec2, GeometryError> {
        let len = require_nonzero(axis, "projection onto a zero-length axis")?;
        Ok(axis * (self.dot(axis) / (len * len)))
    }

    fn reflect_across(self, axis: Vec2) -> Result<Vec2, GeometryError> {
        Ok(self.projection_onto(axis)? * 2.0 - self)
    }

    #[inline]
    fn rotate_by(self, angle: f32) -> Vec2 {
        rotation_matrix(angle) * self
    }

    fn rounded(self, decimals: i32) -> Vec2 {
        Vec2::new(round_to(self.x, decimals), round_to(self.y, decimals))
    }
}
