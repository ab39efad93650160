//! Tank Clash - a small 2D tank arena game
//!
//! Core modules:
//! - `math`: vector/matrix algebra on top of glam
//! - `geometry`: segments, lines and path-built polygons
//! - `renderer`: drawing seam, pixel masks and shape generation
//! - `sim`: walls, the collision map, tanks, projectiles and the game tick
//! - `platform`: input boundary
//! - `persistence`: map files
//! - `editor`: map editor placement and snapping logic
//! - `settings`: data-driven game configuration

pub mod editor;
pub mod error;
pub mod geometry;
pub mod math;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, GeometryError, MapFileError, SettingsError};
pub use settings::GameSettings;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::{FRAC_PI_2, TAU};

    /// Play field size in pixels
    pub const FIELD_WIDTH: u32 = 1080;
    pub const FIELD_HEIGHT: u32 = 720;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Tank silhouette (the sprite faces up)
    pub const TANK_WIDTH: f32 = 62.0;
    pub const TANK_HEIGHT: f32 = 114.0;
    /// Pixels per tick at full scale
    pub const TANK_SPEED: f32 = 5.0;
    /// Radians per tick at full scale
    pub const TANK_ROTATION_SPEED: f32 = TAU / 100.0;
    /// Angle between the x axis and the sprite's facing direction
    pub const TANK_ROTATION_OFFSET: f32 = -FRAC_PI_2;
    /// Distance from the tank centre to where shots appear
    pub const MUZZLE_DISTANCE: f32 = 70.0;

    /// Scale below which collision correction stops halving
    pub const COLLISION_THRESHOLD: f32 = 0.01;
    /// Factor applied to the scale on every retry
    pub const COLLISION_STEP: f32 = 0.5;

    /// Walls that frame the arena and must survive editing
    pub const PROTECTED_WALLS: usize = 4;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn seconds_to_ticks(seconds: f32, ticks_per_second: u32) -> u64 {
    ((seconds * ticks_per_second as f32).round() as u64).max(1)
}
