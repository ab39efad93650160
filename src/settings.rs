//! Game settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::projectile::AmmoType;

/// Tank movement and collision tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankSettings {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Radians per tick
    pub rotation_speed: f32,
    /// Angle between the x axis and the silhouette's facing direction
    pub rotation_offset: f32,
    pub muzzle_distance: f32,
    /// Scale at which collision correction stops halving
    pub collision_threshold: f32,
}

impl Default for TankSettings {
    fn default() -> Self {
        Self {
            width: TANK_WIDTH,
            height: TANK_HEIGHT,
            speed: TANK_SPEED,
            rotation_speed: TANK_ROTATION_SPEED,
            rotation_offset: TANK_ROTATION_OFFSET,
            muzzle_distance: MUZZLE_DISTANCE,
            collision_threshold: COLLISION_THRESHOLD,
        }
    }
}

/// Ammunition behaviour (times in seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoSettings {
    /// Minimum time between two shots
    pub shot_interval: f32,
    /// Maximum shots alive at once
    pub shot_maximum: usize,
    /// How long a shot lives
    pub lifetime: f32,
    /// Pixels per tick
    pub speed: f32,
    pub radius: f32,
}

impl Default for AmmoSettings {
    fn default() -> Self {
        AmmoType::Normal.preset()
    }
}

/// Top level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub field_width: u32,
    pub field_height: u32,
    pub ticks_per_second: u32,
    /// Seed for spawn placement
    pub seed: u64,
    /// Optional map file; the bare perimeter is used when absent
    pub map_path: Option<String>,
    pub tank: TankSettings,
    pub ammo: AmmoSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,
            seed: 0x7a4b_c1a5,
            map_path: None,
            tank: TankSettings::default(),
            ammo: AmmoSettings::default(),
        }
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = GameSettings::from_json("{}").unwrap();
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let settings =
            GameSettings::from_json(r#"{"field_width": 640, "tank": {"speed": 8.0}}"#).unwrap();
        assert_eq!(settings.field_width, 640);
        assert_eq!(settings.field_height, FIELD_HEIGHT);
        assert_eq!(settings.tank.speed, 8.0);
        assert_eq!(settings.tank.width, TANK_WIDTH);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = GameSettings::default();
        settings.map_path = Some("maps/testMap3".into());
        settings.ammo.shot_maximum = 3;
        let json = settings.to_json().unwrap();
        assert_eq!(GameSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            GameSettings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = GameSettings::load_or_default("/definitely/not/here.json");
        assert_eq!(settings, GameSettings::default());
    }
}
