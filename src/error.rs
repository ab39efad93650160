//! Error types
//!
//! Geometry construction, map files, settings and game setup each get their
//! own error enum. Ordinary "nothing hit" results are `Option::None`, never errors.

use std::fmt;

/// Geometry precondition and construction failures
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A path polygon failed its closure check (or asked for auto-close)
    InvalidGeometry(String),
    /// A zero-length vector was passed where a direction is required
    DegenerateInput(&'static str),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidGeometry(reason) => write!(f, "invalid geometry: {}", reason),
            GeometryError::DegenerateInput(what) => write!(f, "degenerate input: {}", what),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Map file read/write failures
#[derive(Debug)]
pub enum MapFileError {
    Io(std::io::Error),
    /// A record could not be parsed (line is 1-based)
    Parse { line: usize, reason: String },
    /// A record parsed but did not produce a wall
    Geometry(GeometryError),
}

impl fmt::Display for MapFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapFileError::Io(err) => write!(f, "map file i/o error: {}", err),
            MapFileError::Parse { line, reason } => {
                write!(f, "map file parse error on line {}: {}", line, reason)
            }
            MapFileError::Geometry(err) => write!(f, "map file geometry error: {}", err),
        }
    }
}

impl std::error::Error for MapFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapFileError::Io(err) => Some(err),
            MapFileError::Parse { .. } => None,
            MapFileError::Geometry(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for MapFileError {
    fn from(err: std::io::Error) -> Self {
        MapFileError::Io(err)
    }
}

impl From<GeometryError> for MapFileError {
    fn from(err: GeometryError) -> Self {
        MapFileError::Geometry(err)
    }
}

/// Settings load failures
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "settings i/o error: {}", err),
            SettingsError::Json(err) => write!(f, "settings json error: {}", err),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Json(err)
    }
}

/// Game setup failures
#[derive(Debug)]
pub enum GameError {
    Map(MapFileError),
    Geometry(GeometryError),
    /// The map has too little free room to place every tank
    NoSpawnLocation { wanted: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Map(err) => write!(f, "{}", err),
            GameError::Geometry(err) => write!(f, "{}", err),
            GameError::NoSpawnLocation { wanted } => {
                write!(f, "no room to spawn {} tank(s)", wanted)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Map(err) => Some(err),
            GameError::Geometry(err) => Some(err),
            GameError::NoSpawnLocation { .. } => None,
        }
    }
}

impl From<MapFileError> for GameError {
    fn from(err: MapFileError) -> Self {
        GameError::Map(err)
    }
}

impl From<GeometryError> for GameError {
    fn from(err: GeometryError) -> Self {
        GameError::Geometry(err)
    }
}
