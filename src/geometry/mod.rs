//! Geometric primitives
//!
//! - `Line2D`: finite segment with distance, containment and reflection
//! - `Straight2D`: infinite line through a point
//! - `Point2D` / `PointKey`: points and their hashable form
//! - `PathPolygon`: polygons built by walking a path of relative vectors

pub mod line;
pub mod point;
pub mod polygon;
pub mod straight;

pub use line::Line2D;
pub use point::{Point2D, PointKey};
pub use polygon::{CLOSURE_DECIMALS, PathPolygon};
pub use straight::Straight2D;
