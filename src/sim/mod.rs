//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only (spawn placement)
//! - Stable iteration order (walls by insertion, players by join order)
//! - Drawing only through the `Surface` seam

pub mod collision;
pub mod map;
pub mod projectile;
pub mod state;
pub mod tank;
pub mod tick;
pub mod wall;

pub use collision::{Correctable, Correction, correct_motion};
pub use map::{BOUNDARY_WALLS, TankMap, boundary_walls};
pub use projectile::{AmmoType, Ammunition, Projectile};
pub use state::{Controls, Player, TankClash};
pub use tank::{Action, Pose, Tank};
pub use tick::{TickReport, tick};
pub use wall::Wall;
