//! Fixed timestep simulation tick
//!
//! One tick reads the held keys, applies the resulting tank moves through
//! collision correction, then advances and expires projectiles.

use super::collision::Correction;
use super::state::TankClash;
use crate::platform::InputSource;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Correction outcome per player id, for tanks that moved
    pub corrections: Vec<(u32, Correction)>,
    /// Shots fired this tick
    pub fired: usize,
    /// Projectiles that bounced off a wall
    pub bounces: usize,
    /// Projectiles removed after their lifetime ran out
    pub expired: usize,
}

impl TickReport {
    /// Tanks that had to be pushed through a wall
    pub fn forced(&self) -> usize {
        self.corrections.iter().filter(|(_, c)| c.is_forced()).count()
    }
}

/// Advance the game by one fixed timestep
pub fn tick<I: InputSource + ?Sized>(game: &mut TankClash, input: &I) -> TickReport {
    let now = game.tick_count();
    let mut report = TickReport::default();
    let (map, players) = game.split_mut();

    for player in players.iter_mut() {
        let shots_before = player.tank.ammo().shots().len();
        for &(key, action) in player.controls.bindings() {
            if input.held_down(key) {
                player.tank.act(action, now);
            }
        }
        report.fired += player.tank.ammo().shots().len() - shots_before;

        let correction = player.tank.update(map);
        if correction != Correction::Idle {
            if correction.is_forced() {
                log::debug!(
                    "Tick {}: {} forced through a wall at {}",
                    now,
                    player.name,
                    player.tank.position()
                );
            }
            report.corrections.push((player.id, correction));
        }
    }

    for player in players.iter_mut() {
        let ammo = player.tank.ammo_mut();
        report.bounces += ammo.update(map);
        report.expired += ammo.remove_expired(now);
    }

    game.advance_tick();
    log::trace!("Tick {}: {:?}", now, report);
    report
}
