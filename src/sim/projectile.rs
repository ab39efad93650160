//! Projectiles and the ammunition that spawns them

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::map::TankMap;
use crate::renderer::{BLACK, Collidable, Color, Mask, Surface, shapes};
use crate::seconds_to_ticks;
use crate::settings::AmmoSettings;

/// Segments used when drawing a projectile outline
const OUTLINE_SEGMENTS: usize = 16;

/// A cannon ball travelling in a straight line until it hits a wall
#[derive(Debug, Clone)]
pub struct Projectile {
    position: Vec2,
    direction: Vec2,
    speed: f32,
    radius: f32,
    mask: Mask,
    /// Tick the shot was fired on
    born: u64,
    /// Ticks the shot stays alive
    lifetime: u64,
}

impl Projectile {
    pub fn new(
        position: Vec2,
        direction: Vec2,
        speed: f32,
        radius: f32,
        born: u64,
        lifetime: u64,
    ) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            speed,
            radius,
            mask: Mask::disc(radius),
            born,
            lifetime,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn born(&self) -> u64 {
        self.born
    }

    /// Move one tick; a shot that runs into a wall stays put and bounces off
    /// it instead. Returns whether it bounced.
    pub fn advance(&mut self, map: &TankMap) -> bool {
        let previous = self.position;
        self.position += self.direction * self.speed;

        let Some(wall) = map.hits_wall(&*self) else {
            return false;
        };
        match wall.reflect(self.direction) {
            Ok(bounced) => {
                self.position = previous;
                self.direction = bounced;
                true
            }
            Err(err) => {
                log::warn!("Projectile at {} could not bounce: {}", self.position, err);
                false
            }
        }
    }

    pub fn has_expired(&self, now: u64) -> bool {
        now.saturating_sub(self.born) > self.lifetime
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, color: Color) {
        match shapes::circle(self.position, self.radius, OUTLINE_SEGMENTS) {
            Ok(outline) => surface.fill_polygon(outline.points(), color),
            Err(err) => log::warn!("Skipping projectile outline: {}", err),
        }
    }
}

impl Collidable for Projectile {
    fn mask(&self) -> &Mask {
        &self.mask
    }

    fn mask_offset(&self) -> IVec2 {
        (self.position - Vec2::splat(self.mask.width() as f32 / 2.0))
            .floor()
            .as_ivec2()
    }
}

/// Available ammunition kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoType {
    Normal,
}

impl AmmoType {
    /// Default tuning for this kind
    pub fn preset(self) -> AmmoSettings {
        match self {
            AmmoType::Normal => AmmoSettings {
                shot_interval: 0.1,
                shot_maximum: 10,
                lifetime: 2.0,
                speed: 10.0,
                radius: 15.0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AmmoType::Normal => "normal",
        }
    }
}

/// A magazine of live shots, limited by fire rate and shot count
#[derive(Debug, Clone)]
pub struct Ammunition {
    kind: AmmoType,
    settings: AmmoSettings,
    interval_ticks: u64,
    lifetime_ticks: u64,
    last_shot: Option<u64>,
    shots: Vec<Projectile>,
}

impl Ammunition {
    pub fn new(kind: AmmoType, settings: AmmoSettings, ticks_per_second: u32) -> Self {
        Self {
            kind,
            settings,
            interval_ticks: (settings.shot_interval * ticks_per_second as f32).round() as u64,
            lifetime_ticks: seconds_to_ticks(settings.lifetime, ticks_per_second),
            last_shot: None,
            shots: Vec::new(),
        }
    }

    /// Ammunition of `kind` with its preset tuning
    pub fn of(kind: AmmoType, ticks_per_second: u32) -> Self {
        Self::new(kind, kind.preset(), ticks_per_second)
    }

    pub fn kind(&self) -> AmmoType {
        self.kind
    }

    pub fn shots(&self) -> &[Projectile] {
        &self.shots
    }

    /// Fire unless the shot limit is reached or the last shot was too recent
    pub fn try_fire(&mut self, now: u64, position: Vec2, direction: Vec2) -> Option<&Projectile> {
        if self.shots.len() >= self.settings.shot_maximum {
            log::trace!(
                "{} ammo: {} shots already live",
                self.kind.as_str(),
                self.shots.len()
            );
            return None;
        }
        if let Some(last) = self.last_shot {
            if now.saturating_sub(last) < self.interval_ticks {
                return None;
            }
        }
        Some(self.force_fire(now, position, direction))
    }

    /// Fire regardless of limits
    pub fn force_fire(&mut self, now: u64, position: Vec2, direction: Vec2) -> &Projectile {
        self.last_shot = Some(now);
        self.shots.push(Projectile::new(
            position,
            direction,
            self.settings.speed,
            self.settings.radius,
            now,
            self.lifetime_ticks,
        ));
        &self.shots[self.shots.len() - 1]
    }

    /// Advance every live shot; returns how many bounced
    pub fn update(&mut self, map: &TankMap) -> usize {
        self.shots
            .iter_mut()
            .map(|s| s.advance(map))
            .filter(|&bounced| bounced)
            .count()
    }

    /// Drop shots that outlived their lifetime; returns how many went
    pub fn remove_expired(&mut self, now: u64) -> usize {
        let before = self.shots.len();
        self.shots.retain(|s| !s.has_expired(now));
        before - self.shots.len()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for shot in &self.shots {
            shot.draw(surface, BLACK);
        }
    }
}
