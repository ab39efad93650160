//! Player tanks
//!
//! A tank's pose is its centre position and rotation. The facing direction is
//! derived from the rotation and recomputed on every rotation change. Movement
//! is queued as [`Action`]s and applied once per tick through collision
//! correction; shooting happens immediately.

use std::fmt;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::{Correctable, Correction, correct_motion};
use super::map::TankMap;
use super::projectile::{Ammunition, Projectile};
use crate::error::GeometryError;
use crate::geometry::PathPolygon;
use crate::renderer::{Collidable, Color, GREY, Mask, Surface, shapes};
use crate::settings::TankSettings;
use crate::wrap_angle;

/// Barrel drawn on top of the hull
const BARREL_WIDTH: f32 = 8.0;

/// Something a player can make a tank do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Forward,
    Backward,
    Shoot,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Left,
        Action::Right,
        Action::Forward,
        Action::Backward,
        Action::Shoot,
    ];

    /// Movement is queued and collision corrected; shooting is not
    pub fn is_movement(self) -> bool {
        !matches!(self, Action::Shoot)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Forward => "forward",
            Action::Backward => "backward",
            Action::Shoot => "shoot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and rotation, enough to undo a move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone)]
pub struct Tank {
    position: Vec2,
    rotation: f32,
    direction: Vec2,
    settings: TankSettings,
    pending: Vec<Action>,
    /// Hull outline, kept at the current pose
    hull: PathPolygon,
    silhouette: Mask,
    silhouette_offset: IVec2,
    ammo: Ammunition,
    color: Color,
}

impl Tank {
    /// Tank centred on `position`, facing up
    pub fn new(
        position: Vec2,
        settings: TankSettings,
        ammo: Ammunition,
    ) -> Result<Self, GeometryError> {
        let hull = shapes::centered_rect(position, settings.width, settings.height, 0.0)?;
        let mut tank = Self {
            position,
            rotation: 0.0,
            direction: Vec2::ZERO,
            settings,
            pending: Vec::new(),
            hull,
            silhouette: Mask::new(0, 0),
            silhouette_offset: IVec2::ZERO,
            ammo,
            color: GREY,
        };
        tank.set_rotation(0.0);
        Ok(tank)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Unit vector the tank faces
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub fn settings(&self) -> &TankSettings {
        &self.settings
    }

    pub fn pending(&self) -> &[Action] {
        &self.pending
    }

    pub fn ammo(&self) -> &Ammunition {
        &self.ammo
    }

    pub fn ammo_mut(&mut self) -> &mut Ammunition {
        &mut self.ammo
    }

    /// Hull outline in world space
    pub fn outline(&self) -> &[Vec2] {
        self.hull.points()
    }

    /// Where shots appear
    pub fn muzzle(&self) -> Vec2 {
        self.position + self.direction * self.settings.muzzle_distance
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_silhouette();
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = wrap_angle(rotation);
        self.direction = Vec2::from_angle(self.rotation + self.settings.rotation_offset);
        self.refresh_silhouette();
    }

    /// Queue a movement for the next update; shooting is not queued
    pub fn queue(&mut self, action: Action) {
        if action.is_movement() {
            self.pending.push(action);
        } else {
            log::debug!("Ignoring queued {}, shots are fired directly", action);
        }
    }

    /// Queue a movement or fire right away
    pub fn act(&mut self, action: Action, now: u64) {
        match action {
            Action::Shoot => {
                self.shoot(now);
            }
            movement => self.queue(movement),
        }
    }

    /// Fire from the muzzle if the ammunition allows it
    pub fn shoot(&mut self, now: u64) -> Option<&Projectile> {
        let (muzzle, direction) = (self.muzzle(), self.direction);
        self.ammo.try_fire(now, muzzle, direction)
    }

    /// Apply the queued movement, shortened as needed to stay clear of walls
    pub fn update(&mut self, map: &TankMap) -> Correction {
        let threshold = self.settings.collision_threshold;
        correct_motion(self, map, threshold)
    }

    fn step(&mut self, action: Action, scale: f32) {
        let turn = (self.settings.rotation_speed * scale) % std::f32::consts::TAU;
        match action {
            Action::Left => self.turn_by(-turn),
            Action::Right => self.turn_by(turn),
            Action::Forward => self.position += self.direction * self.settings.speed * scale,
            Action::Backward => self.position -= self.direction * self.settings.speed * scale,
            Action::Shoot => {}
        }
    }

    fn turn_by(&mut self, angle: f32) {
        self.rotation = wrap_angle(self.rotation + angle);
        self.direction = Vec2::from_angle(self.rotation + self.settings.rotation_offset);
    }

    fn refresh_silhouette(&mut self) {
        let placed = self
            .hull
            .set_origin(self.position)
            .and_then(|()| self.hull.rotate(self.rotation));
        if let Err(err) = placed {
            log::warn!("Keeping previous hull outline at {}: {}", self.position, err);
        }
        let (mask, offset) = Mask::from_polygon(self.hull.points());
        self.silhouette = mask;
        self.silhouette_offset = offset;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_polygon(self.hull.points(), self.color);
        surface.draw_line(self.position, self.muzzle(), BARREL_WIDTH, self.color);
        self.ammo.draw(surface);
    }
}

impl Collidable for Tank {
    fn mask(&self) -> &Mask {
        &self.silhouette
    }

    fn mask_offset(&self) -> IVec2 {
        self.silhouette_offset
    }
}

impl Correctable for Tank {
    type Snapshot = Pose;

    fn snapshot(&self) -> Pose {
        self.pose()
    }

    fn restore(&mut self, snapshot: &Pose) {
        self.position = snapshot.position;
        self.set_rotation(snapshot.rotation);
    }

    fn apply_pending(&mut self, scale: f32) {
        for i in 0..self.pending.len() {
            self.step(self.pending[i], scale);
        }
        self.refresh_silhouette();
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn clear_pending(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::projectile::AmmoType;
    use std::f32::consts::FRAC_PI_2;

    fn tank_at(x: f32, y: f32) -> Tank {
        Tank::new(
            Vec2::new(x, y),
            TankSettings::default(),
            Ammunition::of(AmmoType::Normal, TICKS_PER_SECOND),
        )
        .unwrap()
    }

    fn assert_direction_matches_rotation(tank: &Tank) {
        let expected = Vec2::from_angle(tank.rotation() + TANK_ROTATION_OFFSET);
        assert!((tank.direction() - expected).length() < 1e-5);
        assert!((tank.direction().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_action_names() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_name("jump"), None);
        assert!(!Action::Shoot.is_movement());
        assert!(Action::Left.is_movement());
    }

    #[test]
    fn test_new_tank_faces_up() {
        let tank = tank_at(300.0, 300.0);
        assert!((tank.direction() - Vec2::new(0.0, -1.0)).length() < 1e-5);
        assert!((tank.muzzle() - Vec2::new(300.0, 230.0)).length() < 1e-3);
        assert_eq!(tank.mask().size(), (62, 114));
        assert_eq!(tank.mask_offset(), IVec2::new(269, 243));
    }

    #[test]
    fn test_outline_follows_pose() {
        let mut tank = tank_at(300.0, 300.0);
        tank.set_position(Vec2::new(400.0, 250.0));
        tank.set_rotation(0.7);

        let mut expected =
            shapes::centered_rect(Vec2::new(400.0, 250.0), TANK_WIDTH, TANK_HEIGHT, 0.0).unwrap();
        expected.rotate(0.7).unwrap();
        assert_eq!(tank.outline().len(), 4);
        for (a, b) in tank.outline().iter().zip(expected.points()) {
            assert!((*a - *b).length() < 1e-3, "{} vs {}", a, b);
        }
        assert_eq!(tank.mask(), &Mask::from_polygon(expected.points()).0);
    }

    #[test]
    fn test_forward_moves_along_direction() {
        let map = TankMap::new(1080, 720);
        let mut tank = tank_at(300.0, 300.0);
        tank.queue(Action::Forward);
        tank.queue(Action::Forward);
        let result = tank.update(&map);
        assert_eq!(result, Correction::Accepted { scale: 1.0, attempts: 1 });
        assert!((tank.position() - Vec2::new(300.0, 290.0)).length() < 1e-3);
        assert!(tank.pending().is_empty());
    }

    #[test]
    fn test_rotation_keeps_direction_in_sync() {
        let map = TankMap::new(1080, 720);
        let mut tank = tank_at(300.0, 300.0);
        for _ in 0..25 {
            tank.queue(Action::Right);
            tank.update(&map);
            assert_direction_matches_rotation(&tank);
        }
        // A quarter turn clockwise on screen faces right
        assert!((tank.rotation() - FRAC_PI_2).abs() < 1e-4);
        assert!((tank.direction() - Vec2::X).length() < 1e-3);

        tank.queue(Action::Left);
        tank.queue(Action::Left);
        tank.update(&map);
        assert_direction_matches_rotation(&tank);
    }

    #[test]
    fn test_left_turn_wraps_rotation() {
        let map = TankMap::new(1080, 720);
        let mut tank = tank_at(300.0, 300.0);
        tank.queue(Action::Left);
        tank.update(&map);
        assert!(tank.rotation() > 6.0 && tank.rotation() < std::f32::consts::TAU);
        assert_direction_matches_rotation(&tank);
    }

    #[test]
    fn test_blocked_move_is_halved() {
        let mut map = TankMap::new(1080, 720);
        // Covers rows 130..140; the hull's top edge starts at y = 143
        map.add_wall(Vec2::new(100.0, 135.0), Vec2::new(500.0, 135.0))
            .unwrap();
        let mut tank = tank_at(300.0, 200.0);
        tank.queue(Action::Forward);
        let result = tank.update(&map);

        assert_eq!(result, Correction::Accepted { scale: 0.5, attempts: 2 });
        assert!((tank.position().y - 197.5).abs() < 1e-3);
        assert!(map.hits_any_wall(&tank).is_none());
    }

    #[test]
    fn test_stuck_tank_is_forced_through() {
        let mut map = TankMap::new(1080, 720);
        map.add_wall(Vec2::new(100.0, 200.0), Vec2::new(500.0, 200.0))
            .unwrap();
        let mut tank = tank_at(300.0, 200.0);
        assert!(map.hits_any_wall(&tank).is_some());

        let mut expected = tank.clone();
        expected.queue(Action::Right);
        expected.queue(Action::Forward);
        expected.apply_pending(1.0);

        tank.queue(Action::Right);
        tank.queue(Action::Forward);
        let result = tank.update(&map);

        assert!(result.is_forced());
        assert_eq!(tank.pose(), expected.pose());
        assert_eq!(tank.mask(), expected.mask());
        assert!(tank.pending().is_empty());
    }

    #[test]
    fn test_shoot_fires_from_muzzle() {
        let mut tank = tank_at(300.0, 300.0);
        let muzzle = tank.muzzle();
        let shot = tank.shoot(0).unwrap();
        assert_eq!(shot.position(), muzzle);
        assert!((shot.direction() - Vec2::new(0.0, -1.0)).length() < 1e-5);

        tank.act(Action::Shoot, 1);
        assert_eq!(tank.ammo().shots().len(), 1);
        tank.act(Action::Shoot, 6);
        assert_eq!(tank.ammo().shots().len(), 2);
        assert!(tank.pending().is_empty());
    }

    #[test]
    fn test_queue_ignores_shoot() {
        let mut tank = tank_at(300.0, 300.0);
        tank.queue(Action::Shoot);
        tank.act(Action::Backward, 0);
        assert_eq!(tank.pending(), &[Action::Backward]);
    }

    #[test]
    fn test_draw_covers_hull() {
        let tank = tank_at(100.0, 100.0);
        let mut surface = Mask::new(200, 200);
        tank.draw(&mut surface);
        assert!(surface.get(100, 100));
        assert!(surface.get(70, 44));
        assert!(!surface.get(20, 20));
    }
}
