//! Game state: the arena, its players and their controls

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::map::TankMap;
use super::projectile::{AmmoType, Ammunition};
use super::tank::{Action, Tank};
use crate::error::GameError;
use crate::platform::Key;
use crate::renderer::{Color, Surface};
use crate::settings::GameSettings;

/// Tank colours handed out in join order
pub const PLAYER_COLORS: [Color; 4] = [
    [52, 101, 164, 255],
    [204, 0, 0, 255],
    [78, 154, 6, 255],
    [196, 160, 0, 255],
];

/// Key bindings of one player, checked in binding order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    bindings: Vec<(Key, Action)>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, replacing an earlier binding of the key
    pub fn bind(&mut self, key: Key, action: Action) -> &mut Self {
        match self.bindings.iter_mut().find(|(k, _)| *k == key) {
            Some(binding) => binding.1 = action,
            None => self.bindings.push((key, action)),
        }
        self
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, action)| *action)
    }

    pub fn bindings(&self) -> &[(Key, Action)] {
        &self.bindings
    }

    /// W A S D to drive, space to shoot
    pub fn wasd() -> Self {
        let mut controls = Self::new();
        controls
            .bind(Key::W, Action::Forward)
            .bind(Key::A, Action::Left)
            .bind(Key::S, Action::Backward)
            .bind(Key::D, Action::Right)
            .bind(Key::Space, Action::Shoot);
        controls
    }

    /// Arrow keys to drive, return to shoot
    pub fn arrows() -> Self {
        let mut controls = Self::new();
        controls
            .bind(Key::Up, Action::Forward)
            .bind(Key::Left, Action::Left)
            .bind(Key::Down, Action::Backward)
            .bind(Key::Right, Action::Right)
            .bind(Key::Return, Action::Shoot);
        controls
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub id: u32,
    pub score: u32,
    pub tank: Tank,
    pub controls: Controls,
}

impl Player {
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.tank.set_position(Vec2::new(x, y));
    }
}

/// One running match
#[derive(Debug, Clone)]
pub struct TankClash {
    settings: GameSettings,
    map: TankMap,
    players: Vec<Player>,
    next_player_id: u32,
    tick_count: u64,
    rng: Pcg32,
}

impl TankClash {
    /// Game on a bare arena framed by the four perimeter walls
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        let map = TankMap::with_boundary(settings.field_width, settings.field_height)?;
        Ok(Self::with_map(settings, map))
    }

    pub fn with_map(settings: GameSettings, map: TankMap) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self {
            settings,
            map,
            players: Vec::new(),
            next_player_id: 1,
            tick_count: 0,
            rng,
        }
    }

    /// Load the configured map (or the bare arena) and spawn two players
    pub fn setup(settings: GameSettings) -> Result<Self, GameError> {
        let mut game = match settings.map_path.clone() {
            Some(path) => {
                let mut map = TankMap::new(settings.field_width, settings.field_height);
                map.load(&path)?;
                Self::with_map(settings, map)
            }
            None => Self::new(settings)?,
        };

        let spawns = game
            .possible_spawn_locations(2, true)
            .ok_or(GameError::NoSpawnLocation { wanted: 2 })?;
        let roster = [("Player 1", Controls::wasd()), ("Player 2", Controls::arrows())];
        for ((name, controls), spawn) in roster.into_iter().zip(spawns) {
            game.add_player(name, controls, spawn.as_vec2())?;
        }
        log::info!(
            "Match ready: {} walls, {} players",
            game.map.len(),
            game.players.len()
        );
        Ok(game)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn map(&self) -> &TankMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut TankMap {
        &mut self.map
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Ticks simulated so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The map together with mutable players, for the tick loop
    pub(crate) fn split_mut(&mut self) -> (&TankMap, &mut [Player]) {
        (&self.map, &mut self.players)
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick_count += 1;
    }

    /// Add a player with a fresh tank centred on `position`
    pub fn add_player(
        &mut self,
        name: &str,
        controls: Controls,
        position: Vec2,
    ) -> Result<&Player, GameError> {
        let id = self.next_player_id;

        let ammo = Ammunition::new(
            AmmoType::Normal,
            self.settings.ammo,
            self.settings.ticks_per_second,
        );
        let color = PLAYER_COLORS[(id as usize - 1) % PLAYER_COLORS.len()];
        let tank = Tank::new(position, self.settings.tank, ammo)?.with_color(color);
        self.next_player_id += 1;
        log::info!("Player {} '{}' joins at {}", id, name, position);

        self.players.push(Player {
            name: name.to_string(),
            id,
            score: 0,
            tank,
            controls,
        });
        Ok(&self.players[self.players.len() - 1])
    }

    /// Add a player at a random free spot
    pub fn spawn_player(&mut self, name: &str, controls: Controls) -> Result<&Player, GameError> {
        let spawn = self
            .possible_spawn_locations(1, true)
            .and_then(|spawns| spawns.first().copied())
            .ok_or(GameError::NoSpawnLocation { wanted: 1 })?;
        self.add_player(name, controls, spawn.as_vec2())
    }

    pub fn remove_player(&mut self, id: u32) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(index))
    }

    /// Random positions where an upright tank fits between the walls
    ///
    /// Columns and rows are visited in shuffled order and each column yields
    /// at most one position. With `unique` set, `None` is returned unless
    /// `amount` positions were found; otherwise whatever was found is kept.
    pub fn possible_spawn_locations(&mut self, amount: usize, unique: bool) -> Option<Vec<IVec2>> {
        let free = self
            .map
            .free_rect_mask(self.settings.tank.width, self.settings.tank.height);
        let mut xs: Vec<i32> = (0..free.width() as i32).collect();
        let mut ys: Vec<i32> = (0..free.height() as i32).collect();
        xs.shuffle(&mut self.rng);
        ys.shuffle(&mut self.rng);

        let mut found = Vec::with_capacity(amount);
        if amount == 0 {
            return Some(found);
        }
        for &x in &xs {
            if let Some(&y) = ys.iter().find(|&&y| free.get(x, y)) {
                found.push(IVec2::new(x, y));
                if found.len() >= amount {
                    log::debug!("Spawn locations: {:?}", found);
                    return Some(found);
                }
            }
        }

        log::warn!("Only {} of {} spawn locations found", found.len(), amount);
        if unique { None } else { Some(found) }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.map.draw(surface);
        for player in &self.players {
            player.tank.draw(surface);
        }
    }
}
