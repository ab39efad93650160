//! Keyboard and mouse state

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the game and the editor react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    C,
    Z,
    Space,
    Return,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Num1,
    Num2,
    Num3,
    Num4,
    LeftCtrl,
    RightCtrl,
}

impl Key {
    pub const ALL: [Key; 19] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::C,
        Key::Z,
        Key::Space,
        Key::Return,
        Key::Escape,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::LeftCtrl,
        Key::RightCtrl,
    ];

    /// Conventional lower case key name ("w", "space", "return", "1", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::C => "c",
            Key::Z => "z",
            Key::Space => "space",
            Key::Return => "return",
            Key::Escape => "escape",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Num1 => "1",
            Key::Num2 => "2",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::LeftCtrl => "left ctrl",
            Key::RightCtrl => "right ctrl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Read-only view of the input state for the current tick
pub trait InputSource {
    /// Key is currently held
    fn held_down(&self, key: Key) -> bool;
    /// Key went down during this tick
    fn key_down(&self, key: Key) -> bool;
    /// Key was released during this tick
    fn key_up(&self, key: Key) -> bool;

    fn mouse_position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn mouse_held(&self, _button: MouseButton) -> bool {
        false
    }

    /// Mouse button was released during this tick
    fn mouse_up(&self, _button: MouseButton) -> bool {
        false
    }

    fn ctrl_held(&self) -> bool {
        self.held_down(Key::LeftCtrl) || self.held_down(Key::RightCtrl)
    }
}

/// Input state captured for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    held: BTreeSet<Key>,
    pressed: BTreeSet<Key>,
    released: BTreeSet<Key>,
    mouse: Vec2,
    mouse_held: BTreeSet<MouseButton>,
    mouse_released: BTreeSet<MouseButton>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key goes down this tick and stays held
    pub fn press(&mut self, key: Key) -> &mut Self {
        self.pressed.insert(key);
        self.held.insert(key);
        self
    }

    /// Key is held without a fresh press
    pub fn hold(&mut self, key: Key) -> &mut Self {
        self.held.insert(key);
        self
    }

    pub fn release(&mut self, key: Key) -> &mut Self {
        self.held.remove(&key);
        self.released.insert(key);
        self
    }

    pub fn move_mouse(&mut self, position: Vec2) -> &mut Self {
        self.mouse = position;
        self
    }

    pub fn hold_mouse(&mut self, button: MouseButton) -> &mut Self {
        self.mouse_held.insert(button);
        self
    }

    pub fn release_mouse(&mut self, button: MouseButton) -> &mut Self {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
        self
    }

    /// Forget this tick's presses and releases, keeping what is held
    pub fn next_tick(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.mouse_released.clear();
    }

    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }
}

impl InputSource for InputSnapshot {
    fn held_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn key_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn key_up(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    fn mouse_up(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.as_str()), Some(key));
        }
        assert_eq!(Key::from_name(" Space "), Some(Key::Space));
        assert_eq!(Key::from_name("f13"), None);
    }

    #[test]
    fn test_press_hold_release() {
        let mut input = InputSnapshot::new();
        input.press(Key::W).hold(Key::LeftCtrl);
        assert!(input.key_down(Key::W));
        assert!(input.held_down(Key::W));
        assert!(input.ctrl_held());

        input.next_tick();
        assert!(!input.key_down(Key::W));
        assert!(input.held_down(Key::W));

        input.release(Key::W);
        assert!(input.key_up(Key::W));
        assert!(!input.held_down(Key::W));
        assert_eq!(input.held_keys().collect::<Vec<_>>(), vec![Key::LeftCtrl]);
    }

    #[test]
    fn test_mouse_state() {
        let mut input = InputSnapshot::new();
        input
            .move_mouse(Vec2::new(10.0, 20.0))
            .hold_mouse(MouseButton::Right);
        assert_eq!(input.mouse_position(), Vec2::new(10.0, 20.0));
        assert!(input.mouse_held(MouseButton::Right));
        assert!(!input.mouse_up(MouseButton::Left));

        input.release_mouse(MouseButton::Right);
        assert!(input.mouse_up(MouseButton::Right));
        assert!(!input.mouse_held(MouseButton::Right));
        input.next_tick();
        assert!(!input.mouse_up(MouseButton::Right));
    }
}
