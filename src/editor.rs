//! Map editor
//!
//! Walls are placed with two left clicks: the first sets the start point, the
//! second places a wall to the current target end. Holding the right button
//! constrains the target end by the clip mode and, with corner snap on, pulls
//! the cursor to the nearest wall endpoint.
//!
//! Keys (acted on when released): `z` undoes the last wall (the perimeter is
//! protected), `1`-`4` pick the clip mode, `c` toggles corner snap.
//! `ctrl+s` asks the host to save.

use std::fmt;
use std::path::Path;

use glam::Vec2;

use crate::consts::PROTECTED_WALLS;
use crate::error::{GeometryError, MapFileError};
use crate::platform::{InputSource, Key, MouseButton};
use crate::renderer::{GREY, Surface};
use crate::sim::{TankMap, Wall};

/// Width of the placement preview line
const PREVIEW_WIDTH: f32 = 5.0;

/// How the target end is constrained relative to the start point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipMode {
    #[default]
    Free,
    Horizontal,
    Vertical,
    /// 45 degrees, following the cursor's x
    Diagonal,
}

impl ClipMode {
    pub fn label(self) -> &'static str {
        match self {
            ClipMode::Free => "free",
            ClipMode::Horizontal => "horizontal",
            ClipMode::Vertical => "vertical",
            ClipMode::Diagonal => "diagonal",
        }
    }

    /// Target end for a cursor at `mouse` when the wall starts at `start`
    pub fn constrain(self, start: Vec2, mouse: Vec2) -> Vec2 {
        match self {
            ClipMode::Free => mouse,
            ClipMode::Horizontal => Vec2::new(mouse.x, start.y),
            ClipMode::Vertical => Vec2::new(start.x, mouse.y),
            ClipMode::Diagonal => {
                let dx = mouse.x - start.x;
                if mouse.y >= start.y {
                    Vec2::new(mouse.x, start.y + dx)
                } else {
                    Vec2::new(mouse.x, start.y - dx)
                }
            }
        }
    }
}

impl fmt::Display for ClipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the host should do after a frame of editing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorResponse {
    /// Move the OS cursor here
    pub warp_cursor: Option<Vec2>,
    pub placed: Option<Wall>,
    pub removed: Option<Wall>,
    /// `ctrl+s` was pressed
    pub save_requested: bool,
}

#[derive(Debug, Clone)]
pub struct MapEditor {
    map: TankMap,
    clip_mode: ClipMode,
    corner_mode: bool,
    start: Option<Vec2>,
    target_end: Vec2,
}

impl MapEditor {
    /// Editor over a fresh arena with only the perimeter walls
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        Ok(Self::with_map(TankMap::with_boundary(width, height)?))
    }

    pub fn with_map(map: TankMap) -> Self {
        Self {
            map,
            clip_mode: ClipMode::Free,
            corner_mode: true,
            start: None,
            target_end: Vec2::ZERO,
        }
    }

    pub fn map(&self) -> &TankMap {
        &self.map
    }

    pub fn into_map(self) -> TankMap {
        self.map
    }

    pub fn clip_mode(&self) -> ClipMode {
        self.clip_mode
    }

    pub fn set_clip_mode(&mut self, mode: ClipMode) {
        self.clip_mode = mode;
    }

    pub fn corner_mode(&self) -> bool {
        self.corner_mode
    }

    pub fn toggle_corner_mode(&mut self) {
        self.corner_mode = !self.corner_mode;
    }

    /// Start point of the wall being placed
    pub fn start(&self) -> Option<Vec2> {
        self.start
    }

    pub fn target_end(&self) -> Vec2 {
        self.target_end
    }

    pub fn status_line(&self) -> String {
        format!(
            "clip mode: {}, corner snap: {}",
            self.clip_mode,
            if self.corner_mode { "on" } else { "off" }
        )
    }

    /// Process one frame of input
    pub fn handle<I: InputSource + ?Sized>(
        &mut self,
        input: &I,
    ) -> Result<EditorResponse, GeometryError> {
        let mut response = EditorResponse::default();
        let mut mouse = input.mouse_position();

        if input.mouse_held(MouseButton::Right) {
            if self.corner_mode {
                if let Some(corner) = self.map.closest_wall_corner(mouse.x, mouse.y) {
                    mouse = corner;
                    response.warp_cursor = Some(corner);
                }
            }
            if let Some(start) = self.start {
                self.target_end = self.clip_mode.constrain(start, mouse);
            }
        } else {
            self.target_end = mouse;
        }

        if input.mouse_up(MouseButton::Left) {
            match self.start.take() {
                None => self.start = Some(mouse),
                Some(start) if start == self.target_end => {
                    log::debug!("Ignoring zero-length wall at {}", start);
                }
                Some(start) => {
                    let wall = self.map.add_wall(start, self.target_end)?;
                    response.placed = Some(wall.clone());
                }
            }
        }

        if input.key_up(Key::Z) {
            response.removed = self.map.remove_last(PROTECTED_WALLS);
        } else if input.key_up(Key::Num1) {
            self.clip_mode = ClipMode::Free;
        } else if input.key_up(Key::Num2) {
            self.clip_mode = ClipMode::Horizontal;
        } else if input.key_up(Key::Num3) {
            self.clip_mode = ClipMode::Vertical;
        } else if input.key_up(Key::Num4) {
            self.clip_mode = ClipMode::Diagonal;
        } else if input.key_up(Key::C) {
            self.toggle_corner_mode();
            log::info!("{}", self.status_line());
        }

        response.save_requested = input.ctrl_held() && input.key_down(Key::S);
        Ok(response)
    }

    /// Preview of the wall being placed
    pub fn draw_preview<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(start) = self.start {
            surface.draw_line(start, self.target_end, PREVIEW_WIDTH, GREY);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.map.draw(surface);
        self.draw_preview(surface);
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapFileError> {
        self.map.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::InputSnapshot;
    use crate::renderer::Mask;

    fn click_at(x: f32, y: f32) -> InputSnapshot {
        let mut input = InputSnapshot::new();
        input
            .move_mouse(Vec2::new(x, y))
            .release_mouse(MouseButton::Left);
        input
    }

    fn editor() -> MapEditor {
        let mut editor = MapEditor::new(1080, 720).unwrap();
        editor.toggle_corner_mode();
        editor
    }

    #[test]
    fn test_constrain_modes() {
        let start = Vec2::new(100.0, 100.0);
        let mouse = Vec2::new(160.0, 130.0);
        assert_eq!(ClipMode::Free.constrain(start, mouse), mouse);
        assert_eq!(ClipMode::Horizontal.constrain(start, mouse), Vec2::new(160.0, 100.0));
        assert_eq!(ClipMode::Vertical.constrain(start, mouse), Vec2::new(100.0, 130.0));
        assert_eq!(ClipMode::Diagonal.constrain(start, mouse), Vec2::new(160.0, 160.0));
        assert_eq!(
            ClipMode::Diagonal.constrain(start, Vec2::new(160.0, 70.0)),
            Vec2::new(160.0, 40.0)
        );
    }

    #[test]
    fn test_two_clicks_place_a_wall() {
        let mut editor = editor();
        let first = editor.handle(&click_at(200.0, 300.0)).unwrap();
        assert!(first.placed.is_none());
        assert_eq!(editor.start(), Some(Vec2::new(200.0, 300.0)));

        let second = editor.handle(&click_at(600.0, 300.0)).unwrap();
        let wall = second.placed.unwrap();
        assert_eq!(wall.start(), Vec2::new(200.0, 300.0));
        assert_eq!(wall.end(), Vec2::new(600.0, 300.0));
        assert_eq!(editor.map().len(), PROTECTED_WALLS + 1);
        assert!(editor.start().is_none());
    }

    #[test]
    fn test_right_drag_applies_clip_mode() {
        let mut editor = editor();
        editor.set_clip_mode(ClipMode::Horizontal);
        editor.handle(&click_at(200.0, 300.0)).unwrap();

        let mut input = click_at(500.0, 340.0);
        input.hold_mouse(MouseButton::Right);
        let response = editor.handle(&input).unwrap();
        let wall = response.placed.unwrap();
        assert_eq!(wall.end(), Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_corner_snap_warps_cursor() {
        let mut editor = MapEditor::new(1080, 720).unwrap();
        assert!(editor.corner_mode());
        let mut input = InputSnapshot::new();
        input
            .move_mouse(Vec2::new(20.0, 30.0))
            .hold_mouse(MouseButton::Right);
        let response = editor.handle(&input).unwrap();
        assert_eq!(response.warp_cursor, Some(Vec2::new(4.0, 5.0)));

        // Without the right button the cursor is left alone
        let mut input = InputSnapshot::new();
        input.move_mouse(Vec2::new(20.0, 30.0));
        assert_eq!(editor.handle(&input).unwrap().warp_cursor, None);
    }

    #[test]
    fn test_undo_keeps_perimeter() {
        let mut editor = editor();
        editor.handle(&click_at(200.0, 300.0)).unwrap();
        editor.handle(&click_at(600.0, 300.0)).unwrap();

        let mut undo = InputSnapshot::new();
        undo.release(Key::Z);
        let response = editor.handle(&undo).unwrap();
        assert_eq!(response.removed.unwrap().end(), Vec2::new(600.0, 300.0));
        assert!(editor.handle(&undo).unwrap().removed.is_none());
        assert_eq!(editor.map().len(), PROTECTED_WALLS);
    }

    #[test]
    fn test_mode_keys() {
        let mut editor = editor();
        for (key, mode) in [
            (Key::Num4, ClipMode::Diagonal),
            (Key::Num3, ClipMode::Vertical),
            (Key::Num2, ClipMode::Horizontal),
            (Key::Num1, ClipMode::Free),
        ] {
            let mut input = InputSnapshot::new();
            input.release(key);
            editor.handle(&input).unwrap();
            assert_eq!(editor.clip_mode(), mode);
        }

        let mut input = InputSnapshot::new();
        input.release(Key::C);
        editor.handle(&input).unwrap();
        assert!(editor.corner_mode());
        assert_eq!(editor.status_line(), "clip mode: free, corner snap: on");
    }

    #[test]
    fn test_ctrl_s_requests_save() {
        let mut editor = editor();
        let mut input = InputSnapshot::new();
        input.press(Key::S);
        assert!(!editor.handle(&input).unwrap().save_requested);
        input.hold(Key::LeftCtrl);
        assert!(editor.handle(&input).unwrap().save_requested);
    }

    #[test]
    fn test_same_point_twice_places_nothing() {
        let mut editor = editor();
        editor.handle(&click_at(200.0, 300.0)).unwrap();
        let response = editor.handle(&click_at(200.0, 300.0)).unwrap();
        assert!(response.placed.is_none());
        assert_eq!(editor.map().len(), PROTECTED_WALLS);
    }

    #[test]
    fn test_preview_drawn_while_placing() {
        let mut editor = editor();
        let mut surface = Mask::new(1080, 720);
        editor.draw_preview(&mut surface);
        assert!(surface.is_empty());

        editor.handle(&click_at(200.0, 300.0)).unwrap();
        let mut input = InputSnapshot::new();
        input.move_mouse(Vec2::new(400.0, 300.0));
        editor.handle(&input).unwrap();
        editor.draw_preview(&mut surface);
        assert!(surface.get(300, 300));
        assert!(!surface.get(300, 310));
    }
}
