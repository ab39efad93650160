//! The collision world: an ordered set of walls plus their occupancy mask
//!
//! The wall list is private. Every mutation goes through a method that also
//! rebuilds the mask, so the mask is always the rasterized union of the
//! current walls when it is queried.

use std::collections::HashSet;
use std::path::Path;

use glam::{IVec2, Vec2};

use super::wall::Wall;
use crate::error::{GeometryError, MapFileError};
use crate::geometry::PointKey;
use crate::persistence;
use crate::renderer::{BLACK, Collidable, Mask, Surface, shapes};

/// Walls of one arena and the mask derived from them
#[derive(Debug, Clone)]
pub struct TankMap {
    width: u32,
    height: u32,
    walls: Vec<Wall>,
    mask: Mask,
}

impl TankMap {
    /// Empty map covering a `width x height` play field
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: Vec::new(),
            mask: Mask::new(width, height),
        }
    }

    /// Map containing only the four perimeter walls
    pub fn with_boundary(width: u32, height: u32) -> Result<Self, GeometryError> {
        let mut map = Self::new(width, height);
        let walls = boundary_walls(width, height)?;
        map.replace_walls(walls);
        Ok(map)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// The occupancy mask (read-only)
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Append a standard-width wall
    pub fn add_wall(&mut self, start: Vec2, end: Vec2) -> Result<&Wall, GeometryError> {
        self.add_wall_with_width(start, end, Wall::STANDARD_WIDTH)
    }

    pub fn add_wall_with_width(
        &mut self,
        start: Vec2,
        end: Vec2,
        width: f32,
    ) -> Result<&Wall, GeometryError> {
        let wall = Wall::with_width(start, end, width)?;
        Ok(self.push_wall(wall))
    }

    /// Horizontal wall of `length` starting at `start`
    pub fn add_wall_h(&mut self, start: Vec2, length: f32) -> Result<&Wall, GeometryError> {
        self.add_wall(start, start + Vec2::new(length, 0.0))
    }

    /// Vertical wall of `length` starting at `start`
    pub fn add_wall_v(&mut self, start: Vec2, length: f32) -> Result<&Wall, GeometryError> {
        self.add_wall(start, start + Vec2::new(0.0, length))
    }

    /// Append an already built wall
    pub fn push_wall(&mut self, wall: Wall) -> &Wall {
        log::debug!(
            "Adding wall {} -> {} (width {})",
            wall.start(),
            wall.end(),
            wall.width()
        );
        self.walls.push(wall);
        self.rebuild_mask();
        &self.walls[self.walls.len() - 1]
    }

    /// Remove the first wall equal to `wall`
    pub fn remove_wall(&mut self, wall: &Wall) -> Option<Wall> {
        let index = self.walls.iter().position(|w| w == wall)?;
        let removed = self.walls.remove(index);
        self.rebuild_mask();
        Some(removed)
    }

    /// Remove the most recent wall unless only `min_count` (or fewer) remain
    pub fn remove_last(&mut self, min_count: usize) -> Option<Wall> {
        if self.walls.len() <= min_count {
            log::debug!("Keeping last wall, {} walls are protected", min_count);
            return None;
        }
        let removed = self.walls.pop();
        self.rebuild_mask();
        removed
    }

    /// Swap in a whole wall list with a single mask rebuild
    pub fn replace_walls(&mut self, walls: Vec<Wall>) {
        self.walls = walls;
        self.rebuild_mask();
    }

    pub fn clear(&mut self) {
        self.replace_walls(Vec::new());
    }

    fn rebuild_mask(&mut self) {
        let mut mask = Mask::new(self.width, self.height);
        for wall in &self.walls {
            wall.draw(&mut mask);
        }
        self.mask = mask;
        log::trace!(
            "Rebuilt map mask: {} walls, {} solid pixels",
            self.walls.len(),
            self.mask.count()
        );
    }

    /// First pixel (map space) where the body's silhouette overlaps a wall
    pub fn hits_any_wall<C: Collidable + ?Sized>(&self, body: &C) -> Option<IVec2> {
        self.mask.overlap(body.mask(), body.mask_offset())
    }

    /// The wall nearest to the body's first overlapping pixel
    pub fn hits_wall<C: Collidable + ?Sized>(&self, body: &C) -> Option<&Wall> {
        let hit = self.hits_any_wall(body)?;
        self.nearest_wall(hit.as_vec2())
    }

    /// Nearest wall to `point`; equal distances resolve to the earlier wall
    pub fn nearest_wall(&self, point: Vec2) -> Option<&Wall> {
        self.walls
            .iter()
            .map(|w| (w, w.distance_to_point(point)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(w, _)| w)
    }

    /// Mask of positions where a `width x height` rectangle centred on the
    /// pixel (in any orientation, approximately) stays clear of every wall
    ///
    /// Each wall is grown into an oversized band "shadow" and the union is
    /// inverted. The shadow uses the larger side of the rectangle, so this is
    /// a heuristic and not pixel exact.
    pub fn free_rect_mask(&self, width: f32, height: f32) -> Mask {
        let grow = width.max(height);
        let mut shadow = Mask::new(self.width, self.height);
        for wall in &self.walls {
            match shapes::band(
                wall.start(),
                wall.angle(),
                wall.length(),
                wall.width() + grow,
                grow / 2.0,
            ) {
                Ok(band) => shadow.fill_polygon(band.points(), BLACK),
                Err(err) => log::warn!("Skipping shadow for wall {}: {}", wall.start(), err),
            }
        }
        shadow.invert();
        shadow
    }

    /// Wall endpoint nearest to `(x, y)`, each distinct endpoint considered once
    pub fn closest_wall_corner(&self, x: f32, y: f32) -> Option<Vec2> {
        let target = Vec2::new(x, y);
        let mut seen = HashSet::new();
        self.walls
            .iter()
            .flat_map(|w| [w.start(), w.end()])
            .filter(|p| seen.insert(PointKey::from(*p)))
            .min_by(|a, b| a.distance(target).total_cmp(&b.distance(target)))
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for wall in &self.walls {
            wall.draw(surface);
        }
    }

    /// Write the walls as `start_x,start_y,end_x,end_y` records
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapFileError> {
        let records: Vec<[i32; 4]> = self.walls.iter().map(Wall::endpoints_i32).collect();
        persistence::save_wall_records(path.as_ref(), &records)?;
        log::info!(
            "Saved {} walls to {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Replace the walls with those stored at `path`, keeping file order
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), MapFileError> {
        let records = persistence::load_wall_records(path.as_ref())?;
        self.replace_walls(walls_from_records(&records)?);
        log::info!(
            "Loaded {} walls from {}",
            self.walls.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

/// Build standard walls from integer endpoint records
pub fn walls_from_records(records: &[[i32; 4]]) -> Result<Vec<Wall>, GeometryError> {
    records
        .iter()
        .map(|[sx, sy, ex, ey]| {
            Wall::new(
                Vec2::new(*sx as f32, *sy as f32),
                Vec2::new(*ex as f32, *ey as f32),
            )
        })
        .collect()
}

/// Four walls hugging the edges of a `width x height` field
pub fn boundary_walls(width: u32, height: u32) -> Result<Vec<Wall>, GeometryError> {
    let (w, h) = (width as f32, height as f32);
    let inset = (Wall::STANDARD_WIDTH / 2.0).floor();
    Ok(vec![
        Wall::new(Vec2::new(0.0, inset - 1.0), Vec2::new(w, inset - 1.0))?,
        Wall::new(Vec2::new(0.0, h - inset), Vec2::new(w, h - inset))?,
        // Side walls run on to h + inset, past the bottom edge, like the editor perimeter
        Wall::new(Vec2::new(inset - 1.0, inset), Vec2::new(inset - 1.0, h + inset))?,
        Wall::new(Vec2::new(w - inset, inset), Vec2::new(w - inset, h + inset))?,
    ])
}

/// Number of perimeter walls [`TankMap::with_boundary`] creates
pub const BOUNDARY_WALLS: usize = 4;
