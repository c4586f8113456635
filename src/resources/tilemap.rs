//! Tile grid resource: the solid world entities collide with.
//!
//! A [`TileMap`] owns a tile set (shared per-kind metadata keyed by id) and
//! a sparse grid of placed tiles keyed by cell. Entities never hold
//! references into either; they keep a [`TileCell`] handle and look it up
//! each tick, so a map purge turns stale handles into defined lookup misses
//! instead of dangling pointers.
//!
//! Two text formats are loaded here, both line-oriented with malformed
//! lines logged at debug level and skipped:
//!
//! ```text
//! | tile set: id name friction_x friction_y deadly
//! 0 ground 12 0 0
//! 2 spikes 12 0 1
//! ```
//!
//! ```text
//! | map: line-tagged records
//! SIZE 20 12
//! GRAVITY 512
//! DEFAULT_FRICTION 0 0
//! PLAYER 64 96
//! NEXTMAP cavern.map
//! TILE 0 4 2 WARP
//! ```

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::path::Path;

pub type TileId = u32;

const DEFAULT_TILE_SIZE: u32 = 32;
const DEFAULT_MAP_SIZE: (u32, u32) = (32, 32);
const DEFAULT_GRAVITY: f32 = 512.0;

/// Grid cell coordinates; the stable handle entities keep for the tile they
/// stand on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCell {
    pub x: u32,
    pub y: u32,
}

/// Per-kind tile metadata shared by every placement of that id.
#[derive(Debug, Clone)]
pub struct TileInfo {
    pub id: TileId,
    pub name: String,
    pub friction: Vec2,
    pub deadly: bool,
}

/// A placed tile: its kind plus the per-placement warp flag.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub info: TileId,
    pub warp: bool,
}

/// The active map: tile set, sparse grid, and per-map metadata.
#[derive(Resource, Debug)]
pub struct TileMap {
    tile_set: FxHashMap<TileId, TileInfo>,
    grid: FxHashMap<u32, Tile>,
    default_tile: Option<TileInfo>,
    tile_size: u32,
    map_size: (u32, u32),
    gravity: f32,
    player_start: Vec2,
    background: Option<String>,
    next_map: Option<String>,
    load_next: bool,
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TileMap {
    pub fn new() -> Self {
        TileMap {
            tile_set: FxHashMap::default(),
            grid: FxHashMap::default(),
            default_tile: Some(TileInfo {
                id: 0,
                name: "default".to_string(),
                friction: Vec2::ZERO,
                deadly: false,
            }),
            tile_size: DEFAULT_TILE_SIZE,
            map_size: DEFAULT_MAP_SIZE,
            gravity: DEFAULT_GRAVITY,
            player_start: Vec2::ZERO,
            background: None,
            next_map: None,
            load_next: false,
        }
    }

    /// Collision-free 1-D key for a validated in-bounds cell.
    fn encode(&self, x: u32, y: u32) -> u32 {
        y * self.map_size.0 + x
    }

    /// Tile at the given cell, if any. Out-of-range and unplaced
    /// coordinates are an ordinary miss, not an error.
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.map_size.0 || y >= self.map_size.1 {
            return None;
        }
        self.grid.get(&self.encode(x, y))
    }

    /// Metadata of the tile kind placed at `cell`.
    pub fn tile_info_at(&self, cell: TileCell) -> Option<&TileInfo> {
        self.get_tile(cell.x as i32, cell.y as i32)
            .and_then(|tile| self.tile_set.get(&tile.info))
    }

    /// Metadata used while an entity is airborne over no tile.
    pub fn default_tile(&self) -> Option<&TileInfo> {
        self.default_tile.as_ref()
    }

    /// World-space (min, max) bounds of a cell.
    pub fn cell_bounds(&self, cell: TileCell) -> (Vec2, Vec2) {
        let size = self.tile_size as f32;
        let min = Vec2::new(cell.x as f32 * size, cell.y as f32 * size);
        (min, min + Vec2::splat(size))
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn map_size(&self) -> (u32, u32) {
        self.map_size
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn player_start(&self) -> Vec2 {
        self.player_start
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn next_map(&self) -> Option<&str> {
        self.next_map.as_deref()
    }

    pub fn set_map_size(&mut self, width: u32, height: u32) {
        self.map_size = (width, height);
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn set_player_start(&mut self, start: Vec2) {
        self.player_start = start;
    }

    pub fn set_next_map(&mut self, name: impl Into<String>) {
        self.next_map = Some(name.into());
    }

    pub fn set_default_friction(&mut self, friction: Vec2) {
        if let Some(tile) = self.default_tile.as_mut() {
            tile.friction = friction;
        }
    }

    /// Replace or drop the airborne default tile. Without one, airborne
    /// entities fall back to their body's own friction.
    pub fn set_default_tile(&mut self, tile: Option<TileInfo>) {
        self.default_tile = tile;
    }

    /// Register a tile kind. Duplicate ids are rejected.
    pub fn insert_tile_info(&mut self, info: TileInfo) -> Result<(), String> {
        if self.tile_set.contains_key(&info.id) {
            return Err(format!("duplicate tile id {}", info.id));
        }
        self.tile_set.insert(info.id, info);
        Ok(())
    }

    /// Place a tile on the grid. Unknown ids, out-of-range cells, and
    /// already-occupied cells are rejected.
    pub fn insert_tile(&mut self, id: TileId, x: u32, y: u32, warp: bool) -> Result<(), String> {
        if !self.tile_set.contains_key(&id) {
            return Err(format!("unknown tile id {id}"));
        }
        if x >= self.map_size.0 || y >= self.map_size.1 {
            return Err(format!("cell ({x}, {y}) outside {:?}", self.map_size));
        }
        let key = self.encode(x, y);
        if self.grid.contains_key(&key) {
            return Err(format!("cell ({x}, {y}) already occupied"));
        }
        self.grid.insert(key, Tile { info: id, warp });
        Ok(())
    }

    /// Latch a transition to the configured next map. Consumed by the map
    /// transition step at the start of the next frame, never mid-tick.
    pub fn request_next_map(&mut self) {
        self.load_next = true;
    }

    /// Consume the transition latch, yielding the next map name if one is
    /// configured. Without a name the latch is dropped silently.
    pub fn take_next_map(&mut self) -> Option<String> {
        if !self.load_next {
            return None;
        }
        self.load_next = false;
        self.next_map.clone()
    }

    /// Drop all placed tiles and per-map metadata. The tile set survives.
    pub fn purge(&mut self) {
        self.grid.clear();
        self.map_size = DEFAULT_MAP_SIZE;
        self.gravity = DEFAULT_GRAVITY;
        self.player_start = Vec2::ZERO;
        self.background = None;
        self.next_map = None;
        self.load_next = false;
        self.set_default_friction(Vec2::ZERO);
    }

    /// Parse tile-set lines: `id name friction_x friction_y deadly`.
    /// `|`-prefixed lines are comments.
    pub fn load_tile_set_str(&mut self, text: &str) {
        for (num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('|') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let parsed = (|| {
                let id: TileId = fields.next()?.parse().ok()?;
                let name = fields.next()?.to_string();
                let friction_x: f32 = fields.next()?.parse().ok()?;
                let friction_y: f32 = fields.next()?.parse().ok()?;
                let deadly = match fields.next()? {
                    "0" => false,
                    "1" => true,
                    _ => return None,
                };
                Some(TileInfo {
                    id,
                    name,
                    friction: Vec2::new(friction_x, friction_y),
                    deadly,
                })
            })();

            match parsed {
                Some(info) => {
                    if let Err(e) = self.insert_tile_info(info) {
                        debug!("tile set line {}: {}", num + 1, e);
                    }
                }
                None => debug!("tile set line {}: malformed: {:?}", num + 1, line),
            }
        }
    }

    /// Load a tile-set file. See [`TileMap::load_tile_set_str`].
    pub fn load_tile_set(&mut self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read tile set {}: {}", path.display(), e))?;
        self.load_tile_set_str(&text);
        info!(
            "loaded tile set {}: {} tile kinds",
            path.display(),
            self.tile_set.len()
        );
        Ok(())
    }

    /// Parse map records into a purged grid. Records:
    /// `SIZE w h`, `GRAVITY g`, `DEFAULT_FRICTION x y`, `PLAYER x y`,
    /// `BACKGROUND path`, `NEXTMAP name`, `TILE id x y [WARP]`.
    ///
    /// `SIZE` must precede `TILE` records for their cells to validate
    /// against the final bounds.
    pub fn load_map_str(&mut self, text: &str) {
        self.purge();

        for (num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('|') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(tag) = fields.next() else {
                continue;
            };

            let ok = match tag {
                "SIZE" => parse_pair(&mut fields).map(|(w, h)| {
                    self.map_size = (w, h);
                }),
                "GRAVITY" => fields.next().and_then(|f| f.parse().ok()).map(|g| {
                    self.gravity = g;
                }),
                "DEFAULT_FRICTION" => parse_vec2(&mut fields).map(|friction| {
                    self.set_default_friction(friction);
                }),
                "PLAYER" => parse_vec2(&mut fields).map(|start| {
                    self.player_start = start;
                }),
                "BACKGROUND" => fields.next().map(|path| {
                    self.background = Some(path.to_string());
                }),
                "NEXTMAP" => fields.next().map(|name| {
                    self.next_map = Some(name.to_string());
                }),
                "TILE" => {
                    let placed = (|| {
                        let id: TileId = fields.next()?.parse().ok()?;
                        let x: u32 = fields.next()?.parse().ok()?;
                        let y: u32 = fields.next()?.parse().ok()?;
                        let warp = matches!(fields.next(), Some("WARP"));
                        Some((id, x, y, warp))
                    })();
                    match placed {
                        Some((id, x, y, warp)) => match self.insert_tile(id, x, y, warp) {
                            Ok(()) => Some(()),
                            Err(e) => {
                                debug!("map line {}: {}", num + 1, e);
                                continue;
                            }
                        },
                        None => None,
                    }
                }
                _ => {
                    debug!("map line {}: unknown record {:?}", num + 1, tag);
                    continue;
                }
            };

            if ok.is_none() {
                debug!("map line {}: malformed: {:?}", num + 1, line);
            }
        }
    }

    /// Load a map file. See [`TileMap::load_map_str`].
    pub fn load_map(&mut self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read map {}: {}", path.display(), e))?;
        self.load_map_str(&text);
        info!(
            "loaded map {}: {}x{} cells, {} tiles, gravity {}",
            path.display(),
            self.map_size.0,
            self.map_size.1,
            self.grid.len(),
            self.gravity
        );
        Ok(())
    }

}

fn parse_pair(fields: &mut std::str::SplitWhitespace<'_>) -> Option<(u32, u32)> {
    let a: u32 = fields.next()?.parse().ok()?;
    let b: u32 = fields.next()?.parse().ok()?;
    Some((a, b))
}

fn parse_vec2(fields: &mut std::str::SplitWhitespace<'_>) -> Option<Vec2> {
    let x: f32 = fields.next()?.parse().ok()?;
    let y: f32 = fields.next()?.parse().ok()?;
    Some(Vec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with_tiles() -> TileMap {
        let mut map = TileMap::new();
        map.load_tile_set_str(
            "| id name fx fy deadly\n\
             0 ground 12 0 0\n\
             1 ice 2 0 0\n\
             2 spikes 12 0 1\n",
        );
        map
    }

    #[test]
    fn encoding_does_not_collide_across_rows() {
        let mut map = map_with_tiles();
        map.set_map_size(8, 8);
        // Under the row-major encoding these two cells must stay distinct;
        // a column-major `x * width + y` scheme would fold them together.
        map.insert_tile(0, 2, 5, false).unwrap();
        map.insert_tile(1, 5, 2, false).unwrap();
        assert_eq!(map.get_tile(2, 5).unwrap().info, 0);
        assert_eq!(map.get_tile(5, 2).unwrap().info, 1);
    }

    #[test]
    fn out_of_range_lookups_miss_silently() {
        let mut map = map_with_tiles();
        map.set_map_size(4, 4);
        map.insert_tile(0, 0, 0, false).unwrap();
        assert!(map.get_tile(-1, 0).is_none());
        assert!(map.get_tile(0, -3).is_none());
        assert!(map.get_tile(4, 0).is_none());
        assert!(map.get_tile(0, 7).is_none());
        assert!(map.get_tile(1, 1).is_none());
    }

    #[test]
    fn duplicate_placement_is_rejected() {
        let mut map = map_with_tiles();
        map.insert_tile(0, 3, 3, false).unwrap();
        assert!(map.insert_tile(1, 3, 3, false).is_err());
        assert_eq!(map.get_tile(3, 3).unwrap().info, 0);
    }

    #[test]
    fn unknown_and_out_of_bounds_placements_are_rejected() {
        let mut map = map_with_tiles();
        map.set_map_size(4, 4);
        assert!(map.insert_tile(99, 0, 0, false).is_err());
        assert!(map.insert_tile(0, 4, 0, false).is_err());
    }

    #[test]
    fn tile_set_skips_comments_duplicates_and_garbage() {
        let mut map = TileMap::new();
        map.load_tile_set_str(
            "| a comment\n\
             0 ground 12 0 0\n\
             0 ground_again 12 0 0\n\
             not-a-number grass 1 1 0\n\
             3 brick 12 12 maybe\n\
             1 ice 2 0 0\n",
        );
        assert!(map.insert_tile(0, 0, 0, false).is_ok());
        assert!(map.insert_tile(1, 1, 0, false).is_ok());
        assert!(map.insert_tile(3, 2, 0, false).is_err());
        assert_eq!(map.tile_info_at(TileCell { x: 0, y: 0 }).unwrap().name, "ground");
    }

    #[test]
    fn map_records_are_applied() {
        let mut map = map_with_tiles();
        map.load_map_str(
            "SIZE 10 6\n\
             GRAVITY 400\n\
             DEFAULT_FRICTION 1 2\n\
             PLAYER 64 96\n\
             NEXTMAP cavern.map\n\
             BACKGROUND meadow.png\n\
             TILE 0 0 1\n\
             TILE 2 4 1 WARP\n\
             TILE 0 40 1\n\
             WIBBLE 1 2\n",
        );
        assert_eq!(map.map_size(), (10, 6));
        assert_eq!(map.gravity(), 400.0);
        assert_eq!(map.default_tile().unwrap().friction, Vec2::new(1.0, 2.0));
        assert_eq!(map.player_start(), Vec2::new(64.0, 96.0));
        assert_eq!(map.next_map(), Some("cavern.map"));
        assert_eq!(map.background(), Some("meadow.png"));
        assert!(!map.get_tile(0, 1).unwrap().warp);
        assert!(map.get_tile(4, 1).unwrap().warp);
        assert!(map.get_tile(40, 1).is_none());
        assert!(map.tile_info_at(TileCell { x: 4, y: 1 }).unwrap().deadly);
    }

    #[test]
    fn next_map_latch_is_consumed_once() {
        let mut map = map_with_tiles();
        map.set_next_map("cavern.map");
        assert_eq!(map.take_next_map(), None);
        map.request_next_map();
        assert_eq!(map.take_next_map(), Some("cavern.map".to_string()));
        assert_eq!(map.take_next_map(), None);
    }

    #[test]
    fn latch_without_next_map_is_dropped() {
        let mut map = map_with_tiles();
        map.request_next_map();
        assert_eq!(map.take_next_map(), None);
        assert_eq!(map.take_next_map(), None);
    }

    #[test]
    fn purge_keeps_the_tile_set() {
        let mut map = map_with_tiles();
        map.load_map_str("SIZE 4 4\nGRAVITY 100\nTILE 0 1 1\n");
        map.purge();
        assert!(map.get_tile(1, 1).is_none());
        assert_eq!(map.gravity(), 512.0);
        assert!(map.insert_tile(2, 0, 0, false).is_ok());
    }

    #[test]
    fn stale_cell_handles_miss_after_reload() {
        let mut map = map_with_tiles();
        map.load_map_str("SIZE 4 4\nTILE 0 1 1\n");
        let cell = TileCell { x: 1, y: 1 };
        assert!(map.tile_info_at(cell).is_some());
        map.load_map_str("SIZE 4 4\nTILE 0 2 2\n");
        assert!(map.tile_info_at(cell).is_none());
    }
}
