//! Sparse tile grid with decor, collision queries and autotiling.

use crate::assets::{AssetTable, TileRules};
use crate::error::{AssetError, MapError};
use crate::loader::map_json;
use crate::render::cull::visible_cells;
use crate::render::surface::Surface;
use crate::spatial::grid::{world_to_cell, Cell, NEIGHBOUR_OFFSETS};
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// A tile snapped to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Asset category, e.g. `"grass"`.
    pub kind: String,
    /// Index into the category's image list.
    pub variant: usize,
    /// Grid cell.
    pub pos: Cell,
}

impl Tile {
    /// Tile of `kind`/`variant` at `pos`.
    pub fn new(kind: impl Into<String>, variant: usize, pos: Cell) -> Self {
        Self {
            kind: kind.into(),
            variant,
            pos,
        }
    }

    fn matches(&self, id_pairs: &[(&str, usize)]) -> bool {
        id_pairs
            .iter()
            .any(|&(kind, variant)| kind == self.kind && variant == self.variant)
    }
}

/// A tile placed freely in pixel space (decoration, large props).
#[derive(Debug, Clone, PartialEq)]
pub struct Decor {
    /// Asset category.
    pub kind: String,
    /// Index into the category's image list.
    pub variant: usize,
    /// Top-left pixel.
    pub pos: Vec2,
}

impl Decor {
    /// Decor of `kind`/`variant` at pixel `pos`.
    pub fn new(kind: impl Into<String>, variant: usize, pos: Vec2) -> Self {
        Self {
            kind: kind.into(),
            variant,
            pos,
        }
    }

    fn matches(&self, id_pairs: &[(&str, usize)]) -> bool {
        id_pairs
            .iter()
            .any(|&(kind, variant)| kind == self.kind && variant == self.variant)
    }
}

const RIGHT: u8 = 1 << 0;
const LEFT: u8 = 1 << 1;
const UP: u8 = 1 << 2;
const DOWN: u8 = 1 << 3;

/// Axis neighbours checked by [`Tilemap::autotile`].
const AUTOTILE_SHIFTS: [((i32, i32), u8); 4] = [((1, 0), RIGHT), ((-1, 0), LEFT), ((0, -1), UP), ((0, 1), DOWN)];

/// Same-type neighbour set -> sprite variant (edges, corners, fill).
const AUTOTILE_MAP: [(u8, usize); 9] = [
    (RIGHT | DOWN, 0),
    (RIGHT | DOWN | LEFT, 1),
    (LEFT | DOWN, 2),
    (LEFT | UP | DOWN, 3),
    (LEFT | UP, 4),
    (LEFT | UP | RIGHT, 5),
    (RIGHT | UP, 6),
    (RIGHT | UP | DOWN, 7),
    (RIGHT | LEFT | UP | DOWN, 8),
];

fn autotile_variant(neighbours: u8) -> Option<usize> {
    AUTOTILE_MAP
        .iter()
        .find(|(set, _)| *set == neighbours)
        .map(|(_, variant)| *variant)
}

/// Sparse tile grid plus free-floating decor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    tile_size: u32,
    tiles: HashMap<Cell, Tile>,
    offgrid: Vec<Decor>,
}

impl Tilemap {
    /// Tile size used by [`Tilemap::default`].
    pub const DEFAULT_TILE_SIZE: u32 = 16;

    /// # Panics
    /// If `tile_size` is zero.
    pub fn new(tile_size: u32) -> Self {
        assert!(tile_size > 0, "tile size must be positive");
        Self {
            tile_size,
            tiles: HashMap::new(),
            offgrid: Vec::new(),
        }
    }

    pub(crate) fn from_parts(tile_size: u32, tiles: HashMap<Cell, Tile>, offgrid: Vec<Decor>) -> Self {
        Self {
            tile_size,
            tiles,
            offgrid,
        }
    }

    /// Edge length of a cell in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Inserts a grid tile, replacing whatever occupied its cell.
    pub fn place(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.pos, tile)
    }

    /// Adds decor on top of any existing decor.
    pub fn place_offgrid(&mut self, decor: Decor) {
        self.offgrid.push(decor);
    }

    /// Removes and returns the tile at `cell`.
    pub fn remove(&mut self, cell: Cell) -> Option<Tile> {
        self.tiles.remove(&cell)
    }

    /// Tile at `cell`, if any.
    pub fn tile_at(&self, cell: Cell) -> Option<&Tile> {
        self.tiles.get(&cell)
    }

    /// Grid tiles in no particular order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Decor in placement order.
    pub fn offgrid(&self) -> &[Decor] {
        &self.offgrid
    }

    /// Number of grid tiles. Off-grid decor is not counted; see
    /// [`Tilemap::offgrid`].
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when the map holds neither grid tiles nor decor, so a map with
    /// only decor has `len() == 0` but is not empty.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.offgrid.is_empty()
    }

    /// Grid tiles in the 3x3 block of cells around the one containing `pos`.
    pub fn tiles_around(&self, pos: Vec2) -> Vec<&Tile> {
        let cell = world_to_cell(pos, self.tile_size);
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.tiles.get(&cell.offset(dx, dy)?))
            .collect()
    }

    /// World-space squares of the solid tiles around `pos`.
    pub fn physics_rects_around(&self, pos: Vec2, rules: &TileRules) -> Vec<Rect> {
        self.tiles_around(pos)
            .into_iter()
            .filter(|tile| rules.is_solid(&tile.kind))
            .map(|tile| tile.pos.rect(self.tile_size))
            .collect()
    }

    /// Removes (or copies when `keep`) every tile whose `(kind, variant)` is
    /// listed. Grid matches come back with pixel positions.
    pub fn extract(&mut self, id_pairs: &[(&str, usize)], keep: bool) -> Vec<Decor> {
        let mut matches: Vec<Decor> = self
            .offgrid
            .iter()
            .filter(|decor| decor.matches(id_pairs))
            .cloned()
            .collect();
        if !keep {
            self.offgrid.retain(|decor| !decor.matches(id_pairs));
        }

        let mut cells: Vec<Cell> = self
            .tiles
            .values()
            .filter(|tile| tile.matches(id_pairs))
            .map(|tile| tile.pos)
            .collect();
        cells.sort_unstable();

        for cell in cells {
            let tile = if keep {
                self.tiles.get(&cell).cloned()
            } else {
                self.tiles.remove(&cell)
            };
            if let Some(tile) = tile {
                matches.push(Decor {
                    pos: cell.to_world(self.tile_size),
                    kind: tile.kind,
                    variant: tile.variant,
                });
            }
        }
        matches
    }

    /// Picks edge/corner/fill variants from each tile's same-type axis
    /// neighbours. Unknown neighbour layouts keep their variant.
    pub fn autotile(&mut self, rules: &TileRules) {
        let updates: Vec<(Cell, usize)> = self
            .tiles
            .values()
            .filter(|tile| rules.autotiles(&tile.kind))
            .filter_map(|tile| {
                let neighbours = AUTOTILE_SHIFTS
                    .iter()
                    .filter(|((dx, dy), _)| {
                        tile.pos
                            .offset(*dx, *dy)
                            .and_then(|cell| self.tiles.get(&cell))
                            .is_some_and(|n| n.kind == tile.kind)
                    })
                    .fold(0u8, |set, (_, dir)| set | dir);
                autotile_variant(neighbours).map(|variant| (tile.pos, variant))
            })
            .collect();

        for (cell, variant) in updates {
            if let Some(tile) = self.tiles.get_mut(&cell) {
                tile.variant = variant;
            }
        }
    }

    /// Draws decor, then the grid tiles inside the viewport.
    pub fn render<S: Surface>(
        &self,
        surf: &mut S,
        offset: IVec2,
        assets: &AssetTable<S::Image>,
    ) -> Result<(), AssetError> {
        let off = offset.as_vec2();
        for decor in &self.offgrid {
            let img = assets.variant(&decor.kind, decor.variant)?;
            surf.blit(img, decor.pos - off, false);
        }

        for cell in visible_cells(offset, surf.size(), self.tile_size) {
            if let Some(tile) = self.tiles.get(&cell) {
                let img = assets.variant(&tile.kind, tile.variant)?;
                surf.blit(img, cell.to_world(self.tile_size) - off, false);
            }
        }
        Ok(())
    }

    /// Writes the map as JSON to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        map_json::write_map_file(self, path.as_ref())
    }

    /// Replaces this map's contents with the file at `path`. On error the
    /// map is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), MapError> {
        *self = map_json::read_map_file(path.as_ref())?;
        Ok(())
    }
}

impl Default for Tilemap {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TILE_SIZE)
    }
}
