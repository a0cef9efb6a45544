use macroquad::prelude::*;

/// Integer cell coordinate on the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Cell {
    /// Cell at column `x`, row `y`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Neighbouring cell, or `None` past the edge of the `i32` grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Cell::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Top-left pixel of this cell.
    #[inline]
    pub fn to_world(self, tile_size: u32) -> Vec2 {
        let ts = tile_size as f32;
        vec2(self.x as f32 * ts, self.y as f32 * ts)
    }

    /// Top-left pixel of this cell in integer space, if it fits in an `i32`.
    #[inline]
    pub fn checked_pixel(self, tile_size: u32) -> Option<(i32, i32)> {
        let ts = i32::try_from(tile_size).ok()?;
        Some((self.x.checked_mul(ts)?, self.y.checked_mul(ts)?))
    }

    /// Square covering this cell in world space.
    #[inline]
    pub fn rect(self, tile_size: u32) -> Rect {
        let p = self.to_world(tile_size);
        Rect::new(p.x, p.y, tile_size as f32, tile_size as f32)
    }
}

/// The cell itself and its 8 neighbours.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Floor-divides a pixel position into the cell containing it.
#[inline]
pub fn world_to_cell(p: Vec2, tile_size: u32) -> Cell {
    let ts = tile_size as f32;
    Cell::new((p.x / ts).floor() as i32, (p.y / ts).floor() as i32)
}

/// Strict rectangle overlap: shared edges do not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
