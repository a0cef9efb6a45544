use crate::spatial::grid::Cell;
use macroquad::prelude::*;
use std::ops::Range;

/// Cell ranges covering the viewport at `offset`, half-open on both axes.
///
/// The upper bound is one cell past the cell holding the far viewport edge so
/// tiles sliding in from the right/bottom are drawn before they become visible.
pub fn visible_cell_ranges(offset: IVec2, view_size: Vec2, tile_size: u32) -> (Range<i32>, Range<i32>) {
    let ts = tile_size as i32;
    let (w, h) = (view_size.x as i32, view_size.y as i32);
    (
        offset.x.div_euclid(ts)..(offset.x + w).div_euclid(ts) + 1,
        offset.y.div_euclid(ts)..(offset.y + h).div_euclid(ts) + 1,
    )
}

/// Every cell in the visible ranges, row by row inside each column.
pub fn visible_cells(offset: IVec2, view_size: Vec2, tile_size: u32) -> impl Iterator<Item = Cell> {
    let (xs, ys) = visible_cell_ranges(offset, view_size, tile_size);
    xs.flat_map(move |x| ys.clone().map(move |y| Cell::new(x, y)))
}
