use crate::error::MapError;
use crate::spatial::grid::Cell;
use crate::tilemap::{Decor, Tile, Tilemap};
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct JsonTile {
    #[serde(rename = "type")]
    kind: String,
    variant: usize,
    pos: [i32; 2],
}

/// Editor files store pixel positions as 64-bit floats; they are narrowed to
/// the nearest `f32` on load, and written back in shortest `f32` form.
#[derive(Serialize, Deserialize)]
struct JsonDecor {
    #[serde(rename = "type")]
    kind: String,
    variant: usize,
    pos: [f32; 2],
}

#[derive(Serialize, Deserialize)]
struct JsonMap {
    tilemap: BTreeMap<String, JsonTile>,
    tile_size: u32,
    #[serde(default)]
    offgrid: Vec<JsonDecor>,
}

fn grid_key(cell: Cell) -> String {
    format!("{};{}", cell.x, cell.y)
}

fn parse_grid_key(key: &str) -> Result<Cell, MapError> {
    let invalid = || MapError::InvalidKey { key: key.to_owned() };
    let (x, y) = key.split_once(';').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(Cell::new(x, y))
}

fn to_json(map: &Tilemap) -> JsonMap {
    JsonMap {
        tilemap: map
            .tiles()
            .map(|tile| {
                (
                    grid_key(tile.pos),
                    JsonTile {
                        kind: tile.kind.clone(),
                        variant: tile.variant,
                        pos: [tile.pos.x, tile.pos.y],
                    },
                )
            })
            .collect(),
        tile_size: map.tile_size(),
        offgrid: map
            .offgrid()
            .iter()
            .map(|decor| JsonDecor {
                kind: decor.kind.clone(),
                variant: decor.variant,
                pos: [decor.pos.x, decor.pos.y],
            })
            .collect(),
    }
}

fn from_json(j: JsonMap) -> Result<Tilemap, MapError> {
    if j.tile_size == 0 {
        return Err(MapError::InvalidTileSize(j.tile_size));
    }

    let mut tiles = HashMap::with_capacity(j.tilemap.len());
    for (key, t) in j.tilemap {
        let cell = parse_grid_key(&key)?;
        if cell != Cell::new(t.pos[0], t.pos[1]) {
            return Err(MapError::KeyMismatch {
                key,
                x: t.pos[0],
                y: t.pos[1],
            });
        }
        if cell.checked_pixel(j.tile_size).is_none() {
            return Err(MapError::CellOutOfRange {
                key,
                tile_size: j.tile_size,
            });
        }
        tiles.insert(cell, Tile::new(t.kind, t.variant, cell));
    }

    let offgrid = j
        .offgrid
        .into_iter()
        .map(|d| Decor::new(d.kind, d.variant, vec2(d.pos[0], d.pos[1])))
        .collect();

    Ok(Tilemap::from_parts(j.tile_size, tiles, offgrid))
}

pub fn encode_map_str(map: &Tilemap) -> Result<String, serde_json::Error> {
    serde_json::to_string(&to_json(map))
}

pub fn write_map_file(map: &Tilemap, path: &Path) -> Result<(), MapError> {
    let txt = encode_map_str(map).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, txt).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_map_file(path: &Path) -> Result<Tilemap, MapError> {
    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let j: JsonMap = serde_json::from_str(&txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(j)
}
