#![warn(missing_docs)]

//! Tile-based 2D platformer runtime for Macroquad.
//!
//! The simulation (tilemap collision, player physics, animation, particles,
//! clouds, camera) is independent of the graphics backend and draws through
//! [`Surface`]; [`MacroquadSurface`] and [`load_game_assets`] plug it into a
//! macroquad window.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod clouds;
pub mod config;
pub mod entity;
mod error;
pub mod input;
mod loader {
    pub mod images;
    pub mod map_json;
}
pub mod particle;
mod render {
    pub mod cull;
    pub mod surface;
}
mod spatial {
    pub mod grid;
}
pub mod tilemap;
pub mod timestep;
pub mod world;

pub use animation::{Animation, Clip};
pub use assets::{Asset, AssetTable, TileRules};
pub use config::GameConfig;
pub use error::{AssetError, MapError};
pub use loader::images::load_game_assets;
pub use render::cull::{visible_cell_ranges, visible_cells};
pub use render::surface::{MacroquadSurface, Surface};
pub use spatial::grid::{world_to_cell, Cell};
pub use tilemap::{Decor, Tile, Tilemap};
pub use world::World;
