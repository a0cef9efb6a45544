//! Game settings loaded at startup.

use anyhow::Context;
use macroquad::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional config file read from the working directory.
pub const CONFIG_PATH: &str = "platformer.json";
/// Overrides [`GameConfig::map_path`] when set.
pub const MAP_ENV_VAR: &str = "PLATFORMER_MAP";

/// Startup settings; every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window title.
    pub window_title: String,
    /// Initial window width in pixels.
    pub window_width: i32,
    /// Initial window height in pixels.
    pub window_height: i32,
    /// Internal resolution the world is drawn at before upscaling.
    pub render_width: u32,
    /// Internal render height.
    pub render_height: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Longest frame time fed to the timestep.
    pub max_frame_delta_ms: u64,
    /// Tick cap per rendered frame.
    pub max_ticks_per_frame: u32,
    /// Root of the image manifest.
    pub asset_dir: PathBuf,
    /// Level file.
    pub map_path: PathBuf,
    /// Tile size for a map that does not exist yet.
    pub tile_size: u32,
    /// Number of background clouds.
    pub cloud_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "gamer time".to_string(),
            window_width: 640,
            window_height: 480,
            render_width: 320,
            render_height: 240,
            tick_rate: 60,
            max_frame_delta_ms: 250,
            max_ticks_per_frame: 5,
            asset_dir: PathBuf::from("data/images"),
            map_path: PathBuf::from("map.json"),
            tile_size: 16,
            cloud_count: 16,
        }
    }
}

impl GameConfig {
    /// Parses a config document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Parsing game config")
    }

    /// Reads `path` if it exists, otherwise falls back to defaults. The map
    /// path environment override applies either way.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = match std::fs::read_to_string(path) {
            Ok(txt) => Self::from_json_str(&txt).with_context(|| format!("Reading config {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                return Err(err).with_context(|| format!("Reading config {}", path.display()));
            }
        };
        if let Ok(map) = std::env::var(MAP_ENV_VAR) {
            if !map.trim().is_empty() {
                config.map_path = PathBuf::from(map.trim());
            }
        }
        Ok(config)
    }

    /// Internal resolution as a vector.
    pub fn render_size(&self) -> Vec2 {
        vec2(self.render_width as f32, self.render_height as f32)
    }

    /// Frame time clamp, at least one millisecond.
    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms.max(1))
    }

    /// Macroquad window settings.
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.window_title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
            ..Default::default()
        }
    }
}
