use macroquad::prelude::*;
use macroquad_platformer::config::CONFIG_PATH;
use macroquad_platformer::input::poll_macroquad_input;
use macroquad_platformer::timestep::FixedTimestep;
use macroquad_platformer::{load_game_assets, GameConfig, MacroquadSurface, TileRules, Tilemap, World};
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    GameConfig::load_or_default(CONFIG_PATH)
        .unwrap_or_default()
        .window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!(error = ?err, "fatal");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

async fn run() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default(CONFIG_PATH)?;
    info!(
        assets = %config.asset_dir.display(),
        map = %config.map_path.display(),
        tick_rate = config.tick_rate,
        "startup"
    );

    let assets = load_game_assets(&config.asset_dir).await?;
    info!(entries = assets.len(), "assets_loaded");

    let mut tilemap = Tilemap::new(config.tile_size);
    match tilemap.load(&config.map_path) {
        Ok(()) => info!(tiles = tilemap.len(), tile_size = tilemap.tile_size(), "map_loaded"),
        Err(err) if err.is_not_found() => {
            warn!(path = %config.map_path.display(), "map_missing_starting_empty")
        }
        Err(err) => return Err(err.into()),
    }

    let mut rng = StdRng::from_entropy();
    let mut world = World::new(
        assets,
        TileRules::default(),
        tilemap,
        config.render_size(),
        config.cloud_count,
        &mut rng,
    )?;

    let mut surface = MacroquadSurface::new(config.render_width, config.render_height);
    let mut timestep = FixedTimestep::new(
        config.tick_rate,
        config.max_frame_delta(),
        config.max_ticks_per_frame,
    );
    prevent_quit();

    let mut pending = Vec::new();
    loop {
        pending.extend(poll_macroquad_input());

        let plan = timestep.advance(Duration::from_secs_f32(get_frame_time()));
        if !plan.dropped_backlog.is_zero() {
            warn!(
                dropped_ms = plan.dropped_backlog.as_millis() as u64,
                max_ticks = config.max_ticks_per_frame,
                "tick_backlog_dropped"
            );
        }
        for _ in 0..plan.ticks_to_run {
            let events = std::mem::take(&mut pending);
            if !world.tick(&events, &mut rng)? {
                info!(reason = "quit", "shutdown_requested");
                return Ok(());
            }
        }

        surface.begin();
        world.render(&mut surface)?;
        surface.present();
        next_frame().await;
    }
}
