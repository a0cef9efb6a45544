//! Game state stepped and drawn each frame.

use crate::assets::{AssetTable, TileRules};
use crate::camera::Scroll;
use crate::clouds::Clouds;
use crate::entity::Player;
use crate::error::AssetError;
use crate::input::{InputEvent, InputState, Key};
use crate::particle::{LeafSpawner, ParticleSystem, TREE_ID};
use crate::render::surface::Surface;
use crate::tilemap::Tilemap;
use macroquad::prelude::*;
use ::rand::Rng;
use tracing::{debug, info};

/// Where the player appears when a world is built.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(50.0, 50.0);

/// Everything simulated and drawn each tick.
pub struct World<I> {
    assets: AssetTable<I>,
    rules: TileRules,
    /// Level geometry and decor.
    pub tilemap: Tilemap,
    /// The controllable player.
    pub player: Player<I>,
    clouds: Clouds<I>,
    particles: ParticleSystem<I>,
    scroll: Scroll,
    input: InputState,
    view: Vec2,
}

impl<I: Clone> World<I> {
    /// Builds the world around a loaded map. Trees in the map become leaf
    /// spawners but stay in the map so they are still drawn.
    pub fn new<R: Rng + ?Sized>(
        assets: AssetTable<I>,
        rules: TileRules,
        mut tilemap: Tilemap,
        view: Vec2,
        cloud_count: usize,
        rng: &mut R,
    ) -> Result<Self, AssetError> {
        let clouds = Clouds::new(assets.images("clouds")?, cloud_count, rng);
        let spawners: Vec<LeafSpawner> = tilemap
            .extract(&[TREE_ID], true)
            .iter()
            .map(LeafSpawner::from_tree)
            .collect();
        let player = Player::new(PLAYER_SPAWN, &assets)?;
        info!(
            tiles = tilemap.len(),
            decor = tilemap.offgrid().len(),
            leaf_spawners = spawners.len(),
            clouds = clouds.clouds().len(),
            "world_built"
        );

        Ok(Self {
            assets,
            rules,
            tilemap,
            player,
            clouds,
            particles: ParticleSystem::new(spawners),
            scroll: Scroll::default(),
            input: InputState::default(),
            view,
        })
    }
}

impl<I> World<I> {
    /// Camera state.
    pub fn scroll(&self) -> &Scroll {
        &self.scroll
    }

    /// Currently held movement keys.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Leaves and their spawners.
    pub fn particles(&self) -> &ParticleSystem<I> {
        &self.particles
    }

    /// Background cloud layer.
    pub fn clouds(&self) -> &Clouds<I> {
        &self.clouds
    }

    /// Runs one fixed step: input, camera, then simulation. Returns `false`
    /// once a quit event has been seen.
    pub fn tick<R: Rng + ?Sized>(&mut self, events: &[InputEvent], rng: &mut R) -> Result<bool, AssetError> {
        let mut running = true;
        for &event in events {
            self.input.apply(event);
            match event {
                InputEvent::KeyDown(Key::Jump) => self.player.jump(),
                InputEvent::KeyDown(Key::Dash) => self.player.dash(),
                InputEvent::Quit => {
                    debug!("quit_event");
                    running = false;
                }
                _ => {}
            }
        }

        self.scroll.update(self.player.entity.rect().center(), self.view);

        self.clouds.update();
        let movement = vec2(self.input.horizontal(), 0.0);
        self.player
            .update(&self.tilemap, &self.rules, movement, &self.assets)?;
        self.particles.update(rng, &self.assets)?;
        Ok(running)
    }

    /// Draws back to front: background, clouds, tiles, player, particles.
    pub fn render<S: Surface<Image = I>>(&self, surf: &mut S) -> Result<(), AssetError> {
        let offset = self.scroll.render_offset();
        surf.blit(self.assets.image("background")?, Vec2::ZERO, false);
        self.clouds.render(surf, offset);
        self.tilemap.render(surf, offset, &self.assets)?;
        self.player.render(surf, offset);
        self.particles.render(surf, offset);
        Ok(())
    }
}
