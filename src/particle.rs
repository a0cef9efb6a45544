//! Leaf particles and the spawners that emit them.

use crate::animation::Animation;
use crate::assets::AssetTable;
use crate::error::AssetError;
use crate::render::surface::Surface;
use crate::tilemap::Decor;
use macroquad::prelude::*;
use ::rand::Rng;

/// Decor tiles that become leaf spawners: large tree, variant 2.
pub const TREE_ID: (&str, usize) = ("large_decor", 2);

/// A spawner emits when `rand * SPAWN_DIVISOR < area`.
const SPAWN_DIVISOR: f32 = 49999.0;
const LEAF_VELOCITY: Vec2 = Vec2::new(-0.1, 0.3);
const LEAF_MAX_START_FRAME: u32 = 20;

/// Selects the clip and motion of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Falling leaf that sways.
    Leaf,
    /// Generic spark.
    Particle,
}

impl ParticleKind {
    /// Clip key in the asset table.
    pub fn asset_key(self) -> &'static str {
        match self {
            ParticleKind::Leaf => "particle/leaf",
            ParticleKind::Particle => "particle/particle",
        }
    }

    fn sways(self) -> bool {
        matches!(self, ParticleKind::Leaf)
    }
}

/// Short-lived effect that lives until its clip finishes.
#[derive(Debug, Clone)]
pub struct Particle<I> {
    /// Clip and motion selector.
    pub kind: ParticleKind,
    /// Centre in world pixels.
    pub pos: Vec2,
    /// Per-tick drift.
    pub velocity: Vec2,
    animation: Animation<I>,
}

impl<I> Particle<I> {
    /// Particle starting its clip at `frame`.
    pub fn new(
        kind: ParticleKind,
        pos: Vec2,
        velocity: Vec2,
        frame: u32,
        assets: &AssetTable<I>,
    ) -> Result<Self, AssetError> {
        let clip = assets.clip(kind.asset_key())?;
        Ok(Self {
            kind,
            pos,
            velocity,
            animation: Animation::starting_at(clip.clone(), frame),
        })
    }

    /// Playback state; the particle dies once it is done.
    pub fn animation(&self) -> &Animation<I> {
        &self.animation
    }

    /// Advances one tick. Returns `true` when the particle should be removed.
    pub fn update(&mut self) -> bool {
        let kill = self.animation.done();
        self.pos += self.velocity;
        self.animation.update();
        if self.kind.sways() {
            self.pos.x += (self.animation.frame() as f32 * 0.035).sin() * 0.3;
        }
        kill
    }

    /// Draws the current image centred on the particle.
    pub fn render<S: Surface<Image = I>>(&self, surf: &mut S, offset: IVec2) {
        let img = self.animation.img();
        let half = (surf.image_size(img) / 2.0).floor();
        surf.blit(img, self.pos - offset.as_vec2() - half, false);
    }
}

/// Region that randomly emits leaves, proportional to its area.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafSpawner {
    /// Area leaves appear in.
    pub rect: Rect,
}

impl LeafSpawner {
    /// Canopy area of a tree sprite whose top-left is at `decor.pos`.
    pub fn from_tree(decor: &Decor) -> Self {
        Self {
            rect: Rect::new(decor.pos.x + 4.0, decor.pos.y + 4.0, 23.0, 13.0),
        }
    }

    fn try_spawn<I, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        assets: &AssetTable<I>,
    ) -> Result<Option<Particle<I>>, AssetError> {
        if rng.gen::<f32>() * SPAWN_DIVISOR >= self.rect.w * self.rect.h {
            return Ok(None);
        }
        let pos = vec2(
            self.rect.x + rng.gen::<f32>() * self.rect.w,
            self.rect.y + rng.gen::<f32>() * self.rect.h,
        );
        let frame = rng.gen_range(0..=LEAF_MAX_START_FRAME);
        Particle::new(ParticleKind::Leaf, pos, LEAF_VELOCITY, frame, assets).map(Some)
    }
}

/// Live particles plus the spawners feeding them.
#[derive(Debug, Clone)]
pub struct ParticleSystem<I> {
    spawners: Vec<LeafSpawner>,
    particles: Vec<Particle<I>>,
}

impl<I> Default for ParticleSystem<I> {
    fn default() -> Self {
        Self {
            spawners: Vec::new(),
            particles: Vec::new(),
        }
    }
}

impl<I> ParticleSystem<I> {
    /// No live particles yet.
    pub fn new(spawners: Vec<LeafSpawner>) -> Self {
        Self {
            spawners,
            particles: Vec::new(),
        }
    }

    /// Leaf spawners in map order.
    pub fn spawners(&self) -> &[LeafSpawner] {
        &self.spawners
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> &[Particle<I>] {
        &self.particles
    }

    /// Adds a particle created elsewhere.
    pub fn push(&mut self, particle: Particle<I>) {
        self.particles.push(particle);
    }

    /// Rolls every spawner once, then advances and culls particles.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, assets: &AssetTable<I>) -> Result<(), AssetError> {
        for spawner in &self.spawners {
            if let Some(p) = spawner.try_spawn(rng, assets)? {
                self.particles.push(p);
            }
        }
        self.particles.retain_mut(|p| !p.update());
        Ok(())
    }

    /// Draws every live particle.
    pub fn render<S: Surface<Image = I>>(&self, surf: &mut S, offset: IVec2) {
        for p in &self.particles {
            p.render(surf, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Clip;
    use crate::assets::Asset;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;
    use std::rc::Rc;

    fn assets() -> AssetTable<u32> {
        let mut t = AssetTable::new();
        t.insert("particle/leaf", Asset::Animation(Rc::new(Clip::new(vec![1, 2, 3], 20, false))));
        t.insert("particle/particle", Asset::Animation(Rc::new(Clip::new(vec![4, 5], 2, false))));
        t
    }

    #[test]
    fn particle_is_removed_the_tick_after_its_clip_finishes() {
        let assets = assets();
        let mut p = Particle::new(ParticleKind::Particle, Vec2::ZERO, vec2(1.0, 0.0), 0, &assets).unwrap();
        for _ in 0..3 {
            assert!(!p.update());
        }
        assert!(p.animation().done());
        assert!(p.update());
        assert_eq!(p.pos, vec2(4.0, 0.0));
    }

    #[test]
    fn leaves_sway_with_their_frame() {
        let assets = assets();
        let mut leaf = Particle::new(ParticleKind::Leaf, Vec2::ZERO, Vec2::ZERO, 10, &assets).unwrap();
        leaf.update();
        let expected = (11.0f32 * 0.035).sin() * 0.3;
        assert!((leaf.pos.x - expected).abs() < 1e-6);

        let mut spark = Particle::new(ParticleKind::Particle, Vec2::ZERO, Vec2::ZERO, 0, &assets).unwrap();
        spark.update();
        assert_eq!(spark.pos.x, 0.0);
    }

    #[test]
    fn tree_spawner_covers_the_canopy() {
        let s = LeafSpawner::from_tree(&Decor::new("large_decor", 2, vec2(32.0, 16.0)));
        assert_eq!(s.rect, Rect::new(36.0, 20.0, 23.0, 13.0));
    }

    #[test]
    fn spawns_land_inside_the_region_and_start_desynchronised() {
        let assets = assets();
        // Area larger than the divisor makes every roll succeed.
        let spawner = LeafSpawner {
            rect: Rect::new(0.0, 0.0, 250.0, 250.0),
        };
        let mut system = ParticleSystem::new(vec![spawner.clone()]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            system.update(&mut rng, &assets).unwrap();
        }
        assert_eq!(system.particles().len(), 20);
        assert!(system
            .particles()
            .iter()
            .all(|p| p.velocity == LEAF_VELOCITY && p.animation().frame() <= LEAF_MAX_START_FRAME + 20));
        assert!(system
            .particles()
            .iter()
            .all(|p| p.pos.x > -5.0 && p.pos.x < 255.0 && p.pos.y >= 0.0 && p.pos.y < 257.0));
    }

    #[test]
    fn spawn_rate_tracks_area() {
        let assets = assets();
        let spawner = LeafSpawner {
            rect: Rect::new(0.0, 0.0, 23.0, 13.0),
        };
        let mut rng = StdRng::seed_from_u64(42);
        let rolls = 200_000;
        let mut hits = 0;
        for _ in 0..rolls {
            if spawner.try_spawn(&mut rng, &assets).unwrap().is_some() {
                hits += 1;
            }
        }
        // Expected rate is 299 / 49999, about 1196 hits.
        assert!((900..1500).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn missing_particle_clip_is_an_error() {
        let t: AssetTable<u32> = AssetTable::new();
        let err = Particle::new(ParticleKind::Leaf, Vec2::ZERO, Vec2::ZERO, 0, &t).unwrap_err();
        assert_eq!(err, AssetError::Missing("particle/leaf".into()));
    }
}
