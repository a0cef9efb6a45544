//! Parallax cloud layer.

use crate::render::surface::Surface;
use macroquad::prelude::*;
use ::rand::seq::SliceRandom;
use ::rand::Rng;

/// Background sprite drifting right with parallax.
#[derive(Debug, Clone)]
pub struct Cloud<I> {
    /// Unwrapped world position.
    pub pos: Vec2,
    img: I,
    speed: f32,
    depth: f32,
}

impl<I> Cloud<I> {
    /// Cloud drifting `speed` pixels per tick with parallax factor `depth`.
    pub fn new(pos: Vec2, img: I, speed: f32, depth: f32) -> Self {
        Self {
            pos,
            img,
            speed,
            depth,
        }
    }

    /// Parallax factor; smaller is farther away.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Drifts right by its speed.
    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Screen position after parallax, wrapped so the sprite leaves one
    /// edge completely before reappearing on the other.
    pub fn screen_pos(&self, offset: IVec2, view: Vec2, img_size: Vec2) -> Vec2 {
        let render_pos = self.pos - offset.as_vec2() * self.depth;
        vec2(
            render_pos.x.rem_euclid(view.x + img_size.x) - img_size.x,
            render_pos.y.rem_euclid(view.y + img_size.y) - img_size.y,
        )
    }

    /// Draws at its wrapped parallax position.
    pub fn render<S: Surface<Image = I>>(&self, surf: &mut S, offset: IVec2) {
        let dest = self.screen_pos(offset, surf.size(), surf.image_size(&self.img));
        surf.blit(&self.img, dest, false);
    }
}

/// Cloud layer, kept sorted far-to-near.
#[derive(Debug, Clone)]
pub struct Clouds<I> {
    clouds: Vec<Cloud<I>>,
}

impl<I: Clone> Clouds<I> {
    /// Scatters `count` clouds with random image, speed in [0.05, 0.1) and
    /// depth in [0.2, 0.8).
    pub fn new<R: Rng + ?Sized>(images: &[I], count: usize, rng: &mut R) -> Self {
        let clouds = (0..count)
            .filter_map(|_| {
                let pos = vec2(rng.gen::<f32>() * 99999.0, rng.gen::<f32>() * 99999.0);
                let img = images.choose(rng)?.clone();
                let speed = rng.gen::<f32>() * 0.05 + 0.05;
                let depth = rng.gen::<f32>() * 0.6 + 0.2;
                Some(Cloud::new(pos, img, speed, depth))
            })
            .collect();
        Self::from_clouds(clouds)
    }
}

impl<I> Clouds<I> {
    /// Layer from prebuilt clouds, sorted far to near.
    pub fn from_clouds(mut clouds: Vec<Cloud<I>>) -> Self {
        clouds.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self { clouds }
    }

    /// Clouds in draw order.
    pub fn clouds(&self) -> &[Cloud<I>] {
        &self.clouds
    }

    /// Drifts every cloud.
    pub fn update(&mut self) {
        for cloud in &mut self.clouds {
            cloud.update();
        }
    }

    /// Draws far clouds first.
    pub fn render<S: Surface<Image = I>>(&self, surf: &mut S, offset: IVec2) {
        for cloud in &self.clouds {
            cloud.render(surf, offset);
        }
    }
}
