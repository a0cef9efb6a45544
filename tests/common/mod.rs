#![allow(dead_code)]

use macroquad::prelude::*;
use macroquad_platformer::{Asset, AssetTable, Clip, Surface};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Image handle used in tests: a name plus a pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Img {
    pub name: &'static str,
    pub size: Vec2,
}

pub const fn img(name: &'static str) -> Img {
    Img {
        name,
        size: Vec2::new(16.0, 16.0),
    }
}

#[derive(Default)]
pub struct Recorder {
    pub blits: Vec<(&'static str, Vec2, bool)>,
}

impl Recorder {
    pub fn names(&self) -> Vec<&'static str> {
        self.blits.iter().map(|b| b.0).collect()
    }
}

impl Surface for Recorder {
    type Image = Img;

    fn size(&self) -> Vec2 {
        vec2(320.0, 240.0)
    }

    fn image_size(&self, image: &Img) -> Vec2 {
        image.size
    }

    fn blit(&mut self, image: &Img, dest: Vec2, flip_x: bool) {
        self.blits.push((image.name, dest, flip_x));
    }
}

fn clip(names: &[&'static str], duration: u32, looping: bool) -> Asset<Img> {
    let images: Vec<Img> = names.iter().map(|&n| img(n)).collect();
    Asset::Animation(Rc::new(Clip::new(images, duration, looping)))
}

fn list(names: &[&'static str]) -> Asset<Img> {
    Asset::Images(names.iter().map(|&n| img(n)).collect::<Vec<_>>().into())
}

/// The game's asset manifest with placeholder images.
pub fn game_assets() -> AssetTable<Img> {
    let mut t = AssetTable::new();
    t.insert("background", Asset::Image(img("background")));
    t.insert("player", Asset::Image(img("player")));
    t.insert("clouds", list(&["cloud_0", "cloud_1"]));
    t.insert("grass", list(&["grass_0", "grass_1", "grass_2", "grass_3", "grass_4", "grass_5", "grass_6", "grass_7", "grass_8"]));
    t.insert("stone", list(&["stone_0", "stone_1", "stone_2", "stone_3", "stone_4", "stone_5", "stone_6", "stone_7", "stone_8"]));
    t.insert("decor", list(&["decor_0", "decor_1", "decor_2", "decor_3"]));
    t.insert("large_decor", list(&["rock", "bush", "tree"]));
    t.insert("player/idle", clip(&["idle_0", "idle_1"], 6, true));
    t.insert("player/run", clip(&["run_0", "run_1"], 4, true));
    t.insert("player/jump", clip(&["jump_0"], 5, true));
    t.insert("particle/leaf", clip(&["leaf_0", "leaf_1", "leaf_2"], 20, false));
    t.insert("particle/particle", clip(&["spark_0", "spark_1"], 6, false));
    t
}

pub fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("mq_platformer_{nanos}"));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}
