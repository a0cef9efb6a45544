use crate::animation::{Clip, DEFAULT_IMG_DURATION};
use crate::assets::{Asset, AssetTable};
use anyhow::Context;
use macroquad::prelude::*;
use std::path::Path;
use std::rc::Rc;

/// Image lists keyed by the asset name and their directory.
const IMAGE_LISTS: [(&str, &str); 5] = [
    ("decor", "tiles/decor"),
    ("grass", "tiles/grass"),
    ("large_decor", "tiles/large_decor"),
    ("stone", "tiles/stone"),
    ("clouds", "clouds"),
];

const IMAGES: [(&str, &str); 2] = [("player", "entities/player.png"), ("background", "background.png")];

/// (key, directory, ticks per image, loops)
const CLIPS: [(&str, &str, u32, bool); 7] = [
    ("player/idle", "entities/player/idle", 6, true),
    ("player/run", "entities/player/run", 4, true),
    ("player/jump", "entities/player/jump", DEFAULT_IMG_DURATION, true),
    ("player/slide", "entities/player/slide", DEFAULT_IMG_DURATION, true),
    ("player/wall_slide", "entities/player/wall_slide", DEFAULT_IMG_DURATION, true),
    ("particle/leaf", "particles/leaf", 20, false),
    ("particle/particle", "particles/particle", 6, false),
];

/// Loads one image, turning pure black pixels transparent.
pub async fn load_sprite(path: &Path) -> anyhow::Result<Texture2D> {
    let path_str = path
        .to_str()
        .with_context(|| format!("Non UTF-8 asset path {}", path.display()))?;
    let mut image = load_image(path_str)
        .await
        .with_context(|| format!("Loading image {}", path.display()))?;
    for px in image.get_image_data_mut() {
        if px[0] == 0 && px[1] == 0 && px[2] == 0 {
            px[3] = 0;
        }
    }
    let tex = Texture2D::from_image(&image);
    tex.set_filter(FilterMode::Nearest);
    Ok(tex)
}

/// Loads every image in `dir`, ordered by file name.
pub async fn load_sprites(dir: &Path) -> anyhow::Result<Vec<Texture2D>> {
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("Listing {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Listing {}", dir.display()))?;
    paths.retain(|p| p.is_file());
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for p in &paths {
        out.push(load_sprite(p).await?);
    }
    Ok(out)
}

/// Loads the game's fixed asset manifest from `base_dir`.
pub async fn load_game_assets(base_dir: &Path) -> anyhow::Result<AssetTable<Texture2D>> {
    let mut table = AssetTable::new();

    for (key, dir) in IMAGE_LISTS {
        let images = load_sprites(&base_dir.join(dir)).await?;
        table.insert(key, Asset::Images(images.into()));
    }

    for (key, file) in IMAGES {
        table.insert(key, Asset::Image(load_sprite(&base_dir.join(file)).await?));
    }

    for (key, dir, duration, looping) in CLIPS {
        let images = load_sprites(&base_dir.join(dir)).await?;
        if images.is_empty() {
            anyhow::bail!("Animation {} has no frames in {}", key, dir);
        }
        table.insert(key, Asset::Animation(Rc::new(Clip::new(images, duration, looping))));
    }

    Ok(table)
}
