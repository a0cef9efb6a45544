//! String-keyed asset lookup and tile type rules.

use crate::animation::{Animation, Clip};
use crate::error::AssetError;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// One entry of the asset table.
#[derive(Debug)]
pub enum Asset<I> {
    /// A single image, e.g. the background.
    Image(I),
    /// Variants of one tile type, indexed by `variant`.
    Images(Rc<[I]>),
    /// Clip template; entities play their own copy.
    Animation(Rc<Clip<I>>),
}

/// Read-only lookup from string keys (`"grass"`, `"player/idle"`) to assets.
#[derive(Debug)]
pub struct AssetTable<I> {
    entries: HashMap<String, Asset<I>>,
}

impl<I> Default for AssetTable<I> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<I> AssetTable<I> {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `asset` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, asset: Asset<I>) {
        self.entries.insert(key.into(), asset);
    }

    /// True if something is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get(&self, key: &str) -> Result<&Asset<I>, AssetError> {
        self.entries
            .get(key)
            .ok_or_else(|| AssetError::Missing(key.to_owned()))
    }

    /// Single image under `key`.
    pub fn image(&self, key: &str) -> Result<&I, AssetError> {
        match self.get(key)? {
            Asset::Image(img) => Ok(img),
            _ => Err(AssetError::WrongKind {
                key: key.to_owned(),
                expected: "a single image",
            }),
        }
    }

    /// Image list under `key`.
    pub fn images(&self, key: &str) -> Result<&[I], AssetError> {
        match self.get(key)? {
            Asset::Images(imgs) => Ok(imgs),
            _ => Err(AssetError::WrongKind {
                key: key.to_owned(),
                expected: "an image list",
            }),
        }
    }

    /// Image `variant` of a tile type.
    pub fn variant(&self, key: &str, variant: usize) -> Result<&I, AssetError> {
        self.images(key)?
            .get(variant)
            .ok_or_else(|| AssetError::MissingVariant {
                key: key.to_owned(),
                variant,
            })
    }

    /// Animation clip under `key`.
    pub fn clip(&self, key: &str) -> Result<&Rc<Clip<I>>, AssetError> {
        match self.get(key)? {
            Asset::Animation(clip) => Ok(clip),
            _ => Err(AssetError::WrongKind {
                key: key.to_owned(),
                expected: "an animation",
            }),
        }
    }

    /// New playback of the clip under `key`, starting at frame 0.
    pub fn animation(&self, key: &str) -> Result<Animation<I>, AssetError> {
        Ok(Animation::new(Rc::clone(self.clip(key)?)))
    }
}

/// Which tile types collide and which take part in autotiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRules {
    /// Types that block movement.
    pub physics: HashSet<String>,
    /// Types rewritten by [`crate::Tilemap::autotile`].
    pub autotile: HashSet<String>,
}

impl Default for TileRules {
    fn default() -> Self {
        let solid: HashSet<String> = ["grass", "stone"].iter().map(|s| s.to_string()).collect();
        Self {
            physics: solid.clone(),
            autotile: solid,
        }
    }
}

impl TileRules {
    /// True if tiles of `kind` collide.
    pub fn is_solid(&self, kind: &str) -> bool {
        self.physics.contains(kind)
    }

    /// True if tiles of `kind` take part in autotiling.
    pub fn autotiles(&self, kind: &str) -> bool {
        self.autotile.contains(kind)
    }
}
