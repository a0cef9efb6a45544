//! Physics entities and the player.

use crate::animation::Animation;
use crate::assets::{AssetTable, TileRules};
use crate::error::AssetError;
use crate::render::surface::Surface;
use crate::spatial::grid::overlaps;
use crate::tilemap::Tilemap;
use macroquad::prelude::*;
use tracing::debug;

/// Added to vertical velocity every tick.
pub const GRAVITY: f32 = 0.1;
/// Maximum downward velocity.
pub const TERMINAL_VELOCITY: f32 = 5.0;
/// Vertical velocity set by a jump.
pub const JUMP_VELOCITY: f32 = -3.0;
/// Ticks airborne before the jump animation kicks in.
pub const AIR_TIME_GRACE: u32 = 4;

/// Which sides touched a solid tile during the last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    /// Hit a ceiling.
    pub up: bool,
    /// Landed on the ground.
    pub down: bool,
    /// Hit a wall while moving right.
    pub right: bool,
    /// Hit a wall while moving left.
    pub left: bool,
}

/// Animation state of an entity; selects the `<kind>/<action>` clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Standing still.
    Idle,
    /// Moving along the ground.
    Run,
    /// Airborne past the grace period.
    Jump,
}

impl Action {
    /// Suffix of the clip key.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
        }
    }
}

/// Axis-aligned box moved by velocity and pushed out of solid tiles.
#[derive(Debug, Clone)]
pub struct PhysicsEntity<I> {
    kind: String,
    /// Top-left corner in world pixels.
    pub pos: Vec2,
    size: Vec2,
    /// Per-tick velocity added on top of movement intent.
    pub velocity: Vec2,
    collisions: Collisions,
    action: Action,
    flip: bool,
    anim_offset: Vec2,
    animation: Animation<I>,
}

impl<I> PhysicsEntity<I> {
    /// Creates an entity playing its `idle` clip.
    pub fn new(
        kind: impl Into<String>,
        pos: Vec2,
        size: Vec2,
        assets: &AssetTable<I>,
    ) -> Result<Self, AssetError> {
        let kind = kind.into();
        let animation = assets.animation(&clip_key(&kind, Action::Idle))?;
        Ok(Self {
            kind,
            pos,
            size,
            velocity: Vec2::ZERO,
            collisions: Collisions::default(),
            action: Action::Idle,
            flip: false,
            anim_offset: vec2(-3.0, -3.0),
            animation,
        })
    }

    /// Asset prefix, e.g. `"player"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Collision box size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Collision box in world space.
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Sides touched during the last update.
    pub fn collisions(&self) -> Collisions {
        self.collisions
    }

    /// Action whose clip is playing.
    pub fn action(&self) -> Action {
        self.action
    }

    /// True when facing left.
    pub fn flip(&self) -> bool {
        self.flip
    }

    /// Playback of the current action clip.
    pub fn animation(&self) -> &Animation<I> {
        &self.animation
    }

    /// Switches to `action`'s clip from frame 0. Re-setting the current
    /// action keeps the clip running.
    pub fn set_action(&mut self, action: Action, assets: &AssetTable<I>) -> Result<(), AssetError> {
        if action != self.action {
            self.animation = assets.animation(&clip_key(&self.kind, action))?;
            debug!(kind = %self.kind, from = self.action.as_str(), to = action.as_str(), "action_changed");
            self.action = action;
        }
        Ok(())
    }

    /// One physics tick: move each axis separately, snapping out of any
    /// overlapping solid tile, then apply gravity.
    pub fn update(&mut self, tilemap: &Tilemap, rules: &TileRules, movement: Vec2) {
        self.collisions = Collisions::default();
        let frame_movement = movement + self.velocity;

        self.pos.x += frame_movement.x;
        let mut entity_rect = self.rect();
        for rect in tilemap.physics_rects_around(self.pos, rules) {
            if overlaps(&entity_rect, &rect) {
                if frame_movement.x > 0.0 {
                    entity_rect.x = rect.x - entity_rect.w;
                    self.collisions.right = true;
                }
                if frame_movement.x < 0.0 {
                    entity_rect.x = rect.x + rect.w;
                    self.collisions.left = true;
                }
                self.pos.x = entity_rect.x;
            }
        }

        if movement.x > 0.0 {
            self.flip = false;
        } else if movement.x < 0.0 {
            self.flip = true;
        }

        self.pos.y += frame_movement.y;
        let mut entity_rect = self.rect();
        for rect in tilemap.physics_rects_around(self.pos, rules) {
            if overlaps(&entity_rect, &rect) {
                if frame_movement.y > 0.0 {
                    entity_rect.y = rect.y - entity_rect.h;
                    self.collisions.down = true;
                }
                if frame_movement.y < 0.0 {
                    entity_rect.y = rect.y + rect.h;
                    self.collisions.up = true;
                }
                self.pos.y = entity_rect.y;
            }
        }

        self.velocity.y = (self.velocity.y + GRAVITY).min(TERMINAL_VELOCITY);
        if self.collisions.down || self.collisions.up {
            self.velocity.y = 0.0;
        }

        self.animation.update();
    }

    /// Draws the current frame, mirrored when facing left.
    pub fn render<S: Surface<Image = I>>(&self, surf: &mut S, offset: IVec2) {
        let dest = self.pos - offset.as_vec2() + self.anim_offset;
        surf.blit(self.animation.img(), dest, self.flip);
    }
}

fn clip_key(kind: &str, action: Action) -> String {
    format!("{}/{}", kind, action.as_str())
}

/// Advances the air timer and picks the animation for the next tick.
///
/// Grounded resets the timer; after [`AIR_TIME_GRACE`] airborne ticks the
/// jump animation wins over run/idle.
pub fn next_player_state(collisions: Collisions, air_time: u32, movement_x: f32) -> (u32, Action) {
    let air_time = if collisions.down { 0 } else { air_time + 1 };
    let action = if air_time > AIR_TIME_GRACE {
        Action::Jump
    } else if movement_x != 0.0 {
        Action::Run
    } else {
        Action::Idle
    };
    (air_time, action)
}

/// The controllable entity.
#[derive(Debug, Clone)]
pub struct Player<I> {
    /// Shared physics state.
    pub entity: PhysicsEntity<I>,
    air_time: u32,
    dash_requested: bool,
}

impl<I> Player<I> {
    /// Collision box size.
    pub const SIZE: Vec2 = Vec2::new(8.0, 15.0);

    /// Player standing idle at `pos`.
    pub fn new(pos: Vec2, assets: &AssetTable<I>) -> Result<Self, AssetError> {
        Ok(Self {
            entity: PhysicsEntity::new("player", pos, Self::SIZE, assets)?,
            air_time: 0,
            dash_requested: false,
        })
    }

    /// Ticks since the player last touched the ground.
    pub fn air_time(&self) -> u32 {
        self.air_time
    }

    /// Physics step followed by the animation state machine.
    pub fn update(
        &mut self,
        tilemap: &Tilemap,
        rules: &TileRules,
        movement: Vec2,
        assets: &AssetTable<I>,
    ) -> Result<(), AssetError> {
        self.entity.update(tilemap, rules, movement);
        let (air_time, action) = next_player_state(self.entity.collisions(), self.air_time, movement.x);
        self.air_time = air_time;
        self.entity.set_action(action, assets)
    }

    /// Launches upward.
    pub fn jump(&mut self) {
        self.entity.velocity.y = JUMP_VELOCITY;
    }

    /// Records a dash request. Dash movement itself is not simulated yet;
    /// the flag is cleared by [`Player::take_dash_request`].
    pub fn dash(&mut self) {
        self.dash_requested = true;
        debug!(pos = ?self.entity.pos, "dash_requested");
    }

    /// Returns and clears a pending dash request.
    pub fn take_dash_request(&mut self) -> bool {
        std::mem::take(&mut self.dash_requested)
    }

    /// Draws the player sprite.
    pub fn render<S: Surface<Image = I>>(&self, surf: &mut S, offset: IVec2) {
        self.entity.render(surf, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Clip;
    use crate::assets::Asset;
    use crate::spatial::grid::Cell;
    use crate::tilemap::Tile;
    use std::rc::Rc;

    fn assets() -> AssetTable<u32> {
        let mut t = AssetTable::new();
        t.insert("player/idle", Asset::Animation(Rc::new(Clip::new(vec![1, 2], 6, true))));
        t.insert("player/run", Asset::Animation(Rc::new(Clip::new(vec![3, 4], 4, true))));
        t.insert("player/jump", Asset::Animation(Rc::new(Clip::new(vec![5], 5, true))));
        t
    }

    fn entity(pos: Vec2) -> PhysicsEntity<u32> {
        PhysicsEntity::new("player", pos, vec2(8.0, 15.0), &assets()).unwrap()
    }

    fn floor(cells: impl IntoIterator<Item = (i32, i32)>) -> Tilemap {
        let mut map = Tilemap::new(16);
        for (x, y) in cells {
            map.place(Tile::new("stone", 0, Cell::new(x, y)));
        }
        map
    }

    #[test]
    fn moving_right_snaps_to_tile_left_edge() {
        let map = floor([(1, 0)]);
        let mut e = entity(vec2(7.0, 0.0));
        e.update(&map, &TileRules::default(), vec2(2.0, 0.0));
        assert_eq!(e.rect().right(), 16.0);
        assert!(e.collisions().right);
        assert!(!e.collisions().left);
        assert_eq!(e.velocity.x, 0.0);
    }

    #[test]
    fn moving_left_snaps_to_tile_right_edge() {
        let map = floor([(0, 0)]);
        let mut e = entity(vec2(17.0, 0.0));
        e.update(&map, &TileRules::default(), vec2(-2.0, 0.0));
        assert_eq!(e.pos.x, 16.0);
        assert!(e.collisions().left);
        assert!(e.flip());
    }

    #[test]
    fn falling_lands_on_tile_top_and_zeroes_velocity() {
        let map = floor([(0, 2)]);
        let mut e = entity(vec2(4.0, 16.0));
        e.velocity.y = 3.0;
        e.update(&map, &TileRules::default(), Vec2::ZERO);
        assert_eq!(e.rect().bottom(), 32.0);
        assert!(e.collisions().down);
        assert_eq!(e.velocity.y, 0.0);
    }

    #[test]
    fn rising_into_ceiling_sets_up() {
        let map = floor([(0, 0)]);
        let mut e = entity(vec2(4.0, 17.0));
        e.velocity.y = -3.0;
        e.update(&map, &TileRules::default(), Vec2::ZERO);
        assert_eq!(e.pos.y, 16.0);
        assert!(e.collisions().up);
        assert_eq!(e.velocity.y, 0.0);
    }

    #[test]
    fn gravity_clamps_at_terminal_velocity() {
        let map = Tilemap::new(16);
        let mut e = entity(vec2(0.0, 0.0));
        e.velocity.y = 4.95;
        e.update(&map, &TileRules::default(), Vec2::ZERO);
        assert_eq!(e.velocity.y, TERMINAL_VELOCITY);
        e.update(&map, &TileRules::default(), Vec2::ZERO);
        assert_eq!(e.velocity.y, TERMINAL_VELOCITY);
    }

    #[test]
    fn resting_on_floor_does_not_touch_horizontal_flags() {
        let map = floor((-2..3).map(|x| (x, 1)));
        let mut e = entity(vec2(4.0, 1.0));
        e.velocity.y = 0.5;
        e.update(&map, &TileRules::default(), vec2(1.0, 0.0));
        assert!(!e.collisions().right);
        assert!(!e.collisions().left);
        assert!(e.collisions().down);
        assert_eq!(e.pos, vec2(5.0, 1.0));
    }

    #[test]
    fn zero_movement_keeps_facing() {
        let map = Tilemap::new(16);
        let mut e = entity(Vec2::ZERO);
        e.update(&map, &TileRules::default(), vec2(-1.0, 0.0));
        assert!(e.flip());
        e.update(&map, &TileRules::default(), Vec2::ZERO);
        assert!(e.flip());
        e.update(&map, &TileRules::default(), vec2(1.0, 0.0));
        assert!(!e.flip());
    }

    #[test]
    fn set_action_restarts_only_on_change() {
        let assets = assets();
        let mut e = entity(Vec2::ZERO);
        e.update(&Tilemap::new(16), &TileRules::default(), Vec2::ZERO);
        assert_eq!(e.animation().frame(), 1);
        e.set_action(Action::Idle, &assets).unwrap();
        assert_eq!(e.animation().frame(), 1);
        e.set_action(Action::Run, &assets).unwrap();
        assert_eq!(e.animation().frame(), 0);
        assert_eq!(*e.animation().img(), 3);
    }

    #[test]
    fn player_state_honours_air_time_grace() {
        let airborne = Collisions::default();
        let grounded = Collisions {
            down: true,
            ..Default::default()
        };
        assert_eq!(next_player_state(grounded, 9, 1.0), (0, Action::Run));
        assert_eq!(next_player_state(airborne, 3, 0.0), (4, Action::Idle));
        assert_eq!(next_player_state(airborne, 4, -1.0), (5, Action::Jump));
        assert_eq!(next_player_state(airborne, 0, 0.0), (1, Action::Idle));
    }

    #[test]
    fn player_switches_to_jump_after_grace_period() {
        let assets = assets();
        let map = Tilemap::new(16);
        let mut p = Player::new(vec2(0.0, 0.0), &assets).unwrap();
        for _ in 0..4 {
            p.update(&map, &TileRules::default(), vec2(1.0, 0.0), &assets).unwrap();
            assert_eq!(p.entity.action(), Action::Run);
        }
        p.update(&map, &TileRules::default(), vec2(1.0, 0.0), &assets).unwrap();
        assert_eq!(p.air_time(), 5);
        assert_eq!(p.entity.action(), Action::Jump);
    }

    #[test]
    fn jump_and_dash_hooks() {
        let mut p = Player::new(Vec2::ZERO, &assets()).unwrap();
        p.jump();
        assert_eq!(p.entity.velocity.y, JUMP_VELOCITY);
        p.dash();
        assert!(p.take_dash_request());
        assert!(!p.take_dash_request());
    }

    #[test]
    fn missing_clip_is_an_error() {
        let t: AssetTable<u32> = AssetTable::new();
        let err = PhysicsEntity::new("slime", Vec2::ZERO, Vec2::ONE, &t).unwrap_err();
        assert_eq!(err, AssetError::Missing("slime/idle".into()));
    }
}
