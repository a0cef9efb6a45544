//! Smoothed camera scroll.

use macroquad::prelude::*;

/// Camera scroll eased toward a target, a fraction of the gap per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scroll {
    /// Current scroll in world pixels.
    pub pos: Vec2,
    smoothing: f32,
}

impl Default for Scroll {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SMOOTHING)
    }
}

impl Scroll {
    /// Ticks' worth of divisor: each tick closes 1/30 of the distance.
    pub const DEFAULT_SMOOTHING: f32 = 30.0;

    /// # Panics
    /// If `smoothing` is below 1, which would overshoot the target.
    pub fn new(smoothing: f32) -> Self {
        assert!(smoothing >= 1.0, "scroll smoothing must be at least 1");
        Self {
            pos: Vec2::ZERO,
            smoothing,
        }
    }

    /// Moves toward the scroll that centres `focus` in a `view`-sized screen.
    pub fn update(&mut self, focus: Vec2, view: Vec2) {
        let target = focus - view / 2.0;
        self.pos += (target - self.pos) / self.smoothing;
    }

    /// Integer offset used for drawing, truncated toward zero to avoid
    /// sub-pixel jitter.
    pub fn render_offset(&self) -> IVec2 {
        ivec2(self.pos.x as i32, self.pos.y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_without_overshoot() {
        let mut scroll = Scroll::default();
        let view = vec2(320.0, 240.0);
        let focus = vec2(500.0, -80.0);
        let target = focus - view / 2.0;
        let mut last = (target - scroll.pos).abs();
        for _ in 0..600 {
            scroll.update(focus, view);
            let gap = (target - scroll.pos).abs();
            assert!(gap.x <= last.x && gap.y <= last.y);
            assert!(scroll.pos.x <= target.x && scroll.pos.y >= target.y);
            last = gap;
        }
        assert!(last.x < 0.01 && last.y < 0.01);
    }

    #[test]
    fn first_step_closes_one_thirtieth() {
        let mut scroll = Scroll::default();
        scroll.update(vec2(460.0, 120.0), vec2(320.0, 240.0));
        assert_eq!(scroll.pos, vec2(10.0, 0.0));
    }

    #[test]
    fn render_offset_truncates_toward_zero() {
        let scroll = Scroll {
            pos: vec2(3.9, -2.7),
            ..Default::default()
        };
        assert_eq!(scroll.render_offset(), ivec2(3, -2));
    }
}
