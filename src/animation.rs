//! Sprite animation: shared clips and per-owner playback.

use std::rc::Rc;

/// Ticks each image is shown for when a clip does not say otherwise.
pub const DEFAULT_IMG_DURATION: u32 = 5;

/// Immutable image sequence with its timing, shared by every playback.
#[derive(Debug)]
pub struct Clip<I> {
    images: Rc<[I]>,
    img_duration: u32,
    looping: bool,
}

impl<I> Clip<I> {
    /// # Panics
    /// If `images` is empty or `img_duration` is zero.
    pub fn new(images: impl Into<Rc<[I]>>, img_duration: u32, looping: bool) -> Self {
        let images = images.into();
        assert!(!images.is_empty(), "animation clip needs at least one image");
        assert!(img_duration > 0, "animation image duration must be positive");
        Self {
            images,
            img_duration,
            looping,
        }
    }

    /// Images in playback order.
    pub fn images(&self) -> &[I] {
        &self.images
    }

    /// Ticks each image stays on screen.
    pub fn img_duration(&self) -> u32 {
        self.img_duration
    }

    /// Whether playback wraps after the last image.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Total number of ticks in one pass of the clip.
    pub fn length(&self) -> u32 {
        self.img_duration * self.images.len() as u32
    }
}

/// Per-owner playback position over a shared [`Clip`].
#[derive(Debug)]
pub struct Animation<I> {
    clip: Rc<Clip<I>>,
    frame: u32,
    done: bool,
}

impl<I> Clone for Animation<I> {
    fn clone(&self) -> Self {
        Self {
            clip: Rc::clone(&self.clip),
            frame: self.frame,
            done: self.done,
        }
    }
}

impl<I> Animation<I> {
    /// Starts playing `clip` from frame 0.
    pub fn new(clip: Rc<Clip<I>>) -> Self {
        Self {
            clip,
            frame: 0,
            done: false,
        }
    }

    /// Starts at `frame` instead of 0, clamped into the clip.
    pub fn starting_at(clip: Rc<Clip<I>>, frame: u32) -> Self {
        let mut anim = Self::new(clip);
        anim.frame = frame.min(anim.clip.length() - 1);
        anim
    }

    /// Fresh playback of the same clip, sharing its images.
    pub fn restart(&self) -> Self {
        Self::new(Rc::clone(&self.clip))
    }

    /// Advances one tick, wrapping or clamping at the end of the clip.
    pub fn update(&mut self) {
        let length = self.clip.length();
        if self.clip.looping {
            self.frame = (self.frame + 1) % length;
        } else {
            self.frame = (self.frame + 1).min(length - 1);
            if self.frame >= length - 1 {
                self.done = true;
            }
        }
    }

    /// Image for the current frame; each image is held for `img_duration` ticks.
    pub fn img(&self) -> &I {
        &self.clip.images[(self.frame / self.clip.img_duration) as usize]
    }

    /// Ticks played so far within the clip.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// True once a non-looping clip reached its last frame.
    pub fn done(&self) -> bool {
        self.done
    }

    /// The shared clip being played.
    pub fn clip(&self) -> &Rc<Clip<I>> {
        &self.clip
    }
}
