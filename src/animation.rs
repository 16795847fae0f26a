//! Named sprite animation clips and per-entity playback state.

use std::collections::HashMap;

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    Idle,
    Walk,
    Attack,
    Hurt,
    Death,
}

impl AnimationState {
    /// Key the clip is registered under
    pub fn key(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walk => "walk",
            AnimationState::Attack => "attack",
            AnimationState::Hurt => "hurt",
            AnimationState::Death => "death",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    pub frames: usize,
    pub fps: f32,
    pub looping: bool,
}

impl AnimationClip {
    pub fn new(frames: usize, fps: f32, looping: bool) -> Self {
        Self { frames, fps, looping }
    }
}

/// Clips by key, shared by every animator
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    clips: HashMap<String, AnimationClip>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The player's clips. Attack, hurt and death play once.
    pub fn player() -> Self {
        let mut library = Self::new();
        library.register("idle", AnimationClip::new(IDLE_FRAMES, IDLE_FPS, true));
        library.register("walk", AnimationClip::new(WALK_FRAMES, WALK_FPS, true));
        library.register("attack", AnimationClip::new(ATTACK_FRAMES, ATTACK_FPS, false));
        library.register("hurt", AnimationClip::new(HURT_FRAMES, HURT_FPS, false));
        library.register("death", AnimationClip::new(DEATH_FRAMES, DEATH_FPS, false));
        library
    }

    pub fn register(&mut self, key: &str, clip: AnimationClip) {
        self.clips.insert(key.to_string(), clip);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationClip> {
        self.clips.get(key)
    }
}

/// Playback position within the current clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    pub state: AnimationState,
    pub frame: usize,
    elapsed: f32,
    pub finished: bool,
}

impl Animator {
    pub fn new(state: AnimationState) -> Self {
        Self {
            state,
            frame: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Switch clips. Playing the current clip again does not restart it.
    pub fn play(&mut self, state: AnimationState) {
        if self.state == state {
            return;
        }
        *self = Self::new(state);
    }

    pub fn update(&mut self, dt: f32, library: &AnimationLibrary) {
        let Some(clip) = library.get(self.state.key()) else {
            return;
        };
        if self.finished || clip.frames == 0 || clip.fps <= 0.0 {
            return;
        }

        self.elapsed += dt;
        let frame_time = 1.0 / clip.fps;
        while self.elapsed >= frame_time {
            self.elapsed -= frame_time;
            if self.frame + 1 < clip.frames {
                self.frame += 1;
            } else if clip.looping {
                self.frame = 0;
            } else {
                self.finished = true;
                break;
            }
        }
    }
}
