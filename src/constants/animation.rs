//! Animation-related constants.

/// Maximum delta time per frame (prevents tunnelling and snapping after long frames)
pub const MAX_FRAME_DT: f32 = 0.05;

/// Idle clip: frames, frames per second
pub const IDLE_FRAMES: usize = 4;
pub const IDLE_FPS: f32 = 6.0;
/// Walk clip
pub const WALK_FRAMES: usize = 6;
pub const WALK_FPS: f32 = 10.0;
/// Attack clip
pub const ATTACK_FRAMES: usize = 5;
pub const ATTACK_FPS: f32 = 12.0;
/// Hurt clip
pub const HURT_FRAMES: usize = 3;
pub const HURT_FPS: f32 = 10.0;
/// Death clip
pub const DEATH_FRAMES: usize = 6;
pub const DEATH_FPS: f32 = 8.0;
