//! Core gameplay constants (player body, movement, arena layout).

/// Player movement speed in screen units per second
pub const PLAYER_SPEED: f32 = 150.0;
/// Player body side length
pub const PLAYER_SIZE: f32 = 30.0;
/// Player fill color (black)
pub const PLAYER_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Arena ground width
pub const ARENA_WIDTH: f32 = 800.0;
/// Arena ground height
pub const ARENA_HEIGHT: f32 = 600.0;
/// Arena ground color (green)
pub const ARENA_GROUND_COLOR: [f32; 3] = [0.0, 1.0, 0.0];

/// Wall tile color
pub const WALL_COLOR: [f32; 3] = [0.2, 0.2, 0.25];
/// Floor tile color
pub const FLOOR_COLOR: [f32; 3] = [0.55, 0.5, 0.42];

/// Instruction text shown in every scene
pub const INSTRUCTION_TEXT: &str = "Use Arrow Keys to Move";
/// Instruction text font size in points
pub const INSTRUCTION_FONT_SIZE: f32 = 24.0;
/// Instruction text vertical position
pub const INSTRUCTION_TEXT_Y: f32 = 20.0;
