//! Per-frame systems operating on the ECS world.

mod animation;
mod movement;

pub use animation::*;
pub use movement::*;
