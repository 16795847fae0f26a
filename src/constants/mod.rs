//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Runtime overrides live in `crate::config`.

mod animation;
mod camera;
mod dungeon;
mod gameplay;
mod ui;

pub use animation::*;
pub use camera::*;
pub use dungeon::*;
pub use gameplay::*;
pub use ui::*;
