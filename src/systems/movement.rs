//! Player movement system.

use glam::Vec2;
use hecs::World;

use crate::animation::{AnimationState, Animator};
use crate::components::{Body, Player, Speed};
use crate::input::CursorKeys;
use crate::physics::{Aabb, ArcadeWorld};

/// Velocity for the held keys. Left wins over right and up wins over down.
pub fn velocity_for_keys(keys: CursorKeys, speed: f32) -> Vec2 {
    let x = if keys.left {
        -speed
    } else if keys.right {
        speed
    } else {
        0.0
    };
    let y = if keys.up {
        -speed
    } else if keys.down {
        speed
    } else {
        0.0
    };
    Vec2::new(x, y)
}

pub fn animation_for_velocity(velocity: Vec2) -> AnimationState {
    if velocity != Vec2::ZERO {
        AnimationState::Walk
    } else {
        AnimationState::Idle
    }
}

/// Set the player's body velocity from input and pick walk/idle.
pub fn player_movement(world: &mut World, physics: &mut ArcadeWorld, keys: CursorKeys) {
    for (_id, (body, speed, animator)) in world
        .query_mut::<(&Body, &Speed, &mut Animator)>()
        .with::<&Player>()
    {
        let velocity = velocity_for_keys(keys, speed.0);
        if let Some(body) = physics.body_mut(body.0) {
            body.velocity = velocity;
        }
        animator.play(animation_for_velocity(velocity));
    }
}

/// Keep the player's collision box inside `area`.
pub fn clamp_player_to(world: &mut World, physics: &mut ArcadeWorld, area: Aabb) {
    for (_id, body) in world.query_mut::<&Body>().with::<&Player>() {
        let Some(body) = physics.body_mut(body.0) else {
            continue;
        };
        let half = body.size / 2.0;
        let min = area.min + half - body.offset;
        let max = area.max() - half - body.offset;
        body.position = body.position.clamp(min, max);
    }
}
