//! Animation playback and sprite placement.

use glam::Vec2;
use hecs::World;

use crate::animation::{AnimationLibrary, AnimationState, Animator};
use crate::components::{Body, Sprite};
use crate::physics::ArcadeWorld;
use crate::surface::Surface;

/// Vertical bob applied on odd walk frames
const WALK_BOB: f32 = 2.0;

pub fn update_animations(world: &mut World, library: &AnimationLibrary, dt: f32) {
    for (_id, animator) in world.query_mut::<&mut Animator>() {
        animator.update(dt, library);
    }
}

/// Center each sprite on its body, bobbing while walking.
pub fn sync_sprites(world: &World, physics: &ArcadeWorld, surface: &mut Surface) {
    for (_id, (body, sprite, animator)) in world.query::<(&Body, &Sprite, Option<&Animator>)>().iter() {
        let Some(body) = physics.body(body.0) else {
            continue;
        };
        let bob = match animator {
            Some(a) if a.state == AnimationState::Walk && a.frame % 2 == 1 => -WALK_BOB,
            _ => 0.0,
        };
        if let Some(rect) = surface.rect_mut(sprite.primitive) {
            rect.position = body.position + Vec2::new(0.0, bob) - rect.size / 2.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{DynamicBody, PhysicsWorld};
    use crate::surface::{RectPrimitive, SurfaceSink};

    #[test]
    fn test_sprite_follows_body() {
        let mut world = World::new();
        let mut physics = ArcadeWorld::new();
        let mut surface = Surface::new();

        let handle = physics.add_dynamic_body(DynamicBody::new(Vec2::new(100.0, 50.0), Vec2::splat(30.0)));
        let primitive = surface.add_rect(RectPrimitive::new(Vec2::ZERO, Vec2::splat(30.0), [0.0; 3]));
        world.spawn((Body(handle), Sprite::new(primitive), Animator::new(AnimationState::Idle)));

        sync_sprites(&world, &physics, &mut surface);
        assert_eq!(surface.rect(primitive).unwrap().center(), Vec2::new(100.0, 50.0));

        physics.body_mut(handle).unwrap().position = Vec2::new(130.0, 50.0);
        sync_sprites(&world, &physics, &mut surface);
        assert_eq!(surface.rect(primitive).unwrap().position, Vec2::new(115.0, 35.0));
    }

    #[test]
    fn test_update_animations_advances_frames() {
        let mut world = World::new();
        let library = AnimationLibrary::player();
        let entity = world.spawn((Animator::new(AnimationState::Walk),));

        update_animations(&mut world, &library, 0.15);
        assert_eq!(world.get::<&Animator>(entity).unwrap().frame, 1);
    }
}
