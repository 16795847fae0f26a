use crate::physics::BodyHandle;
use crate::surface::PrimitiveId;

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Physics body driving this entity's position
#[derive(Debug, Clone, Copy)]
pub struct Body(pub BodyHandle);

/// Rectangle on the surface that draws this entity
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub primitive: PrimitiveId,
}

impl Sprite {
    pub fn new(primitive: PrimitiveId) -> Self {
        Self { primitive }
    }
}

/// Movement speed in screen units per second
#[derive(Debug, Clone, Copy)]
pub struct Speed(pub f32);
