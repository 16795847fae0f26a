//! Minimal arcade physics: static AABB groups, moving bodies, axis-separated
//! collision resolution.
//!
//! Bodies move one axis at a time and are pushed back out of any static body
//! they end up overlapping, so a body sliding along a wall keeps its motion
//! along the wall. Static groups keep a uniform-grid index so a step only
//! tests the walls near each body. A fast body is moved in sub-steps no longer
//! than its own size or the group's cell size, so it cannot skip over a wall.

use std::collections::HashMap;

use glam::Vec2;

use crate::constants::TILE_SIZE;

/// Axis-aligned bounding box, stored as top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticGroupId(pub(crate) usize);

/// Which sides of a body were blocked during the last step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// A moving body attached to a game object.
///
/// `position` is the game object's center; the collision box is `size`
/// centered there and shifted by `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBody {
    pub position: Vec2,
    pub size: Vec2,
    pub offset: Vec2,
    pub velocity: Vec2,
    pub bounce: f32,
    pub collide_world_bounds: bool,
    pub blocked: Blocked,
}

impl DynamicBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            bounce: 0.0,
            collide_world_bounds: false,
            blocked: Blocked::default(),
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_world_bounds_collision(mut self, collide: bool) -> Self {
        self.collide_world_bounds = collide;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position + self.offset, self.size)
    }

    /// Move the body so its collision box starts at `min`.
    fn set_bounds_min(&mut self, min: Vec2) {
        self.position = min + self.size / 2.0 - self.offset;
    }
}

/// Capability consumed by scene setup and the binder.
pub trait PhysicsWorld {
    fn set_bounds(&mut self, bounds: Aabb);
    /// `cell_size` should match the size of the bodies the group will hold.
    fn create_static_group(&mut self, cell_size: f32) -> StaticGroupId;
    fn add_static_body(&mut self, group: StaticGroupId, bounds: Aabb);
    fn add_dynamic_body(&mut self, body: DynamicBody) -> BodyHandle;
    /// Make `body` collide with every member of `group`.
    fn add_collider(&mut self, body: BodyHandle, group: StaticGroupId);
}

/// Static bodies bucketed by cell for neighbourhood queries
#[derive(Debug, Clone)]
struct StaticGroup {
    bodies: Vec<Aabb>,
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f32,
}

impl StaticGroup {
    fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            TILE_SIZE
        };
        Self {
            bodies: Vec::new(),
            cells: HashMap::new(),
            cell_size,
        }
    }

    fn cell_range(&self, bounds: &Aabb) -> (i32, i32, i32, i32) {
        let min = bounds.min / self.cell_size;
        let max = bounds.max() / self.cell_size;
        (
            min.x.floor() as i32,
            min.y.floor() as i32,
            max.x.ceil() as i32 - 1,
            max.y.ceil() as i32 - 1,
        )
    }

    fn insert(&mut self, bounds: Aabb) {
        let idx = self.bodies.len();
        self.bodies.push(bounds);
        let (x0, y0, x1, y1) = self.cell_range(&bounds);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                self.cells.entry((cx, cy)).or_default().push(idx);
            }
        }
    }

    /// Static bodies overlapping `bounds`
    fn overlapping(&self, bounds: &Aabb) -> Vec<Aabb> {
        let (x0, y0, x1, y1) = self.cell_range(bounds);
        let mut hits: Vec<usize> = Vec::new();
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                if let Some(indices) = self.cells.get(&(cx, cy)) {
                    hits.extend(indices.iter().copied().filter(|&i| self.bodies[i].overlaps(bounds)));
                }
            }
        }
        hits.sort_unstable();
        hits.dedup();
        hits.into_iter().map(|i| self.bodies[i]).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    bounds: Option<Aabb>,
    groups: Vec<StaticGroup>,
    bodies: Vec<DynamicBody>,
    colliders: Vec<(BodyHandle, StaticGroupId)>,
}

impl Default for ArcadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeWorld {
    pub fn new() -> Self {
        Self {
            bounds: None,
            groups: Vec::new(),
            bodies: Vec::new(),
            colliders: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&DynamicBody> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut DynamicBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn static_bodies(&self, group: StaticGroupId) -> &[Aabb] {
        self.groups
            .get(group.0)
            .map(|g| g.bodies.as_slice())
            .unwrap_or_default()
    }

    /// Advance every dynamic body by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        puffin::profile_function!();

        for idx in 0..self.bodies.len() {
            let handle = BodyHandle(idx);
            let groups: Vec<StaticGroupId> = self
                .colliders
                .iter()
                .filter(|(body, _)| *body == handle)
                .map(|(_, group)| *group)
                .collect();

            let mut body = self.bodies[idx];
            body.blocked = Blocked::default();

            let substeps = self.substeps(&body, &groups, dt);
            let sub_dt = dt / substeps as f32;
            for _ in 0..substeps {
                body.position.x += body.velocity.x * sub_dt;
                for group in &groups {
                    self.resolve_static(&mut body, *group, Axis::X);
                }
                self.keep_in_world(&mut body);

                body.position.y += body.velocity.y * sub_dt;
                for group in &groups {
                    self.resolve_static(&mut body, *group, Axis::Y);
                }
                self.keep_in_world(&mut body);
            }

            self.bodies[idx] = body;
        }
    }

    /// Number of moves needed so no single move is longer than the body or a
    /// wall cell.
    fn substeps(&self, body: &DynamicBody, groups: &[StaticGroupId], dt: f32) -> u32 {
        if groups.is_empty() {
            return 1;
        }
        let max_step = groups
            .iter()
            .filter_map(|group| self.groups.get(group.0))
            .map(|group| group.cell_size)
            .fold(body.size.min_element(), f32::min);
        let travel = (body.velocity * dt).abs().max_element();
        if !(max_step > 0.0 && travel.is_finite()) {
            return 1;
        }
        (travel / max_step).ceil().max(1.0) as u32
    }

    fn resolve_static(&self, body: &mut DynamicBody, group: StaticGroupId, axis: Axis) {
        let Some(group) = self.groups.get(group.0) else {
            return;
        };

        for wall in group.overlapping(&body.bounds()) {
            let mut min = body.bounds().min;
            // The list was computed before earlier pushes in this loop
            if !body.bounds().overlaps(&wall) {
                continue;
            }
            match axis {
                Axis::X if body.velocity.x > 0.0 => {
                    min.x = wall.min.x - body.size.x;
                    body.blocked.right = true;
                    body.velocity.x = -body.velocity.x * body.bounce;
                }
                Axis::X if body.velocity.x < 0.0 => {
                    min.x = wall.max().x;
                    body.blocked.left = true;
                    body.velocity.x = -body.velocity.x * body.bounce;
                }
                Axis::Y if body.velocity.y > 0.0 => {
                    min.y = wall.min.y - body.size.y;
                    body.blocked.down = true;
                    body.velocity.y = -body.velocity.y * body.bounce;
                }
                Axis::Y if body.velocity.y < 0.0 => {
                    min.y = wall.max().y;
                    body.blocked.up = true;
                    body.velocity.y = -body.velocity.y * body.bounce;
                }
                _ => continue,
            }
            body.set_bounds_min(min);
        }
    }

    fn keep_in_world(&self, body: &mut DynamicBody) {
        if !body.collide_world_bounds {
            return;
        }
        if let Some(bounds) = self.bounds {
            Self::resolve_world_bounds(body, &bounds);
        }
    }

    fn resolve_world_bounds(body: &mut DynamicBody, bounds: &Aabb) {
        let aabb = body.bounds();
        let mut min = aabb.min;
        let limit = bounds.max() - body.size;

        if min.x < bounds.min.x {
            min.x = bounds.min.x;
            body.blocked.left = true;
            body.velocity.x = body.velocity.x.abs() * body.bounce;
        } else if min.x > limit.x {
            min.x = limit.x;
            body.blocked.right = true;
            body.velocity.x = -body.velocity.x.abs() * body.bounce;
        }

        if min.y < bounds.min.y {
            min.y = bounds.min.y;
            body.blocked.up = true;
            body.velocity.y = body.velocity.y.abs() * body.bounce;
        } else if min.y > limit.y {
            min.y = limit.y;
            body.blocked.down = true;
            body.velocity.y = -body.velocity.y.abs() * body.bounce;
        }

        if min != aabb.min {
            body.set_bounds_min(min);
        }
    }
}

impl PhysicsWorld for ArcadeWorld {
    fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = Some(bounds);
    }

    fn create_static_group(&mut self, cell_size: f32) -> StaticGroupId {
        self.groups.push(StaticGroup::new(cell_size));
        StaticGroupId(self.groups.len() - 1)
    }

    fn add_static_body(&mut self, group: StaticGroupId, bounds: Aabb) {
        if let Some(group) = self.groups.get_mut(group.0) {
            group.insert(bounds);
        }
    }

    fn add_dynamic_body(&mut self, body: DynamicBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    fn add_collider(&mut self, body: BodyHandle, group: StaticGroupId) {
        if !self.colliders.contains(&(body, group)) {
            self.colliders.push((body, group));
        }
    }
}
