//! Recursive-bisection dungeon generator.
//!
//! The whole map starts as wall. Each subdivision step picks a split offset,
//! carves a room into the leading sub-area, carves a straight corridor along
//! the split line and recurses into both halves with the opposite
//! orientation. Afterwards consecutive rooms are stitched together with
//! L-shaped corridors.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, RngCore};

use crate::constants::*;
use crate::grid::Grid;

/// A rectangle representing a room or a region being subdivided
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Intersect with `[0, width) × [0, height)`. `None` if nothing is left.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Rect> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + self.width).min(width as i32);
        let y1 = (self.y + self.height).min(height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Source of the random choices made while carving.
///
/// Blanket-implemented for every `rand` generator, so production code passes
/// `thread_rng()` or a seeded `StdRng`, and tests can script exact values.
pub trait DungeonRng {
    /// Uniform integer in `[low, high]`, or `None` when `high < low`.
    fn range_inclusive(&mut self, low: i32, high: i32) -> Option<i32>;
}

impl<R: RngCore> DungeonRng for R {
    fn range_inclusive(&mut self, low: i32, high: i32) -> Option<i32> {
        if high < low {
            return None;
        }
        Some(self.gen_range(low..=high))
    }
}

/// Rooms in carve order, unique by exact rectangle.
#[derive(Debug, Default, Clone)]
pub struct RoomRegistry {
    rooms: Vec<Rect>,
    seen: HashSet<Rect>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a room. Returns false if an identical rectangle is already present.
    pub fn record(&mut self, room: Rect) -> bool {
        if !self.seen.insert(room) {
            return false;
        }
        self.rooms.push(room);
        true
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn first(&self) -> Option<&Rect> {
        self.rooms.first()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn into_rooms(self) -> Vec<Rect> {
        self.rooms
    }
}

/// Remove repeated rectangles, keeping the first occurrence of each.
pub fn deduplicate(rooms: &[Rect]) -> Vec<Rect> {
    let mut registry = RoomRegistry::new();
    for room in rooms {
        registry.record(*room);
    }
    registry.into_rooms()
}

/// Carve a horizontal run of floor on row `y`, inclusive of both ends.
/// Returns the number of tiles that changed from wall to floor.
pub fn carve_h_corridor(grid: &mut Grid, x1: i32, x2: i32, y: i32) -> usize {
    if y < 0 || y >= grid.height as i32 {
        return 0;
    }
    let start = x1.min(x2).max(0);
    let end = x1.max(x2).min(grid.width as i32 - 1);

    (start..=end).filter(|&x| grid.set_floor(x, y)).count()
}

/// Carve a vertical run of floor on column `x`, inclusive of both ends.
pub fn carve_v_corridor(grid: &mut Grid, y1: i32, y2: i32, x: i32) -> usize {
    if x < 0 || x >= grid.width as i32 {
        return 0;
    }
    let start = y1.min(y2).max(0);
    let end = y1.max(y2).min(grid.height as i32 - 1);

    (start..=end).filter(|&y| grid.set_floor(x, y)).count()
}

/// Carve a randomly sized and placed room inside `area`.
///
/// The room may spill past `area` but never past the grid; the returned
/// rectangle is the part that was actually carved. Areas too small to hold a
/// room yield `None` without consuming any randomness.
pub fn carve_room(grid: &mut Grid, rng: &mut impl DungeonRng, area: Rect) -> Option<Rect> {
    let max_width = (area.width - 1).min(DUNGEON_MAX_ROOM_SIZE);
    let max_height = (area.height - 1).min(DUNGEON_MAX_ROOM_SIZE);
    if max_width < DUNGEON_MIN_ROOM_SIZE || max_height < DUNGEON_MIN_ROOM_SIZE {
        return None;
    }

    let offset_x = rng.range_inclusive(0, (area.width - DUNGEON_ROOM_OFFSET_MARGIN).max(1))?;
    let offset_y = rng.range_inclusive(0, (area.height - DUNGEON_ROOM_OFFSET_MARGIN).max(1))?;
    let room_width = rng.range_inclusive(DUNGEON_MIN_ROOM_SIZE, max_width)?;
    let room_height = rng.range_inclusive(DUNGEON_MIN_ROOM_SIZE, max_height)?;

    let room = Rect::new(area.x + offset_x, area.y + offset_y, room_width, room_height)
        .clamp_to(grid.width, grid.height)?;

    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            grid.set_floor(x, y);
        }
    }

    Some(room)
}

/// Recursively subdivide `area`, carving rooms and split-line corridors.
///
/// Areas narrower or shorter than `min_split` are left alone, as are areas
/// whose split-offset range would be empty.
pub fn carve(
    grid: &mut Grid,
    rng: &mut impl DungeonRng,
    area: Rect,
    split_horizontally: bool,
    min_split: i32,
    registry: &mut RoomRegistry,
) {
    if area.width < min_split || area.height < min_split {
        return;
    }

    if split_horizontally {
        let Some(divide) =
            rng.range_inclusive(DUNGEON_MIN_DIVIDE, area.height - DUNGEON_DIVIDE_MARGIN)
        else {
            return;
        };

        let top = Rect::new(area.x, area.y, area.width, divide);
        let bottom = Rect::new(area.x, area.y + divide + 1, area.width, area.height - divide - 1);

        if let Some(room) = carve_room(grid, rng, top) {
            registry.record(room);
        }
        carve_h_corridor(grid, area.x, area.x + area.width - 1, area.y + divide);

        carve(grid, rng, top, false, min_split, registry);
        carve(grid, rng, bottom, false, min_split, registry);
    } else {
        let Some(divide) =
            rng.range_inclusive(DUNGEON_MIN_DIVIDE, area.width - DUNGEON_DIVIDE_MARGIN)
        else {
            return;
        };

        let left = Rect::new(area.x, area.y, divide, area.height);
        let right = Rect::new(area.x + divide + 1, area.y, area.width - divide - 1, area.height);

        if let Some(room) = carve_room(grid, rng, left) {
            registry.record(room);
        }
        carve_v_corridor(grid, area.y, area.y + area.height - 1, area.x + divide);

        carve(grid, rng, left, true, min_split, registry);
        carve(grid, rng, right, true, min_split, registry);
    }
}

/// Tiles of the L-shaped path from `from`'s center to `to`'s center:
/// along `from`'s center row, then along `to`'s center column.
pub fn l_path(from: &Rect, to: &Rect) -> Vec<(i32, i32)> {
    let (x1, y1) = from.center();
    let (x2, y2) = to.center();

    let horizontal = (x1.min(x2)..=x1.max(x2)).map(move |x| (x, y1));
    let vertical = (y1.min(y2)..=y1.max(y2)).map(move |y| (x2, y));
    horizontal.chain(vertical).collect()
}

/// Link each room to the next one in registry order with an L-shaped corridor.
///
/// The path runs along the first room's center row and bends at `(x2, y1)`
/// onto the second room's center column, so it joins both centers.
/// Returns the number of tiles that changed from wall to floor.
pub fn connect(grid: &mut Grid, rooms: &[Rect]) -> usize {
    rooms
        .windows(2)
        .map(|pair| {
            let (x1, y1) = pair[0].center();
            let (x2, y2) = pair[1].center();
            carve_h_corridor(grid, x1, x2, y1) + carve_v_corridor(grid, y1, y2, x2)
        })
        .sum()
}

/// Result of dungeon generation
#[derive(Debug, Clone)]
pub struct DungeonResult {
    pub grid: Grid,
    /// Deduplicated rooms in carve order
    pub rooms: Vec<Rect>,
    /// Tile the player starts on: the first room's center, or the carved
    /// grid center when no room fit
    pub spawn_tile: (i32, i32),
}

impl DungeonResult {
    /// Screen-space spawn position (center of the spawn tile).
    pub fn spawn_point(&self, tile_size: f32) -> Vec2 {
        let (x, y) = self.spawn_tile;
        Vec2::new(
            x as f32 * tile_size + tile_size / 2.0,
            y as f32 * tile_size + tile_size / 2.0,
        )
    }

    /// Floor tiles that lie outside every room.
    pub fn corridor_tile_count(&self) -> usize {
        self.grid
            .iter()
            .filter(|(x, y, tile)| !tile.is_wall() && !self.rooms.iter().any(|r| r.contains(*x, *y)))
            .count()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DungeonGenerator {
    pub width: usize,
    pub height: usize,
    pub min_split: i32,
}

impl DungeonGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            min_split: DUNGEON_MIN_SPLIT,
        }
    }

    pub fn with_min_split(mut self, min_split: i32) -> Self {
        self.min_split = min_split;
        self
    }

    /// Generate a dungeon, drawing every random choice from `rng`.
    pub fn generate(&self, rng: &mut impl DungeonRng) -> DungeonResult {
        let mut grid = Grid::new(self.width, self.height);
        let mut registry = RoomRegistry::new();

        let root = Rect::new(0, 0, self.width as i32, self.height as i32);
        carve(&mut grid, rng, root, true, self.min_split, &mut registry);

        let rooms = registry.into_rooms();
        let connected = connect(&mut grid, &rooms);

        let spawn_tile = match rooms.first() {
            Some(room) => room.center(),
            None => {
                // Without rooms the fallback tile is still a wall
                let center = (self.width as i32 / 2, self.height as i32 / 2);
                grid.set_floor(center.0, center.1);
                center
            }
        };

        log::debug!(
            "generated {}x{} dungeon: {} rooms, {} floor tiles ({} from connectors), spawn at {:?}",
            self.width,
            self.height,
            rooms.len(),
            grid.floor_count(),
            connected,
            spawn_tile
        );

        DungeonResult {
            grid,
            rooms,
            spawn_tile,
        }
    }
}
