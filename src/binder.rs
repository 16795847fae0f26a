//! Turns a finished grid into drawable rectangles and wall collision boxes.

use glam::Vec2;

use crate::grid::Grid;
use crate::physics::{Aabb, PhysicsWorld, StaticGroupId};
use crate::surface::{RectPrimitive, SurfaceSink};

/// Summary of one bind pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindReport {
    pub tiles: usize,
    pub wall_bodies: usize,
    /// Static group holding one body per wall tile
    pub walls: StaticGroupId,
}

/// Screen-space footprint of the tile at `(x, y)`.
pub fn tile_bounds(x: i32, y: i32, tile_size: f32) -> Aabb {
    Aabb::new(
        Vec2::new(x as f32 * tile_size, y as f32 * tile_size),
        Vec2::splat(tile_size),
    )
}

/// Emit one rectangle per tile and one static body per wall tile.
///
/// Both are built from the same footprint, so what is drawn is exactly what
/// blocks movement.
pub fn bind_grid(
    grid: &Grid,
    tile_size: f32,
    surface: &mut impl SurfaceSink,
    physics: &mut impl PhysicsWorld,
) -> BindReport {
    puffin::profile_function!();

    let walls = physics.create_static_group(tile_size);
    let mut report = BindReport {
        tiles: 0,
        wall_bodies: 0,
        walls,
    };

    for (x, y, tile) in grid.iter() {
        let bounds = tile_bounds(x, y, tile_size);
        surface.add_rect(RectPrimitive::new(bounds.min, bounds.size, tile.tile_type.color()));
        report.tiles += 1;

        if tile.is_wall() {
            physics.add_static_body(walls, bounds);
            report.wall_bodies += 1;
        }
    }

    log::debug!(
        "bound {} tiles, {} wall bodies at tile size {}",
        report.tiles,
        report.wall_bodies,
        tile_size
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon_gen::DungeonGenerator;
    use crate::physics::{ArcadeWorld, BodyHandle, DynamicBody};
    use crate::surface::Surface;
    use crate::tile::TileType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Records calls in order instead of simulating anything
    #[derive(Default)]
    struct RecordingPhysics {
        groups: usize,
        statics: Vec<(StaticGroupId, Aabb)>,
    }

    impl PhysicsWorld for RecordingPhysics {
        fn set_bounds(&mut self, _bounds: Aabb) {}

        fn create_static_group(&mut self, _cell_size: f32) -> StaticGroupId {
            self.groups += 1;
            StaticGroupId(self.groups - 1)
        }

        fn add_static_body(&mut self, group: StaticGroupId, bounds: Aabb) {
            self.statics.push((group, bounds));
        }

        fn add_dynamic_body(&mut self, _body: DynamicBody) -> BodyHandle {
            BodyHandle(0)
        }

        fn add_collider(&mut self, _body: BodyHandle, _group: StaticGroupId) {}
    }

    #[test]
    fn test_tile_bounds_projection() {
        let bounds = tile_bounds(3, 7, 50.0);
        assert_eq!(bounds.min, Vec2::new(150.0, 350.0));
        assert_eq!(bounds.size, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_every_tile_emits_one_rect() {
        let mut grid = Grid::new(4, 3);
        grid.set_floor(1, 1);
        grid.set_floor(2, 1);

        let mut surface = Surface::new();
        let mut physics = RecordingPhysics::default();
        let report = bind_grid(&grid, 50.0, &mut surface, &mut physics);

        assert_eq!(report.tiles, 12);
        assert_eq!(report.wall_bodies, 10);
        assert_eq!(surface.rects().len(), 12);
        assert_eq!(physics.statics.len(), 10);
        assert_eq!(physics.groups, 1);

        let floor_color = TileType::Floor.color();
        assert_eq!(surface.rects().iter().filter(|r| r.color == floor_color).count(), 2);
    }

    #[test]
    fn test_wall_collision_matches_visual() {
        let grid = DungeonGenerator::new(30, 30).generate(&mut StdRng::seed_from_u64(99)).grid;

        let mut surface = Surface::new();
        let mut physics = RecordingPhysics::default();
        bind_grid(&grid, 50.0, &mut surface, &mut physics);

        let wall_rects: Vec<&RectPrimitive> = grid
            .iter()
            .zip(surface.rects())
            .filter(|((_, _, tile), _)| tile.is_wall())
            .map(|(_, rect)| rect)
            .collect();

        assert_eq!(wall_rects.len(), physics.statics.len());
        for (rect, (_, body)) in wall_rects.iter().zip(&physics.statics) {
            assert_eq!(rect.position, body.min);
            assert_eq!(rect.size, body.size);
        }
    }

    #[test]
    fn test_bodies_land_in_arcade_world() {
        let mut grid = Grid::new(3, 3);
        grid.set_floor(1, 1);

        let mut surface = Surface::new();
        let mut physics = ArcadeWorld::new();
        let report = bind_grid(&grid, 20.0, &mut surface, &mut physics);

        let bodies = physics.static_bodies(report.walls);
        assert_eq!(bodies.len(), 8);
        assert!(!bodies.contains(&tile_bounds(1, 1, 20.0)));
        assert!(bodies.contains(&tile_bounds(2, 2, 20.0)));
    }
}
