//! Scene creation and per-frame update.
//!
//! A [`Session`] owns everything one running scene needs: the ECS world,
//! physics, the drawing surface, the camera and the animation clips.

use glam::Vec2;
use hecs::{Entity, World};

use crate::animation::{AnimationLibrary, AnimationState, Animator};
use crate::binder::bind_grid;
use crate::camera::Camera;
use crate::components::{Body, Player, Speed, Sprite};
use crate::config::GameConfig;
use crate::constants::*;
use crate::dungeon_gen::{DungeonGenerator, DungeonResult, DungeonRng};
use crate::input::InputSource;
use crate::physics::{Aabb, ArcadeWorld, DynamicBody, PhysicsWorld};
use crate::surface::{RectPrimitive, Surface, SurfaceSink, TextLabel, TextSpace};
use crate::systems;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Open field, position clamped to the ground
    Arena,
    /// Generated dungeon with wall collision
    #[default]
    Dungeon,
}

pub struct Session {
    pub kind: SceneKind,
    pub world: World,
    pub physics: ArcadeWorld,
    pub surface: Surface,
    pub camera: Camera,
    pub animations: AnimationLibrary,
    pub player: Entity,
    pub dungeon: Option<DungeonResult>,
    /// Area the player is clamped to each frame, if any
    play_area: Option<Aabb>,
}

fn instruction_label(position: Vec2, space: TextSpace) -> TextLabel {
    TextLabel {
        text: INSTRUCTION_TEXT.to_string(),
        position,
        space,
        font_size: INSTRUCTION_FONT_SIZE,
        color: [1.0, 1.0, 1.0],
        background: Some([0.0, 0.0, 0.0]),
        padding: Vec2::new(10.0, 5.0),
    }
}

impl Session {
    pub fn create(kind: SceneKind, config: &GameConfig, rng: &mut impl DungeonRng, viewport: Vec2) -> Self {
        match kind {
            SceneKind::Arena => Self::create_arena(config, viewport),
            SceneKind::Dungeon => Self::create_dungeon(config, rng, viewport),
        }
    }

    pub fn create_arena(config: &GameConfig, viewport: Vec2) -> Self {
        let mut world = World::new();
        let mut physics = ArcadeWorld::new();
        let mut surface = Surface::new();
        let mut camera = Camera::new(viewport.x, viewport.y);

        let ground = Aabb::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT));
        surface.add_rect(RectPrimitive::new(ground.min, ground.size, ARENA_GROUND_COLOR));

        let start = ground.center();
        let player = spawn_player(&mut world, &mut physics, &mut surface, start, config.player_speed, false);

        surface.add_text(instruction_label(
            Vec2::new(ARENA_WIDTH / 2.0, INSTRUCTION_TEXT_Y),
            TextSpace::World,
        ));
        camera.scroll_to(Vec2::ZERO);

        log::info!("arena scene created, player at {start}");

        Self {
            kind: SceneKind::Arena,
            world,
            physics,
            surface,
            camera,
            animations: AnimationLibrary::player(),
            player,
            dungeon: None,
            play_area: Some(ground),
        }
    }

    pub fn create_dungeon(config: &GameConfig, rng: &mut impl DungeonRng, viewport: Vec2) -> Self {
        puffin::profile_function!();

        let mut world = World::new();
        let mut physics = ArcadeWorld::new();
        let mut surface = Surface::new();
        let mut camera = Camera::new(viewport.x, viewport.y);

        let dungeon = DungeonGenerator::new(config.grid_width, config.grid_height)
            .with_min_split(config.min_split)
            .generate(rng);
        let report = bind_grid(&dungeon.grid, config.tile_size, &mut surface, &mut physics);

        let extent = Vec2::new(
            config.grid_width as f32 * config.tile_size,
            config.grid_height as f32 * config.tile_size,
        );
        let world_bounds = Aabb::new(Vec2::ZERO, extent);
        physics.set_bounds(world_bounds);

        let spawn = dungeon.spawn_point(config.tile_size);
        let player = spawn_player(&mut world, &mut physics, &mut surface, spawn, config.player_speed, true);
        if let Ok(body) = world.get::<&Body>(player) {
            physics.add_collider(body.0, report.walls);
        }

        surface.add_text(instruction_label(Vec2::new(0.0, INSTRUCTION_TEXT_Y), TextSpace::Screen));

        camera.set_bounds(world_bounds);
        camera.set_zoom(config.dungeon_zoom);
        camera.set_tracking_target(spawn);
        camera.snap_to_target();

        log::info!(
            "dungeon scene created: {} rooms, {} wall bodies, player at {spawn}",
            dungeon.rooms.len(),
            report.wall_bodies
        );

        Self {
            kind: SceneKind::Dungeon,
            world,
            physics,
            surface,
            camera,
            animations: AnimationLibrary::player(),
            player,
            dungeon: Some(dungeon),
            play_area: None,
        }
    }

    /// Advance one frame: input, movement, physics, animation, camera.
    pub fn update(&mut self, dt: f32, input: &impl InputSource) {
        puffin::profile_function!();

        let keys = input.cursor_keys();
        systems::player_movement(&mut self.world, &mut self.physics, keys);
        self.physics.step(dt);
        if let Some(area) = self.play_area {
            systems::clamp_player_to(&mut self.world, &mut self.physics, area);
        }

        systems::update_animations(&mut self.world, &self.animations, dt);
        systems::sync_sprites(&self.world, &self.physics, &mut self.surface);

        if self.kind == SceneKind::Dungeon {
            if let Some(position) = self.player_position() {
                self.camera.set_tracking_target(position);
            }
        }
        self.camera.update(dt);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        if self.kind == SceneKind::Arena {
            self.camera.scroll_to(Vec2::ZERO);
        }
    }

    pub fn player_position(&self) -> Option<Vec2> {
        let body = self.world.get::<&Body>(self.player).ok()?;
        self.physics.body(body.0).map(|b| b.position)
    }

    pub fn player_animation(&self) -> Option<AnimationState> {
        self.world.get::<&Animator>(self.player).ok().map(|a| a.state)
    }
}

fn spawn_player(
    world: &mut World,
    physics: &mut ArcadeWorld,
    surface: &mut Surface,
    at: Vec2,
    speed: f32,
    collide_world_bounds: bool,
) -> Entity {
    let size = Vec2::splat(PLAYER_SIZE);
    let primitive = surface.add_rect(RectPrimitive::centered(at, size, PLAYER_COLOR));
    let body = physics.add_dynamic_body(
        DynamicBody::new(at, size)
            .with_offset(Vec2::ZERO)
            .with_bounce(0.0)
            .with_world_bounds_collision(collide_world_bounds),
    );

    world.spawn((
        Player,
        Body(body),
        Sprite::new(primitive),
        Speed(speed),
        Animator::new(AnimationState::Idle),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CursorKeys;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEWPORT: Vec2 = Vec2::new(1200.0, 900.0);
    const DT: f32 = 1.0 / 60.0;

    fn small_config() -> GameConfig {
        GameConfig {
            grid_width: 30,
            grid_height: 30,
            ..Default::default()
        }
    }

    fn held(left: bool, right: bool, up: bool, down: bool) -> CursorKeys {
        CursorKeys { up, down, left, right }
    }

    #[test]
    fn test_arena_layout() {
        let session = Session::create_arena(&GameConfig::default(), VIEWPORT);

        assert_eq!(session.player_position(), Some(Vec2::new(400.0, 300.0)));
        assert_eq!(session.surface.rects().len(), 2);
        assert_eq!(session.surface.rects()[0].size, Vec2::new(800.0, 600.0));
        assert_eq!(session.surface.labels()[0].text, INSTRUCTION_TEXT);
        assert_eq!(session.camera.visible_bounds().min, Vec2::ZERO);
        assert_eq!(session.player_animation(), Some(AnimationState::Idle));
    }

    #[test]
    fn test_arena_walk_and_idle() {
        let mut session = Session::create_arena(&GameConfig::default(), VIEWPORT);

        session.update(0.1, &held(true, false, false, false));
        assert_eq!(session.player_position(), Some(Vec2::new(385.0, 300.0)));
        assert_eq!(session.player_animation(), Some(AnimationState::Walk));

        session.update(0.1, &CursorKeys::default());
        assert_eq!(session.player_position(), Some(Vec2::new(385.0, 300.0)));
        assert_eq!(session.player_animation(), Some(AnimationState::Idle));
    }

    #[test]
    fn test_arena_clamps_player() {
        let mut session = Session::create_arena(&GameConfig::default(), VIEWPORT);

        for _ in 0..400 {
            session.update(0.05, &held(true, false, true, false));
        }
        assert_eq!(session.player_position(), Some(Vec2::new(15.0, 15.0)));

        for _ in 0..400 {
            session.update(0.05, &held(false, true, false, true));
        }
        assert_eq!(session.player_position(), Some(Vec2::new(785.0, 585.0)));
    }

    #[test]
    fn test_sprite_tracks_player() {
        let mut session = Session::create_arena(&GameConfig::default(), VIEWPORT);
        session.update(0.2, &held(false, false, false, true));

        let sprite = *session.world.get::<&Sprite>(session.player).unwrap();
        let rect = session.surface.rect(sprite.primitive).unwrap();
        assert_eq!(rect.center().x, 400.0);
        assert!((rect.center().y - 330.0).abs() <= 2.0);
    }

    #[test]
    fn test_dungeon_spawns_in_first_room() {
        let config = small_config();
        let session = Session::create_dungeon(&config, &mut StdRng::seed_from_u64(7), VIEWPORT);
        let dungeon = session.dungeon.as_ref().unwrap();

        let spawn = session.player_position().unwrap();
        assert_eq!(spawn, dungeon.spawn_point(config.tile_size));

        assert!(!dungeon.rooms.is_empty());
        let (tx, ty) = dungeon.spawn_tile;
        assert!(dungeon.rooms[0].contains(tx, ty));
        assert!(!dungeon.grid.is_wall(tx, ty));
        assert_eq!(session.surface.rects().len(), 30 * 30 + 1);
        assert_eq!(session.surface.labels()[0].space, TextSpace::Screen);
        assert_eq!(session.camera.zoom, CAMERA_DUNGEON_ZOOM);
    }

    /// Walk the player in every direction and check it never overlaps a wall
    /// or leaves the world.
    fn assert_walls_block(config: &GameConfig, seed: u64, dt: f32) {
        let mut session = Session::create_dungeon(config, &mut StdRng::seed_from_u64(seed), VIEWPORT);
        let walls: Vec<Aabb> = {
            let grid = &session.dungeon.as_ref().unwrap().grid;
            grid.iter()
                .filter(|(_, _, t)| t.is_wall())
                .map(|(x, y, _)| crate::binder::tile_bounds(x, y, config.tile_size))
                .collect()
        };

        let moves = [
            held(true, false, false, false),
            held(false, false, true, false),
            held(false, true, false, false),
            held(false, false, false, true),
            held(true, false, false, true),
        ];
        for keys in moves {
            for _ in 0..120 {
                session.update(dt, &keys);
                let body = session.physics.body(session.world.get::<&Body>(session.player).unwrap().0).unwrap();
                let bounds = body.bounds();
                assert!(walls.iter().all(|w| !w.overlaps(&bounds)), "player overlapped a wall at {}", body.position);
                let world = session.physics.bounds().unwrap();
                assert!(bounds.min.x >= world.min.x && bounds.max().x <= world.max().x);
                assert!(bounds.min.y >= world.min.y && bounds.max().y <= world.max().y);
            }
        }
    }

    #[test]
    fn test_dungeon_player_never_enters_walls() {
        assert_walls_block(&small_config(), 11, DT);
    }

    #[test]
    fn test_fast_player_never_crosses_walls() {
        // Several tiles per frame at the largest frame time
        let config = GameConfig {
            player_speed: 4000.0,
            ..small_config()
        };
        assert!(config.validate().is_ok());
        assert_walls_block(&config, 11, MAX_FRAME_DT);
    }

    #[test]
    fn test_roomless_dungeon_spawns_on_floor() {
        let config = GameConfig {
            grid_width: 7,
            grid_height: 7,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let mut session = Session::create_dungeon(&config, &mut StdRng::seed_from_u64(5), VIEWPORT);

        let dungeon = session.dungeon.as_ref().unwrap();
        assert!(dungeon.rooms.is_empty());
        let (tx, ty) = dungeon.spawn_tile;
        assert!(!dungeon.grid.is_wall(tx, ty));

        let start = session.player_position().unwrap();
        assert_eq!(start, Vec2::new(175.0, 175.0));
        for _ in 0..20 {
            session.update(DT, &held(true, false, false, false));
        }
        // Stops against the left wall of the one-tile pocket
        assert_eq!(session.player_position(), Some(Vec2::new(165.0, 175.0)));

        assert_walls_block(&config, 5, DT);
    }

    #[test]
    fn test_dungeon_camera_follows_player() {
        let config = GameConfig::default();
        let mut session = Session::create_dungeon(&config, &mut StdRng::seed_from_u64(3), VIEWPORT);

        for _ in 0..180 {
            session.update(DT, &held(false, true, false, false));
        }
        for _ in 0..240 {
            session.update(DT, &CursorKeys::default());
        }

        let player = session.player_position().unwrap();
        let visible = session.camera.visible_bounds();
        assert!(visible.min.x <= player.x && player.x <= visible.max().x);
        assert!(visible.min.y <= player.y && player.y <= visible.max().y);
    }

    #[test]
    fn test_create_dispatches_on_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        let arena = Session::create(SceneKind::Arena, &small_config(), &mut rng, VIEWPORT);
        assert!(arena.dungeon.is_none());
        let dungeon = Session::create(SceneKind::Dungeon, &small_config(), &mut rng, VIEWPORT);
        assert!(dungeon.dungeon.is_some());
    }
}
