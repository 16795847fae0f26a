//! Dungeon generation constants.

/// Side length of one tile in screen units
pub const TILE_SIZE: f32 = 50.0;
/// Default dungeon width in tiles
pub const DUNGEON_DEFAULT_WIDTH: usize = 100;
/// Default dungeon height in tiles
pub const DUNGEON_DEFAULT_HEIGHT: usize = 100;
/// Areas narrower or shorter than this are not subdivided further
pub const DUNGEON_MIN_SPLIT: i32 = 8;
/// Smallest split offset from the area's leading edge
pub const DUNGEON_MIN_DIVIDE: i32 = 3;
/// The split offset stays at least this far from the trailing edge
pub const DUNGEON_DIVIDE_MARGIN: i32 = 4;
/// Smallest room side
pub const DUNGEON_MIN_ROOM_SIZE: i32 = 3;
/// Largest room side
pub const DUNGEON_MAX_ROOM_SIZE: i32 = 8;
/// Room origin offsets range over `[0, side - ROOM_OFFSET_MARGIN]`
pub const DUNGEON_ROOM_OFFSET_MARGIN: i32 = 5;
