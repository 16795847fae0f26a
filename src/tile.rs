use crate::constants::{FLOOR_COLOR, WALL_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Wall,
    Floor,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor)
    }

    /// Fill color used when the tile is drawn as a flat rectangle
    pub fn color(&self) -> [f32; 3] {
        match self {
            TileType::Wall => WALL_COLOR,
            TileType::Floor => FLOOR_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub tile_type: TileType,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self { tile_type }
    }

    pub fn is_wall(&self) -> bool {
        self.tile_type == TileType::Wall
    }

    /// Clear the wall flag. Returns true if the tile was a wall before.
    pub fn carve(&mut self) -> bool {
        let was_wall = self.is_wall();
        self.tile_type = TileType::Floor;
        was_wall
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Wall)
    }
}
