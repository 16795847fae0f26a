use crate::tile::{Tile, TileType};

/// Fixed-size tile map, stored row-major (`y * width + x`).
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Grid {
    /// Create a grid where every tile is a wall.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(TileType::Wall); width * height],
        }
    }

    fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.get_index(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.get_index(x, y).map(|idx| &self.tiles[idx])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.get_index(x, y).map(move |idx| &mut self.tiles[idx])
    }

    /// Out-of-bounds coordinates read as walls.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, Tile::is_wall)
    }

    /// Turn the tile at `(x, y)` into floor. Returns false when the tile is
    /// out of bounds or already floor.
    pub fn set_floor(&mut self, x: i32, y: i32) -> bool {
        self.get_mut(x, y).map_or(false, Tile::carve)
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_wall()).count()
    }

    /// Iterate every tile with its grid coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(idx, tile)| ((idx % width) as i32, (idx / width) as i32, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_walls() {
        let grid = Grid::new(7, 5);
        assert_eq!(grid.tiles.len(), 35);
        assert!(grid.tiles.iter().all(Tile::is_wall));
        assert_eq!(grid.floor_count(), 0);
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let grid = Grid::new(4, 4);
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(0, -1).is_none());
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 4).is_none());
        assert!(grid.get(3, 3).is_some());
    }

    #[test]
    fn test_set_floor() {
        let mut grid = Grid::new(4, 4);
        assert!(grid.set_floor(1, 2));
        assert!(!grid.is_wall(1, 2));
        // Second carve reports no change
        assert!(!grid.set_floor(1, 2));
        assert_eq!(grid.floor_count(), 1);
        assert_eq!(grid.tiles[2 * 4 + 1].tile_type, TileType::Floor);
    }

    #[test]
    fn test_set_floor_out_of_bounds_is_noop() {
        let mut grid = Grid::new(4, 4);
        assert!(!grid.set_floor(-1, 2));
        assert!(!grid.set_floor(4, 0));
        assert_eq!(grid.floor_count(), 0);
        assert!(grid.is_wall(-1, 2));
    }

    #[test]
    fn test_iter_coordinates() {
        let grid = Grid::new(3, 2);
        let coords: Vec<(i32, i32)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
