//! Runtime configuration, optionally loaded from a JSON file.
//!
//! Every field falls back to the compile-time default in `crate::constants`,
//! so a config file only needs the values it overrides.

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::GameError;
use crate::scene::SceneKind;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scene started when none is given on the command line
    pub scene: SceneKind,
    pub grid_width: usize,
    pub grid_height: usize,
    pub tile_size: f32,
    /// Player speed in units per second
    pub player_speed: f32,
    /// Areas narrower or shorter than this are not subdivided
    pub min_split: i32,
    pub dungeon_zoom: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Dungeon,
            grid_width: DUNGEON_DEFAULT_WIDTH,
            grid_height: DUNGEON_DEFAULT_HEIGHT,
            tile_size: TILE_SIZE,
            player_speed: PLAYER_SPEED,
            min_split: DUNGEON_MIN_SPLIT,
            dungeon_zoom: CAMERA_DUNGEON_ZOOM,
            window_width: WINDOW_DEFAULT_WIDTH,
            window_height: WINDOW_DEFAULT_HEIGHT,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "player_speed must be finite and non-negative, got {}",
                self.player_speed
            )));
        }
        if self.min_split < 1 {
            return Err(GameError::InvalidConfig(format!(
                "min_split must be at least 1, got {}",
                self.min_split
            )));
        }
        if !(self.dungeon_zoom.is_finite() && self.dungeon_zoom > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "dungeon_zoom must be positive, got {}",
                self.dungeon_zoom
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(GameError::InvalidConfig("window size must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_width, 100);
        assert_eq!(config.tile_size, 50.0);
        assert_eq!(config.player_speed, 150.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "scene": "arena", "grid_width": 40, "player_speed": 200.0 }"#).unwrap();
        assert_eq!(config.scene, SceneKind::Arena);
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.player_speed, 200.0);
        assert_eq!(config.grid_height, DUNGEON_DEFAULT_HEIGHT);
        assert_eq!(config.min_split, DUNGEON_MIN_SPLIT);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            GameConfig {
                grid_width: 0,
                ..Default::default()
            },
            GameConfig {
                tile_size: -1.0,
                ..Default::default()
            },
            GameConfig {
                player_speed: f32::NAN,
                ..Default::default()
            },
            GameConfig {
                min_split: 0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))), "{config:?}");
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/walker.json")).unwrap_err();
        assert!(matches!(err, GameError::ConfigIo { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("walker-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "tile_size": 32.0 }"#).unwrap();
        let config = GameConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config.unwrap().tile_size, 32.0);
    }

    #[test]
    fn test_unparseable_file() {
        let path = std::env::temp_dir().join(format!("walker-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = GameConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, GameError::ConfigParse { .. }));
    }
}
