//! Camera-related constants.

/// Default zoom level (screen pixels per world unit)
pub const CAMERA_DEFAULT_ZOOM: f32 = 1.0;
/// Zoom used while following the player through the dungeon
pub const CAMERA_DUNGEON_ZOOM: f32 = 1.5;
/// Minimum zoom level
pub const CAMERA_MIN_ZOOM: f32 = 0.25;
/// Maximum zoom level
pub const CAMERA_MAX_ZOOM: f32 = 4.0;
/// Smoothing factor for camera tracking (lower = snappier)
pub const CAMERA_TRACKING_SMOOTHING: f32 = 0.85;
