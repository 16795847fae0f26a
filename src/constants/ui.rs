//! UI and window constants.

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 900;
/// Window title
pub const WINDOW_TITLE: &str = "Dungeon Walker";
/// Clear color behind every scene (#1a1a2e)
pub const BACKGROUND_COLOR: [f32; 3] = [26.0 / 255.0, 26.0 / 255.0, 46.0 / 255.0];
