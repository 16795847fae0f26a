//! Keyboard state tracking.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// Current state of the four arrow keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Capability to poll directional input once per frame.
pub trait InputSource {
    fn cursor_keys(&self) -> CursorKeys;
}

impl InputSource for CursorKeys {
    fn cursor_keys(&self) -> CursorKeys {
        *self
    }
}

/// Keys currently held down, fed from window events
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Forget held keys, e.g. when the window loses focus and releases go unseen
    pub fn clear(&mut self) {
        self.keys_down.clear();
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }
}

impl InputSource for InputState {
    fn cursor_keys(&self) -> CursorKeys {
        CursorKeys {
            up: self.is_down(KeyCode::ArrowUp),
            down: self.is_down(KeyCode::ArrowDown),
            left: self.is_down(KeyCode::ArrowLeft),
            right: self.is_down(KeyCode::ArrowRight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_cursor_keys() {
        let mut input = InputState::new();
        input.press(KeyCode::ArrowLeft);
        input.press(KeyCode::ArrowDown);
        input.press(KeyCode::KeyW);

        assert_eq!(
            input.cursor_keys(),
            CursorKeys {
                up: false,
                down: true,
                left: true,
                right: false,
            }
        );

        input.release(KeyCode::ArrowLeft);
        assert!(!input.cursor_keys().left);

        input.clear();
        assert_eq!(input.cursor_keys(), CursorKeys::default());
    }
}
