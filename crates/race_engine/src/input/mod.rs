//! Input management system

use std::collections::HashSet;

/// Input manager
///
/// Tracks which keys are currently held. The host feeds key transitions in and
/// the game polls held state once per frame.
pub struct InputManager {
    held_keys: HashSet<KeyCode>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            held_keys: HashSet::new(),
        }
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
    }

    /// Whether a key is currently held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Whether any of the given keys is held
    pub fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.is_held(*key))
    }

    /// Release every key
    pub fn release_all(&mut self) {
        self.held_keys.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Space key
    Space,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::W, true);
        input.handle_key_input(KeyCode::Space, true);
        assert!(input.is_held(KeyCode::W));
        assert!(input.any_held(&[KeyCode::S, KeyCode::Space]));

        input.handle_key_input(KeyCode::W, false);
        assert!(!input.is_held(KeyCode::W));

        input.release_all();
        assert!(!input.is_held(KeyCode::Space));
    }
}
