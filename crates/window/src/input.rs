use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Keyboard state accumulated from window events.
///
/// Feed `handle_key` from the event loop and call `end_frame` once per
/// rendered frame to retire the just-pressed set.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Repeats while held do not re-fire
    /// `just_pressed`.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held.insert(key) {
                self.just_pressed.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Whether the key is currently held down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether the key went down since the last `end_frame`.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Retire per-frame state.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}
