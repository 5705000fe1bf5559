//! Platform-agnostic input state
//!
//! The host translates its window-system events into [`Key`]s and feeds them
//! through [`Input::inject_key`]; actors and controllers only ever query.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Keyboard key enumeration (platform-agnostic)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Number keys
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Control keys
    Space,
    Enter,
    Escape,
    Tab,
    ShiftLeft,
    ControlLeft,
    AltLeft,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Keyboard state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed_keys: FxHashSet<Key>,
    just_pressed_keys: FxHashSet<Key>,
    just_released_keys: FxHashSet<Key>,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Host API ==========

    /// Clears the per-frame edge sets. Held keys stay held.
    pub fn start_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.just_released_keys.clear();
    }

    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.pressed_keys.insert(key) {
                    self.just_pressed_keys.insert(key);
                }
            }
            ButtonState::Released => {
                if self.pressed_keys.remove(&key) {
                    self.just_released_keys.insert(key);
                }
            }
        }
    }

    pub fn press(&mut self, key: Key) {
        self.inject_key(key, ButtonState::Pressed);
    }

    pub fn release(&mut self, key: Key) {
        self.inject_key(key, ButtonState::Released);
    }

    // ========== Query API ==========

    /// Raw level query: is the key held right now?
    #[must_use]
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn get_key_down(&self, key: Key) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn get_key_up(&self, key: Key) -> bool {
        self.just_released_keys.contains(&key)
    }
}
