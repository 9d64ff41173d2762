//! Keyboard input
//!
//! Key-down/key-up events become intents; intents accumulate into an
//! [`InputState`] that yields one [`TickInput`] per frame.

use crate::sim::TickInput;

/// Discrete player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
    /// Start from the menu, or launch/shoot in play
    Action,
    PauseToggle,
}

impl Intent {
    /// Map a DOM-style key name and press state to an intent
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        match (key, pressed) {
            ("ArrowLeft", true) => Some(Intent::MoveLeftStart),
            ("ArrowLeft", false) => Some(Intent::MoveLeftStop),
            ("ArrowRight", true) => Some(Intent::MoveRightStart),
            ("ArrowRight", false) => Some(Intent::MoveRightStop),
            (" " | "Space", true) => Some(Intent::Action),
            ("Escape", true) => Some(Intent::PauseToggle),
            _ => None,
        }
    }
}

/// Held direction plus one-shot presses since the last frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// -1 left, 0 still, 1 right; the last pressed direction wins
    direction: i8,
    action: bool,
    pause: bool,
}

impl InputState {
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeftStart => self.direction = -1,
            Intent::MoveRightStart => self.direction = 1,
            // Releasing a key only stops the paddle if it is moving that way
            Intent::MoveLeftStop => {
                if self.direction < 0 {
                    self.direction = 0;
                }
            }
            Intent::MoveRightStop => {
                if self.direction > 0 {
                    self.direction = 0;
                }
            }
            Intent::Action => self.action = true,
            Intent::PauseToggle => self.pause = !self.pause,
        }
    }

    /// Input for the coming frame; clears one-shot presses
    pub fn take_frame(&mut self) -> TickInput {
        let input = TickInput {
            direction: f32::from(self.direction),
            action: self.action,
            pause: self.pause,
        };
        self.action = false;
        self.pause = false;
        input
    }
}
