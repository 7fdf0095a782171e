//! Cooldown shared by paint and erase strokes.
//!
//! Callers invoke strokes every frame while the brush is held; the governor lets one
//! stroke through per `action_rate` seconds regardless of the frame rate.

/// Single countdown timer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionGovernor {
    remaining: f32,
}

impl ActionGovernor {
    pub fn new() -> Self {
        Self { remaining: 0.0 }
    }

    /// Counts down by `elapsed` seconds and reports whether a stroke may fire.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        if elapsed.is_finite() {
            self.remaining -= elapsed.max(0.0);
        }
        self.remaining <= 0.0
    }

    /// Restarts the cooldown after a stroke.
    pub fn arm(&mut self, action_rate: f32) {
        self.remaining = action_rate;
    }

    /// Lets the next stroke fire immediately.
    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
