use bevy::prelude::*;

use super::controller::ControlInput;

/// Input intent: written in Update, consumed in FixedUpdate.
///
/// Held keys are overwritten every frame. Action presses are latched until
/// the next fixed step consumes them, so a press is never lost or repeated
/// when frame and step rates differ.
#[derive(Component, Default)]
pub struct Intent {
    pub controls: ControlInput,
}

impl Intent {
    pub fn set_held(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.controls.up = up;
        self.controls.down = down;
        self.controls.left = left;
        self.controls.right = right;
    }

    pub fn press_strike(&mut self) {
        self.controls.strike = true;
    }

    pub fn press_backstep(&mut self) {
        self.controls.backstep = true;
    }

    /// Snapshot for one step; clears the latched presses.
    pub fn consume(&mut self) -> ControlInput {
        let controls = self.controls;
        self.controls.strike = false;
        self.controls.backstep = false;
        controls
    }
}
