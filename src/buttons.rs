//! The buttons the jumper reads: D-pad left/right and A.
//!
//! The badge has no analog stick, so left/right are reported as a
//! full-deflection axis.

use esp_hal::gpio::{
    Input,
    InputConfig,
};

use crate::{
    ButtonResources,
    input::{
        Controller,
        ControllerState,
    },
};

/// Buttons used by the game, active low.
pub struct Buttons {
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub a: Input<'static>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(esp_hal::gpio::Pull::Up);
        Self {
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            a: Input::new(res.a, pull_up),
        }
    }
}

impl Controller for Buttons {
    fn poll(&mut self) -> ControllerState {
        ControllerState::from_buttons(self.left.is_low(), self.right.is_low(), self.a.is_low())
    }
}
