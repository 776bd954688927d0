//! Controller snapshot consumed once per tick.

/// Full deflection of the horizontal axis.
pub const AXIS_MAX: i8 = 127;

/// Raw controller input captured at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    /// Horizontal stick, negative is left, on a ±127 scale.
    pub axis_x: i8,
    /// Jump button held.
    pub jump: bool,
}

impl ControllerState {
    pub const IDLE: ControllerState = ControllerState {
        axis_x: 0,
        jump: false,
    };

    /// Map digital left/right buttons onto a full-deflection axis.
    /// Pressing both cancels out.
    pub fn from_buttons(left: bool, right: bool, jump: bool) -> Self {
        let axis_x = match (left, right) {
            (true, false) => -AXIS_MAX,
            (false, true) => AXIS_MAX,
            _ => 0,
        };
        Self { axis_x, jump }
    }

    /// Horizontal direction once the dead zone is applied: -1, 0 or 1.
    pub fn direction(&self, dead_zone: i8) -> i8 {
        if self.axis_x < -dead_zone {
            -1
        } else if self.axis_x > dead_zone {
            1
        } else {
            0
        }
    }
}

/// Source of controller input polled by the game loop.
pub trait Controller {
    fn poll(&mut self) -> ControllerState;
}
