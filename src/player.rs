//! The player body and its jump state.

use crate::config::Config;

/// The player square. Positions are the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub size: f32,
    pub on_ground: bool,
    pub is_jumping: bool,
    pub jump_timer: u8,
}

impl Player {
    pub fn new(config: &Config) -> Self {
        Self {
            x: config.player_start_x,
            y: config.player_start_y,
            velocity_y: 0.0,
            size: config.player_size,
            on_ground: false,
            is_jumping: false,
            jump_timer: 0,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    pub fn right(&self) -> f32 {
        self.x + self.size
    }
}
