//! Tuning constants and screen geometry.

use embedded_graphics::pixelcolor::{
    Rgb565,
    Rgb888,
};

/// Every constant the game loop, spawner and overlay read.
///
/// All geometry is in play-field units with y growing downwards; one unit is
/// one display pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    // ── Play field ──────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Player ──────────────────────────────────────────────────────────────
    pub player_size: f32,
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub move_speed: f32,
    /// Stick deflection (on a ±127 axis) that must be exceeded to move.
    pub dead_zone: i8,

    // ── Vertical motion ─────────────────────────────────────────────────────
    pub gravity: f32,
    pub jump_force: f32,
    /// Ticks the jump force keeps being re-applied while the button is held.
    pub max_jump_ticks: u8,
    /// Terminal falling speed. Kept at or below `platform_thickness` so a
    /// falling player cannot step over a surface band in one tick.
    pub max_fall_speed: f32,
    /// Slack granted to a grounded player whose feet drifted below a surface.
    pub rest_tolerance: f32,

    // ── Platforms ───────────────────────────────────────────────────────────
    pub platform_width: f32,
    pub platform_thickness: f32,
    /// Non-solid platforms the spawner keeps alive.
    pub target_platforms: usize,
    pub start_platforms: usize,
    pub start_platform_y: f32,
    pub start_platform_spacing: f32,
    pub spawn_gap_min: u32,
    /// Gaps are drawn from `spawn_gap_min..spawn_gap_min + spawn_gap_span`.
    pub spawn_gap_span: u32,
    /// Spawn height used when the registry holds no platform at all.
    pub default_spawn_y: f32,

    // ── Scrolling ───────────────────────────────────────────────────────────
    pub scroll_threshold: f32,

    // ── Timing ──────────────────────────────────────────────────────────────
    pub tick_ms: u64,

    // ── Trivia overlay ──────────────────────────────────────────────────────
    pub trivia_min_delay_ms: u32,
    pub trivia_jitter_ms: u32,
    pub trivia_show_ms: u32,
    /// Time each wrapped line stays at the top before the text scrolls on.
    pub trivia_line_ms: u32,
    pub panel_x: i32,
    pub panel_width: u32,
    pub panel_height: u32,

    // ── Display ─────────────────────────────────────────────────────────────
    pub display_width: u32,
    pub display_height: u32,
}

impl Config {
    /// Reference tuning: a 260×240 play field with the panel to its right.
    pub const DEFAULT: Config = Config {
        screen_width: 260.0,
        screen_height: 240.0,

        player_size: 20.0,
        player_start_x: 100.0,
        player_start_y: 120.0,
        move_speed: 3.0,
        dead_zone: 10,

        gravity: 0.5,
        jump_force: -5.0,
        max_jump_ticks: 15,
        max_fall_speed: 10.0,
        rest_tolerance: 0.01,

        platform_width: 60.0,
        platform_thickness: 10.0,
        target_platforms: 7,
        start_platforms: 6,
        start_platform_y: 200.0,
        start_platform_spacing: 40.0,
        spawn_gap_min: 30,
        spawn_gap_span: 20,
        default_spawn_y: 200.0,

        scroll_threshold: 80.0,

        tick_ms: 20,

        trivia_min_delay_ms: 5000,
        trivia_jitter_ms: 3000,
        trivia_show_ms: 10_000,
        trivia_line_ms: 800,
        panel_x: 260,
        panel_width: 220,
        panel_height: 240,

        display_width: 480,
        display_height: 240,
    };

    /// The badge's 320×170 panel: a 200 wide play field and a 120 wide
    /// trivia column on the right.
    pub const BADGE: Config = Config {
        screen_width: 200.0,
        screen_height: 170.0,

        player_start_x: 90.0,
        player_start_y: 80.0,

        start_platform_y: 130.0,
        start_platform_spacing: 30.0,
        default_spawn_y: 130.0,

        scroll_threshold: 60.0,

        panel_x: 200,
        panel_width: 120,
        panel_height: 170,

        display_width: 320,
        display_height: 170,

        ..Config::DEFAULT
    };

    /// Y of the ground platform's top surface.
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.platform_thickness
    }

    /// Largest x a normal platform may be spawned at.
    pub fn max_platform_x(&self) -> u32 {
        let span = self.screen_width - self.platform_width;
        if span > 0.0 { span as u32 } else { 0 }
    }

    /// Highest climb a full-length held jump reaches from rest, in units.
    ///
    /// Integrates the same tick order the physics step uses: the jump force
    /// is written before gravity is added.
    pub fn max_jump_height(&self) -> f32 {
        let mut velocity = self.jump_force;
        let mut rise = 0.0;
        for _ in 0..self.max_jump_ticks {
            velocity = self.jump_force + self.gravity;
            rise -= velocity;
        }
        while velocity < 0.0 {
            velocity += self.gravity;
            if velocity < 0.0 {
                rise -= velocity;
            }
        }
        rise
    }

    /// Largest vertical distance between consecutive spawned platforms.
    pub fn max_spawn_gap(&self) -> f32 {
        (self.spawn_gap_min + self.spawn_gap_span.saturating_sub(1)) as f32
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ── Palette ─────────────────────────────────────────────────────────────────

pub const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);
pub const PANEL_BACKGROUND: Rgb565 = Rgb565::new(2, 4, 6);
pub const PANEL_TEXT: Rgb565 = Rgb565::new(31, 63, 31);

pub fn ground_color() -> Rgb565 {
    Rgb888::new(0x65, 0x43, 0x21).into()
}

pub fn player_color() -> Rgb565 {
    Rgb888::new(0x00, 0x00, 0xFF).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_jump_clears_the_widest_gap() {
        for config in [Config::DEFAULT, Config::BADGE] {
            assert!(config.max_jump_height() > config.max_spawn_gap());
        }
    }

    #[test]
    fn full_jump_height_matches_hand_integration() {
        // 15 ticks at -4.5 then -4.0, -3.5 .. -0.5 while decelerating.
        assert_eq!(Config::DEFAULT.max_jump_height(), 67.5 + 18.0);
    }

    #[test]
    fn falls_cannot_skip_a_surface() {
        for config in [Config::DEFAULT, Config::BADGE] {
            assert!(config.max_fall_speed <= config.platform_thickness);
        }
    }

    #[test]
    fn badge_layout_fits_the_display() {
        let c = Config::BADGE;
        assert_eq!(c.panel_x as f32, c.screen_width);
        assert_eq!(c.panel_x as u32 + c.panel_width, c.display_width);
        assert!(c.screen_height as u32 <= c.display_height);
        assert!(c.scroll_threshold < c.ground_y());
    }

    #[test]
    fn max_platform_x_leaves_room_for_the_platform() {
        assert_eq!(Config::DEFAULT.max_platform_x(), 200);
        assert_eq!(Config::BADGE.max_platform_x(), 140);
    }
}
