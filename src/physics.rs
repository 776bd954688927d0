//! Player movement, the jump state machine and landing resolution.

use crate::{
    config::Config,
    input::ControllerState,
    platform::{
        Platform,
        PlatformRegistry,
    },
    player::Player,
};

/// Horizontal movement from the stick, clamped to the play field.
pub fn move_horizontal(player: &mut Player, input: ControllerState, config: &Config) {
    player.x += f32::from(input.direction(config.dead_zone)) * config.move_speed;
    player.x = player.x.clamp(0.0, config.screen_width - player.size);
}

/// Start or sustain a jump.
///
/// A grounded player pressing jump takes off. While the button stays held
/// the jump force is re-applied for up to `max_jump_ticks` ticks, so longer
/// presses jump higher; releasing or running out of ticks ends the jump.
pub fn update_jump(player: &mut Player, jump_held: bool, config: &Config) {
    if player.on_ground && jump_held && !player.is_jumping {
        player.velocity_y = config.jump_force;
        player.is_jumping = true;
        player.jump_timer = 0;
        player.on_ground = false;
    }

    if player.is_jumping && jump_held && player.jump_timer < config.max_jump_ticks {
        player.velocity_y = config.jump_force;
        player.jump_timer += 1;
    } else {
        player.is_jumping = false;
    }
}

/// Add gravity, capped at the terminal fall speed, and move vertically.
pub fn integrate(player: &mut Player, config: &Config) {
    player.velocity_y = (player.velocity_y + config.gravity).min(config.max_fall_speed);
    player.y += player.velocity_y;
}

/// Whether `player`, having moved down from `previous_y`, lands on `platform`.
///
/// A player that was grounded last tick keeps `rest_tolerance` of slack on
/// the "feet were above the surface" test so float drift cannot make it
/// sink through the platform it stands on.
pub fn lands_on(player: &Player, previous_y: f32, was_grounded: bool, platform: &Platform, config: &Config) -> bool {
    let falling = player.velocity_y >= 0.0;

    let previous_bottom = previous_y + player.size;
    let slack = if was_grounded { config.rest_tolerance } else { 0.0 };
    let was_above = previous_bottom <= platform.y + slack;

    let bottom = player.bottom();
    let in_surface = bottom >= platform.y && bottom <= platform.y + config.platform_thickness;

    let aligned = player.right() >= platform.x && player.x <= platform.right();

    falling && was_above && in_surface && aligned
}

/// Settle the player on the highest surface it landed on this tick.
///
/// Equal surfaces resolve to the first in registry order. Returns the index
/// of the platform landed on.
pub fn resolve_landing(
    player: &mut Player,
    previous_y: f32,
    was_grounded: bool,
    platforms: &PlatformRegistry,
    config: &Config,
) -> Option<usize> {
    player.on_ground = false;

    let mut landing: Option<(usize, f32)> = None;
    for (index, platform) in platforms.iter().enumerate() {
        if !lands_on(player, previous_y, was_grounded, platform, config) {
            continue;
        }
        if landing.is_none_or(|(_, top)| platform.y < top) {
            landing = Some((index, platform.y));
        }
    }

    let (index, top) = landing?;
    player.y = top - player.size;
    player.velocity_y = 0.0;
    player.on_ground = true;
    player.is_jumping = false;
    Some(index)
}

/// One physics tick: input, jump, gravity, integration and landing.
pub fn step(player: &mut Player, input: ControllerState, platforms: &PlatformRegistry, config: &Config) -> Option<usize> {
    let previous_y = player.y;
    let was_grounded = player.on_ground;

    move_horizontal(player, input, config);
    update_jump(player, input.jump, config);
    integrate(player, config);
    resolve_landing(player, previous_y, was_grounded, platforms, config)
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        pixelcolor::Rgb565,
        prelude::*,
    };

    use super::*;
    use crate::{
        config,
        rng::Rng,
        scene::Scene,
    };

    const CONFIG: Config = Config::DEFAULT;

    fn world() -> PlatformRegistry {
        let scene = Scene::new(Size::new(480, 240), config::BACKGROUND);
        let mut registry = PlatformRegistry::new(scene, &CONFIG);
        registry.add_ground();
        registry
    }

    fn resting_on_ground() -> Player {
        Player {
            y: CONFIG.ground_y() - CONFIG.player_size,
            on_ground: true,
            ..Player::new(&CONFIG)
        }
    }

    const IDLE: ControllerState = ControllerState::IDLE;
    const JUMP: ControllerState = ControllerState { axis_x: 0, jump: true };

    #[test]
    fn x_stays_on_screen_for_any_input() {
        let platforms = world();
        let mut player = resting_on_ground();
        let mut rng = Rng::new(99);
        for _ in 0..5000 {
            let input = ControllerState {
                axis_x: rng.next() as i8,
                jump: rng.range(3) == 0,
            };
            step(&mut player, input, &platforms, &CONFIG);
            assert!(player.x >= 0.0);
            assert!(player.x <= CONFIG.screen_width - CONFIG.player_size);
        }
    }

    #[test]
    fn stick_inside_dead_zone_does_not_move() {
        let platforms = world();
        let mut player = resting_on_ground();
        let x = player.x;
        step(&mut player, ControllerState { axis_x: 10, jump: false }, &platforms, &CONFIG);
        assert_eq!(player.x, x);
        step(&mut player, ControllerState { axis_x: -60, jump: false }, &platforms, &CONFIG);
        assert_eq!(player.x, x - 3.0);
    }

    #[test]
    fn resting_player_does_not_sink() {
        let platforms = world();
        let mut player = resting_on_ground();
        for _ in 0..100 {
            let landed = step(&mut player, IDLE, &platforms, &CONFIG);
            assert_eq!(landed, Some(0));
            assert_eq!(player.y, 210.0);
            assert_eq!(player.velocity_y, 0.0);
            assert!(player.on_ground);
        }
    }

    #[test]
    fn resting_player_survives_surface_drift() {
        let platforms = world();
        let mut player = resting_on_ground();
        // Feet a hair below the surface: the strict test alone would fail.
        player.y += 0.005;
        assert_eq!(step(&mut player, IDLE, &platforms, &CONFIG), Some(0));
        assert_eq!(player.y, 210.0);
    }

    #[test]
    fn held_jump_applies_force_for_fifteen_ticks() {
        let platforms = world();
        let mut player = resting_on_ground();
        for tick in 1..=15 {
            let y = player.y;
            step(&mut player, JUMP, &platforms, &CONFIG);
            // Jump force is written before gravity is added.
            assert_eq!(player.velocity_y, CONFIG.jump_force + CONFIG.gravity, "tick {tick}");
            assert_eq!(player.y, y - 4.5);
            assert!(player.is_jumping);
            assert_eq!(player.jump_timer, tick);
        }

        step(&mut player, JUMP, &platforms, &CONFIG);
        assert!(!player.is_jumping);
        assert_eq!(player.velocity_y, -4.0);
        step(&mut player, JUMP, &platforms, &CONFIG);
        assert_eq!(player.velocity_y, -3.5);
    }

    #[test]
    fn releasing_jump_cuts_it_short() {
        let platforms = world();
        let mut player = resting_on_ground();
        step(&mut player, JUMP, &platforms, &CONFIG);
        step(&mut player, IDLE, &platforms, &CONFIG);
        assert!(!player.is_jumping);
        assert_eq!(player.velocity_y, -4.0);
        // Pressing again mid-air does not restart the jump.
        step(&mut player, JUMP, &platforms, &CONFIG);
        assert_eq!(player.velocity_y, -3.5);
    }

    #[test]
    fn jump_lands_back_on_the_ground() {
        let platforms = world();
        let mut player = resting_on_ground();
        step(&mut player, JUMP, &platforms, &CONFIG);
        let mut ticks = 0;
        while !player.on_ground {
            step(&mut player, IDLE, &platforms, &CONFIG);
            ticks += 1;
            assert!(ticks < 200);
        }
        assert_eq!(player.y, 210.0);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn long_fall_is_caught_by_the_ground() {
        let platforms = world();
        for start in 0..40 {
            let mut player = Player {
                y: -100.0 + start as f32 * 0.25,
                ..Player::new(&CONFIG)
            };
            let mut ticks = 0;
            while step(&mut player, IDLE, &platforms, &CONFIG).is_none() {
                assert!(player.velocity_y <= CONFIG.max_fall_speed);
                ticks += 1;
                assert!(ticks < 200, "fell through from {start}");
            }
            assert_eq!(player.y, 210.0);
        }
    }

    #[test]
    fn no_landing_from_below() {
        let mut platforms = world();
        platforms.add_ledge(90.0, 150.0, Rgb565::new(0, 31, 0));
        let mut player = Player {
            y: 150.0 - 20.0 + 5.0,
            velocity_y: 0.0,
            ..Player::new(&CONFIG)
        };
        // Feet start inside the surface band, so this is not a landing.
        assert_eq!(step(&mut player, IDLE, &platforms, &CONFIG), None);
        assert!(!player.on_ground);
    }

    #[test]
    fn falling_player_lands_on_ledge() {
        let mut platforms = world();
        platforms.add_ledge(90.0, 150.0, Rgb565::new(0, 31, 0));
        let mut player = Player {
            y: 128.0,
            velocity_y: 2.0,
            ..Player::new(&CONFIG)
        };
        assert_eq!(step(&mut player, IDLE, &platforms, &CONFIG), Some(1));
        assert_eq!(player.y, 130.0);
        assert!(player.on_ground);
    }

    #[test]
    fn edges_touching_count_as_aligned() {
        let mut platforms = world();
        // Player spans x 100..120; ledge starts exactly at its right edge.
        platforms.add_ledge(120.0, 150.0, Rgb565::new(0, 31, 0));
        let mut player = Player {
            y: 129.0,
            velocity_y: 0.5,
            ..Player::new(&CONFIG)
        };
        assert_eq!(step(&mut player, IDLE, &platforms, &CONFIG), Some(1));
    }

    #[test]
    fn highest_surface_wins_overlapping_landings() {
        let mut platforms = world();
        platforms.add_ledge(90.0, 153.0, Rgb565::new(0, 31, 0));
        platforms.add_ledge(90.0, 150.0, Rgb565::new(0, 0, 31));
        let mut player = Player {
            y: 125.0,
            velocity_y: 8.5,
            ..Player::new(&CONFIG)
        };
        // Feet move 145 -> 154: inside both surface bands.
        assert_eq!(step(&mut player, IDLE, &platforms, &CONFIG), Some(2));
        assert_eq!(player.y, 130.0);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn equal_surfaces_resolve_to_registry_order() {
        let mut platforms = world();
        platforms.add_ledge(90.0, 150.0, Rgb565::new(0, 31, 0));
        platforms.add_ledge(100.0, 150.0, Rgb565::new(0, 0, 31));
        let mut player = Player {
            y: 128.0,
            velocity_y: 2.0,
            ..Player::new(&CONFIG)
        };
        // Feet move 148 -> 150.5, over both ledges.
        let moved = Player {
            y: 130.5,
            velocity_y: 2.5,
            ..player
        };
        for index in [1, 2] {
            assert!(lands_on(&moved, 128.0, false, platforms.get(index).unwrap(), &CONFIG));
        }
        assert_eq!(step(&mut player, IDLE, &platforms, &CONFIG), Some(1));
        assert_eq!(player.y, 130.0);
    }
}
