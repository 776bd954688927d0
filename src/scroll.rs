//! Camera follow: keeps the player below the scroll threshold.

use crate::{
    config::Config,
    platform::PlatformRegistry,
    player::Player,
};

/// Keep the player at or below the scroll threshold by moving the world.
///
/// When the player climbed above the threshold it is put back on it and
/// every non-solid platform moves down by the same overshoot. Returns the
/// overshoot, zero when nothing scrolled.
pub fn scroll_world(player: &mut Player, platforms: &mut PlatformRegistry, config: &Config) -> f32 {
    if player.y >= config.scroll_threshold {
        return 0.0;
    }

    let overshoot = config.scroll_threshold - player.y;
    player.y = config.scroll_threshold;
    for platform in platforms.iter_mut().filter(|platform| !platform.is_solid()) {
        platform.y += overshoot;
    }
    overshoot
}
