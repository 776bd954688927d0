//! Culling platforms that scrolled away and topping the column back up.

use embedded_graphics::pixelcolor::{
    Rgb565,
    Rgb888,
};
use palette::{
    FromColor,
    Hsv,
    Srgb,
};

use crate::{
    config::Config,
    platform::PlatformRegistry,
    rng::Rng,
};

/// Remove every non-solid platform below the bottom of the screen.
pub fn recycle(platforms: &mut PlatformRegistry, config: &Config) -> usize {
    platforms.remove_where(|platform| platform.y > config.screen_height)
}

/// Spawn platforms above the topmost one until `target_platforms` non-solid
/// platforms exist. Returns how many were added.
///
/// Each new platform sits a random gap above the current topmost platform,
/// or at `default_spawn_y` when the registry is empty, so every iteration
/// strictly raises the top and the loop always ends.
pub fn spawn(platforms: &mut PlatformRegistry, rng: &mut Rng, config: &Config) -> usize {
    let mut spawned = 0;
    while platforms.non_solid_count() < config.target_platforms {
        let x = rng.range(config.max_platform_x() + 1) as f32;
        let y = match platforms.topmost_y() {
            Some(top) => top - (config.spawn_gap_min + rng.range(config.spawn_gap_span)) as f32,
            None => config.default_spawn_y,
        };
        platforms.add_ledge(x, y, ledge_color(rng));
        spawned += 1;
    }
    spawned
}

/// A random, fully saturated hue so ledges stand out from the background.
pub fn ledge_color(rng: &mut Rng) -> Rgb565 {
    let hue = rng.range(360) as f32;
    let rgb: Srgb<u8> = Srgb::from_color(Hsv::new(hue, 0.85, 1.0)).into_format();
    Rgb888::new(rgb.red, rgb.green, rgb.blue).into()
}
