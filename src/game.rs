//! Game state and the per-tick update pipeline.

use embedded_graphics::prelude::*;

use crate::{
    config::{
        self,
        Config,
    },
    input::ControllerState,
    physics,
    platform::PlatformRegistry,
    player::Player,
    rng::Rng,
    scene::{
        Scene,
        Visual,
    },
    scroll,
    spawner,
};

/// What happened during one tick, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Registry index of the platform landed on.
    pub landed: Option<usize>,
    pub scrolled: f32,
    pub culled: usize,
    pub spawned: usize,
}

/// Everything the game loop mutates, owned in one place.
pub struct GameState {
    config: Config,
    pub player: Player,
    pub platforms: PlatformRegistry,
    rng: Rng,
    player_visual: Visual,
    ticks: u32,
}

impl GameState {
    /// Create the player, the ground and the staggered starting platforms.
    pub fn new(config: Config, scene: &Scene, seed: u32) -> Self {
        let player = Player::new(&config);
        let player_visual = scene.create_box(
            Point::new(player.x as i32, player.y as i32),
            Size::new(player.size as u32, player.size as u32),
            config::player_color(),
        );

        let mut rng = Rng::new(seed);
        let mut platforms = PlatformRegistry::new(scene.clone(), &config);
        platforms.add_ground();
        for i in 0..config.start_platforms {
            let x = rng.range(config.max_platform_x() + 1) as f32;
            let y = config.start_platform_y - i as f32 * config.start_platform_spacing;
            platforms.add_ledge(x, y, spawner::ledge_color(&mut rng));
        }

        info!("session start: seed {}, {} platforms", seed, platforms.len());

        Self {
            config,
            player,
            platforms,
            rng,
            player_visual,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Advance the world by one tick.
    ///
    /// Physics and landing run first so scrolling can never hide a landing
    /// within the same tick; culling runs before spawning so the live count
    /// reflects what was removed.
    pub fn tick(&mut self, input: ControllerState) -> TickReport {
        let config = &self.config;
        let landed = physics::step(&mut self.player, input, &self.platforms, config);
        let scrolled = scroll::scroll_world(&mut self.player, &mut self.platforms, config);
        let culled = spawner::recycle(&mut self.platforms, config);
        let spawned = spawner::spawn(&mut self.platforms, &mut self.rng, config);
        self.ticks = self.ticks.wrapping_add(1);

        if culled > 0 || spawned > 0 {
            debug!("tick {}: culled {}, spawned {}", self.ticks, culled, spawned);
        }

        TickReport {
            landed,
            scrolled,
            culled,
            spawned,
        }
    }

    /// Push player and platform positions to their scene nodes.
    pub fn sync_visuals(&self) {
        self.player_visual
            .set_position(Point::new(self.player.x as i32, self.player.y as i32));
        self.platforms.sync_visuals();
    }

    pub fn player_visual(&self) -> &Visual {
        &self.player_visual
    }
}
