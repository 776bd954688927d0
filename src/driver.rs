//! One frame of the game loop, independent of the executor that paces it.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};

use crate::{
    config::{
        self,
        Config,
    },
    game::{
        GameState,
        TickReport,
    },
    input::Controller,
    scene::Scene,
    trivia::{
        OverlayCommand,
        TriviaOverlay,
    },
};

/// The whole game: state, scene, overlay and the controller feeding it.
pub struct Jumper<C> {
    scene: Scene,
    game: GameState,
    overlay: TriviaOverlay,
    controller: C,
    last_clock_ms: Option<u32>,
}

impl<C: Controller> Jumper<C> {
    pub fn new(config: Config, controller: C, seed: u32) -> Self {
        let scene = Scene::new(
            Size::new(config.display_width, config.display_height),
            config::BACKGROUND,
        );
        let game = GameState::new(config, &scene, seed);
        let overlay = TriviaOverlay::new(scene.clone(), &config);
        Self {
            scene,
            game,
            overlay,
            controller,
            last_clock_ms: None,
        }
    }

    /// Run one tick.
    ///
    /// `clock_ms` is the monotonic millisecond counter; the scene's animation
    /// clock advances by the time elapsed since the previous frame.
    pub fn frame(&mut self, clock_ms: u32) -> TickReport {
        let elapsed = self
            .last_clock_ms
            .map_or(0, |last| clock_ms.wrapping_sub(last));
        self.last_clock_ms = Some(clock_ms);
        self.scene.advance_clock(elapsed);

        let input = self.controller.poll();
        let report = self.game.tick(input);
        self.game.sync_visuals();
        report
    }

    /// Apply an overlay command at the frame's sync point.
    pub fn apply_overlay(&mut self, command: OverlayCommand) {
        self.overlay.apply(command);
    }

    /// Flush pending visual updates to `target`.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.scene.render(target)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn overlay(&self) -> &TriviaOverlay {
        &self.overlay
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
