//! The trivia panel shown beside the play field.
//!
//! A scheduler decides when a fact appears and which one; the game loop
//! turns the resulting [`OverlayCommand`]s into a scrolling label at its
//! sync point. The scheduler never touches the scene itself.

use embedded_graphics::{
    prelude::*,
    primitives::Rectangle,
};

use crate::{
    config::{
        self,
        Config,
    },
    rng::Rng,
    scene::{
        Scene,
        Visual,
    },
};

pub const CATALOG: [&str; 5] = [
    "Tardigrades, the half-millimetre water bears, survive being dried out for \
     decades by swapping the water in their cells for a glassy sugar. Add a drop \
     of water and they wake up and carry on eating moss as if nothing happened.",
    "Octopuses have three hearts. Two pump blood through the gills and the third \
     serves the rest of the body, but that one stops beating while the octopus \
     swims, which is why they prefer crawling. Their blood is blue because it \
     carries oxygen with copper instead of iron.",
    "A day on Venus is longer than its year. The planet takes about 243 Earth \
     days to spin once and only 225 to go around the Sun, and it spins backwards, \
     so there the Sun rises in the west.",
    "Honey found in ancient Egyptian tombs was still edible after three thousand \
     years. Bees fan nectar until it is so dry and acidic that bacteria and moulds \
     cannot grow in it, and the sealed wax cells keep moisture out.",
    "The first computer bug was a real moth. In 1947 engineers working on the \
     Harvard Mark II found one trapped in a relay, taped it into the logbook and \
     wrote 'first actual case of bug being found'. The page is in a museum today.",
];

/// Message from the trivia scheduler to the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayCommand {
    /// Show the catalog entry at this index.
    Show(usize),
    Hide,
}

/// Timing and selection for the trivia panel.
pub struct TriviaSchedule {
    rng: Rng,
    min_delay_ms: u32,
    jitter_ms: u32,
    show_ms: u32,
}

impl TriviaSchedule {
    pub fn new(config: &Config, seed: u32) -> Self {
        Self {
            rng: Rng::new(seed),
            min_delay_ms: config.trivia_min_delay_ms,
            jitter_ms: config.trivia_jitter_ms,
            show_ms: config.trivia_show_ms,
        }
    }

    /// Quiet time before the next fact appears.
    pub fn next_delay_ms(&mut self) -> u32 {
        self.min_delay_ms + self.rng.range(self.jitter_ms)
    }

    /// How long a fact stays up.
    pub fn show_ms(&self) -> u32 {
        self.show_ms
    }

    pub fn pick(&mut self) -> OverlayCommand {
        OverlayCommand::Show(self.rng.range(CATALOG.len() as u32) as usize)
    }
}

/// The label currently on screen, if any.
pub struct TriviaOverlay {
    scene: Scene,
    area: Rectangle,
    line_ms: u32,
    label: Option<Visual>,
}

impl TriviaOverlay {
    pub fn new(scene: Scene, config: &Config) -> Self {
        Self {
            scene,
            area: Rectangle::new(
                Point::new(config.panel_x, 0),
                Size::new(config.panel_width, config.panel_height),
            ),
            line_ms: config.trivia_line_ms,
            label: None,
        }
    }

    /// Apply one command. Showing while a fact is up replaces it.
    pub fn apply(&mut self, command: OverlayCommand) {
        match command {
            OverlayCommand::Show(index) => {
                let text = CATALOG[index % CATALOG.len()];
                // Release the old label before creating its replacement.
                self.label = None;
                self.label = Some(self.scene.create_label(
                    text,
                    self.area,
                    config::PANEL_TEXT,
                    config::PANEL_BACKGROUND,
                    self.line_ms,
                ));
                info!("trivia: showing entry {}", index % CATALOG.len());
            }
            OverlayCommand::Hide => {
                if self.label.take().is_some() {
                    info!("trivia: hidden");
                }
            }
        }
    }

    pub fn is_showing(&self) -> bool {
        self.label.is_some()
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{
        CHAR_WIDTH,
        wrap_lines,
    };

    fn overlay() -> (Scene, TriviaOverlay) {
        let config = Config::BADGE;
        let scene = Scene::new(Size::new(config.display_width, config.display_height), config::BACKGROUND);
        let overlay = TriviaOverlay::new(scene.clone(), &config);
        (scene, overlay)
    }

    #[test]
    fn delays_stay_between_five_and_eight_seconds() {
        let mut schedule = TriviaSchedule::new(&Config::DEFAULT, 17);
        for _ in 0..500 {
            let delay = schedule.next_delay_ms();
            assert!((5000..8000).contains(&delay));
        }
        assert_eq!(schedule.show_ms(), 10_000);
    }

    #[test]
    fn picks_only_catalog_entries() {
        let mut schedule = TriviaSchedule::new(&Config::DEFAULT, 5);
        for _ in 0..200 {
            match schedule.pick() {
                OverlayCommand::Show(index) => assert!(index < CATALOG.len()),
                OverlayCommand::Hide => panic!("pick never hides"),
            }
        }
    }

    #[test]
    fn show_and_hide_manage_exactly_one_node() {
        let (scene, mut overlay) = overlay();
        overlay.apply(OverlayCommand::Show(1));
        assert!(overlay.is_showing());
        assert_eq!(scene.live_nodes(), 1);

        overlay.apply(OverlayCommand::Show(3));
        assert_eq!(scene.live_nodes(), 1);

        overlay.apply(OverlayCommand::Hide);
        assert!(!overlay.is_showing());
        assert_eq!(scene.live_nodes(), 0);

        overlay.apply(OverlayCommand::Hide);
        assert_eq!(scene.live_nodes(), 0);
    }

    #[test]
    fn catalog_is_plain_ascii_and_wraps_in_the_panel() {
        let (_scene, overlay) = overlay();
        let cols = (overlay.area().size.width / CHAR_WIDTH) as usize;
        for text in CATALOG {
            assert!(text.is_ascii());
            assert!(!text.contains("  "));
            assert!(wrap_lines(text, cols).all(|line| line.len() <= cols));
        }
    }

    #[test]
    fn label_sits_right_of_the_play_field() {
        let (_scene, mut overlay) = overlay();
        overlay.apply(OverlayCommand::Show(0));
        assert_eq!(overlay.area().top_left, Point::new(200, 0));
        assert_eq!(overlay.label.as_ref().unwrap().bounds(), overlay.area());
    }
}
