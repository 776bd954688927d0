//! Platforms and the registry that owns them.

use alloc::vec::Vec;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};

use crate::{
    config::{
        self,
        Config,
    },
    scene::{
        Scene,
        Visual,
    },
};

/// A landing surface. Its scene node lives exactly as long as the platform.
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    solid: bool,
    visual: Visual,
}

impl Platform {
    /// The permanent ground, exempt from scrolling and culling.
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// Push the logical position to the scene node.
    pub fn sync_visual(&self) {
        self.visual.set_position(Point::new(self.x as i32, self.y as i32));
    }
}

/// Owns every live platform, ground included.
pub struct PlatformRegistry {
    scene: Scene,
    config: Config,
    platforms: Vec<Platform>,
}

impl PlatformRegistry {
    pub fn new(scene: Scene, config: &Config) -> Self {
        Self {
            scene,
            config: *config,
            platforms: Vec::new(),
        }
    }

    /// Add the full-width ground platform. A second call is ignored.
    pub fn add_ground(&mut self) -> bool {
        if self.ground().is_some() {
            warn!("ground platform already exists");
            return false;
        }
        let y = self.config.ground_y();
        self.push(0.0, y, self.config.screen_width, true, config::ground_color());
        true
    }

    /// Add a normal platform with its top-left corner at (`x`, `y`).
    pub fn add_ledge(&mut self, x: f32, y: f32, color: Rgb565) {
        self.push(x, y, self.config.platform_width, false, color);
    }

    fn push(&mut self, x: f32, y: f32, width: f32, solid: bool, color: Rgb565) {
        let visual = self.scene.create_box(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, self.config.platform_thickness as u32),
            color,
        );
        self.platforms.push(Platform {
            x,
            y,
            width,
            solid,
            visual,
        });
    }

    /// Drop every non-solid platform matching `cull`, releasing its visual.
    /// Returns how many were removed.
    pub fn remove_where(&mut self, mut cull: impl FnMut(&Platform) -> bool) -> usize {
        let before = self.platforms.len();
        self.platforms.retain(|platform| platform.solid || !cull(platform));
        before - self.platforms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Platform> {
        self.platforms.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn non_solid_count(&self) -> usize {
        self.platforms.iter().filter(|platform| !platform.solid).count()
    }

    pub fn ground(&self) -> Option<&Platform> {
        self.platforms.iter().find(|platform| platform.solid)
    }

    /// Y of the highest platform on screen or above it, ground included.
    pub fn topmost_y(&self) -> Option<f32> {
        self.platforms
            .iter()
            .map(|platform| platform.y)
            .reduce(f32::min)
    }

    pub fn sync_visuals(&self) {
        for platform in &self.platforms {
            platform.sync_visual();
        }
    }
}
