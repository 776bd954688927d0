//! In-memory draw target and scripted controller for host tests.

use alloc::{
    collections::VecDeque,
    vec,
    vec::Vec,
};
use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};

use crate::input::{
    Controller,
    ControllerState,
};

pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb565>,
    writes: usize,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb565::new(1, 2, 3); (size.width * size.height) as usize],
            writes: 0,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        self.pixels.get(y as usize * self.size.width as usize + x as usize).copied()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.size.width && y < self.size.height {
                self.pixels[(y * self.size.width + x) as usize] = color;
                self.writes += 1;
            }
        }
        Ok(())
    }
}

/// Replays a fixed list of controller states, then reports idle input.
#[derive(Default)]
pub struct Script {
    states: VecDeque<ControllerState>,
}

impl Script {
    pub fn new(states: impl IntoIterator<Item = ControllerState>) -> Self {
        Self {
            states: states.into_iter().collect(),
        }
    }
}

impl Controller for Script {
    fn poll(&mut self) -> ControllerState {
        self.states.pop_front().unwrap_or_default()
    }
}
