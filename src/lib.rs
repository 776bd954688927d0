//! # disobey2026jumper
//!
//! An endless jumper for the Disobey 2026 badge, with a trivia panel that
//! pops up beside the play field every few seconds.
//!
//! The game itself is hardware independent:
//! - [`game::GameState`] owns the player and the platform column and runs
//!   one tick of physics, landing, scrolling, culling and spawning.
//! - [`scene::Scene`] is a small retained scene graph rendered into any
//!   `embedded-graphics` target.
//! - [`driver::Jumper`] ties both to a [`input::Controller`] and the trivia
//!   overlay, one frame at a time.
//!
//! With the `badge` feature the crate also provides the board support used by
//! the `jumper` binary: display, backlight and buttons. Build the firmware
//! with `--no-default-features --features badge` so only `defmt` is linked.
//!
//! ```rust,ignore
//! let peripherals = disobey2026jumper::init();
//! let resources = disobey2026jumper::split_resources!(peripherals);
//!
//! let display: disobey2026jumper::Display = resources.display.into();
//! let buttons: disobey2026jumper::Buttons = resources.buttons.into();
//! let mut jumper = Jumper::new(Config::BADGE, buttons, seed);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod driver;
pub mod game;
pub mod input;
pub mod physics;
pub mod platform;
pub mod player;
pub mod rng;
pub mod scene;
pub mod scroll;
pub mod spawner;
pub mod trivia;

#[cfg(test)]
mod testing;

#[cfg(feature = "badge")]
mod backlight;
#[cfg(feature = "badge")]
mod buttons;
#[cfg(feature = "badge")]
mod display;

#[cfg(feature = "badge")]
pub use backlight::Backlight;
#[cfg(feature = "badge")]
pub use buttons::Buttons;
pub use config::Config;
#[cfg(feature = "badge")]
pub use display::{
    Display,
    HEIGHT as DISPLAY_HEIGHT,
    WIDTH as DISPLAY_WIDTH,
};
pub use driver::Jumper;
#[cfg(feature = "badge")]
use esp_hal::{
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    rom,
};
pub use input::{
    Controller,
    ControllerState,
};
pub use trivia::OverlayCommand;

/// StaticCell helper: allocates a value into a `static` exactly once.
#[cfg(feature = "badge")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

#[cfg(feature = "badge")]
assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            left: GPIO21,
            right: GPIO2,
            a: GPIO13,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Minimal CPU clock switcher for ESP32-S3.
///
/// Steps through an intermediate frequency before reaching the target,
/// which is required by the hardware.
#[cfg(feature = "badge")]
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Initialise the badge hardware and return the raw peripheral set.
///
/// Call this once at the top of `main`, then use [`split_resources!`] to
/// break the peripherals into typed resource groups.
#[cfg(feature = "badge")]
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}
