//! Endless jumper for the Disobey 2026 badge.
//!
//! - Left/Right on the D-pad steer
//! - Hold A to jump, longer for higher
//! - A trivia fact scrolls past on the right every few seconds
//!
//! Three tasks share the executor: a millisecond clock, the trivia
//! scheduler and the game loop. The game task owns the display and all game
//! state; the others only publish the clock and send overlay commands.

#![no_std]
#![no_main]

use core::sync::atomic::{
    AtomicU32,
    Ordering,
};

use defmt::{
    info,
    warn,
};
#[allow(clippy::wildcard_imports)]
use disobey2026jumper::*;
use disobey2026jumper::trivia::TriviaSchedule;
use embassy_executor::Spawner;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::Channel,
};
use embassy_time::{
    Duration,
    Instant,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

const CONFIG: Config = Config::BADGE;

/// Milliseconds since boot. Written only by `clock_task`.
static CLOCK_MS: AtomicU32 = AtomicU32::new(0);

/// Trivia scheduler → game loop.
static OVERLAY: Channel<CriticalSectionRawMutex, OverlayCommand, 4> = Channel::new();

#[embassy_executor::task]
async fn clock_task() {
    info!("Clock task started");
    loop {
        CLOCK_MS.store(Instant::now().as_millis() as u32, Ordering::Relaxed);
        Timer::after(Duration::from_millis(1)).await;
    }
}

#[embassy_executor::task]
async fn trivia_task(seed: u32) {
    info!("Trivia task started");
    let mut schedule = TriviaSchedule::new(&CONFIG, seed);
    loop {
        Timer::after(Duration::from_millis(schedule.next_delay_ms().into())).await;
        OVERLAY.send(schedule.pick()).await;
        Timer::after(Duration::from_millis(schedule.show_ms().into())).await;
        OVERLAY.send(OverlayCommand::Hide).await;
    }
}

#[embassy_executor::task]
async fn game_task(
    display: &'static mut Display<'static>,
    backlight: &'static mut Backlight,
    buttons: Buttons,
    seed: u32,
) {
    info!("Jumper game task started");
    let mut jumper = Jumper::new(CONFIG, buttons, seed);

    // Paint the first frame in the dark.
    if jumper.render(display).is_err() {
        warn!("initial frame failed to render");
    }
    backlight.on();

    let tick = Duration::from_millis(CONFIG.tick_ms);
    let mut next_frame = Instant::now() + tick;

    loop {
        let report = jumper.frame(CLOCK_MS.load(Ordering::Relaxed));
        if report.scrolled > 0.0 {
            defmt::trace!("scrolled {}", report.scrolled);
        }

        while let Ok(command) = OVERLAY.try_receive() {
            jumper.apply_overlay(command);
        }

        if jumper.render(display).is_err() {
            warn!("frame {} failed to render", jumper.game().ticks());
        }

        // A late frame starts the next one immediately instead of bursting
        // to catch up.
        let now = Instant::now();
        if next_frame < now {
            next_frame = now;
        }
        Timer::at(next_frame).await;
        next_frame += tick;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = disobey2026jumper::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    assert_eq!(CONFIG.display_width, DISPLAY_WIDTH);
    assert_eq!(CONFIG.display_height, DISPLAY_HEIGHT);

    let display = mk_static!(Display<'static>, resources.display.into());
    let backlight = mk_static!(Backlight, resources.backlight.into());
    let buttons: Buttons = resources.buttons.into();

    // Boot time varies by a few hundred ticks between power-ups; that is
    // enough to vary the platform layout.
    let seed = Instant::now().as_ticks() as u32;
    info!("Seed {=u32:#x}", seed);

    spawner.must_spawn(clock_task());
    spawner.must_spawn(trivia_task(seed.rotate_left(16) ^ 0xA5A5_A5A5));
    spawner.must_spawn(game_task(display, backlight, buttons, seed));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
