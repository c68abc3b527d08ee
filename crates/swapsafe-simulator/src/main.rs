//! Desktop simulator for the SwapSafe battery safety dashboard.
//!
//! Renders the dashboard page in an SDL2 window via
//! `embedded-graphics-simulator`, using the built-in demo records. The page
//! draws into an in-memory framebuffer whose dirty region is flushed to the
//! window every frame, the same path a panel driver would take.
//!
//! # Key bindings
//!
//! | Key   | Action                         |
//! |-------|--------------------------------|
//! | R     | Replay the gauge animation     |
//! | A     | Toggle gauge animation         |
//! | S     | Cycle gauge size               |
//! | Q/Esc | Quit                           |
//!
//! `SWAPSAFE_GAUGE_SIZE` (`sm`, `md`, `lg`) picks the initial gauge size.

use std::time::{Duration, Instant as StdInstant};

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use swapsafe::animation::FrameScheduler;
use swapsafe::app_state::AppState;
use swapsafe::config::DashboardConfig;
use swapsafe::framebuffer::FrameBuffer;
use swapsafe::pages::{DashboardPage, Page};
use swapsafe::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, GaugeSize};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 1;

/// Target frame duration (~60 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Environment variable holding the initial gauge size token.
const GAUGE_SIZE_ENV: &str = "SWAPSAFE_GAUGE_SIZE";

/// Full-screen bounding rectangle.
fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
    )
}

fn load_config() -> DashboardConfig {
    let mut config = DashboardConfig::dashboard();
    if let Ok(token) = std::env::var(GAUGE_SIZE_ENV) {
        config.gauge.size = GaugeSize::from_token(&token);
    }
    config
}

/// Keyboard commands understood by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Replay,
    ToggleAnimation,
    CycleSize,
    Quit,
}

fn keycode_to_command(keycode: Keycode) -> Option<Command> {
    match keycode {
        Keycode::R => Some(Command::Replay),
        Keycode::A => Some(Command::ToggleAnimation),
        Keycode::S => Some(Command::CycleSize),
        Keycode::Q | Keycode::Escape => Some(Command::Quit),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting SwapSafe simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: R=Replay  A=Toggle animation  S=Cycle size  Q/Esc=Quit");

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("SwapSafe Dashboard", &output_settings);

    let mut framebuffer = FrameBuffer::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX);
    let scheduler = FrameScheduler::new();
    let state = AppState::demo();

    let mut page = DashboardPage::new(
        screen_bounds(),
        &state,
        load_config(),
        scheduler.clone(),
        Instant::now(),
    );
    page.on_activate();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    if let Err(e) = page.draw_page(&mut framebuffer) {
        error!("Draw error: {:?}", e);
    }
    let _ = framebuffer.flush(&mut display);
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = StdInstant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let command = match event {
                SimulatorEvent::Quit => Some(Command::Quit),
                SimulatorEvent::KeyDown { keycode, .. } => keycode_to_command(keycode),
                _ => None,
            };

            match command {
                Some(Command::Quit) => break 'running,
                Some(Command::Replay) => page.replay_animation(),
                Some(Command::ToggleAnimation) => {
                    page.toggle_animation();
                }
                Some(Command::CycleSize) => {
                    page.cycle_gauge_size();
                }
                None => {}
            }
        }

        // --- Timers and page update ---------------------------------------
        let now = Instant::now();
        scheduler.advance(now);
        page.update(now);

        // --- Render -------------------------------------------------------
        if page.is_dirty() {
            if let Err(e) = page.draw_page(&mut framebuffer) {
                error!("Draw error: {:?}", e);
            }
            let _ = framebuffer.flush(&mut display);
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    page.on_deactivate();
    info!("Simulator exiting");
}
