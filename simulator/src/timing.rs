//! Timing, geometry and lamp constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;

/// Pause between main-loop polls. Short enough that the 200 ms edit passes
/// and the 500 ms blink land within a few milliseconds of their deadline.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Simulated panel width in pixels (same as the PIM715).
pub const SCREEN_WIDTH: u32 = 320;

/// Simulated panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Window pixel scale.
pub const WINDOW_SCALE: u32 = 2;

/// Indicator lamp diameter in pixels.
pub const LAMP_DIAMETER: u32 = 24;

/// Gap between a lamp and the panel edges.
pub const LAMP_MARGIN: u32 = 12;

/// Unlit lamp color (dim amber).
pub const LAMP_OFF: Rgb565 = Rgb565::new(6, 8, 0);
