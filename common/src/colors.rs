//! Color constants for the character panel.
//!
//! The panel imitates a backlit amber LCD: amber glyphs on black.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to the ST7789 and requires no conversion when
//! written to the display.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Pure black (0, 0, 0). Panel background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Amber glyph color.
/// RGB565: (31, 40, 0) - between orange and yellow.
pub const AMBER: Rgb565 = Rgb565::new(31, 40, 0);
