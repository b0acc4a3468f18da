//! Character panel on a pixel display.
//!
//! [`TextPanel`] turns any `embedded-graphics` RGB565 draw target into the
//! 16×2 [`CharDisplay`] the core writes to. The grid is centered on the
//! target and drawn in `ProFont` 24pt.
//!
//! # Optimization: Shadow Buffer
//!
//! The main loop rewrites both rows every iteration. The panel keeps a copy of
//! what each cell shows and only draws cells whose character changed, so a
//! steady screen costs no bus traffic at all.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use profont::PROFONT_24_POINT;

use crate::colors::{AMBER, BLACK};
use crate::config::{DISPLAY_COLUMNS, DISPLAY_ROWS};
use crate::hal::CharDisplay;

/// Glyph font for the panel.
pub const PANEL_FONT: &MonoFont = &PROFONT_24_POINT;

/// Extra vertical gap between the two rows, in pixels.
const ROW_GAP: u32 = 12;

/// Marks a cell whose content is unknown (forces a redraw).
const UNKNOWN: u8 = 0;

/// 16×2 character grid rendered onto a pixel display.
pub struct TextPanel<D> {
    target: D,
    style: MonoTextStyle<'static, Rgb565>,
    origin: Point,
    pitch: Size,
    cursor: (usize, usize),
    shadow: [[u8; DISPLAY_COLUMNS]; DISPLAY_ROWS],
}

impl<D: DrawTarget<Color = Rgb565>> TextPanel<D> {
    /// Wrap `target`, centering the grid on its bounding box.
    pub fn new(target: D) -> Self {
        let style = MonoTextStyleBuilder::new()
            .font(PANEL_FONT)
            .text_color(AMBER)
            .background_color(BLACK)
            .build();

        let glyph = PANEL_FONT.character_size;
        let pitch = Size::new(glyph.width + PANEL_FONT.character_spacing, glyph.height + ROW_GAP);
        let grid = Size::new(
            pitch.width * DISPLAY_COLUMNS as u32,
            pitch.height * DISPLAY_ROWS as u32 - ROW_GAP,
        );
        let bounds = target.bounding_box();
        let origin = bounds.top_left
            + Point::new(
                (bounds.size.width.saturating_sub(grid.width) / 2) as i32,
                (bounds.size.height.saturating_sub(grid.height) / 2) as i32,
            );

        Self {
            target,
            style,
            origin,
            pitch,
            cursor: (0, 0),
            shadow: [[UNKNOWN; DISPLAY_COLUMNS]; DISPLAY_ROWS],
        }
    }

    /// Underlying draw target.
    #[inline]
    pub const fn target(&self) -> &D { &self.target }

    /// Underlying draw target, mutably (e.g. to flush a simulator window).
    #[inline]
    pub fn target_mut(&mut self) -> &mut D { &mut self.target }

    /// Character currently shown at `col`, `row`, if known.
    pub fn cell(
        &self,
        col: usize,
        row: usize,
    ) -> Option<char> {
        match *self.shadow.get(row)?.get(col)? {
            UNKNOWN => None,
            byte => Some(byte as char),
        }
    }

    /// Top-left pixel of a cell.
    fn cell_origin(
        &self,
        col: usize,
        row: usize,
    ) -> Point {
        self.origin + Point::new((col as u32 * self.pitch.width) as i32, (row as u32 * self.pitch.height) as i32)
    }

    fn draw_cell(
        &mut self,
        col: usize,
        row: usize,
        byte: u8,
    ) {
        let mut buf = [0u8; 4];
        let glyph = (byte as char).encode_utf8(&mut buf);
        let position = self.cell_origin(col, row);
        // Draw errors leave the shadow stale, so the cell is retried next print
        if Text::with_baseline(glyph, position, self.style, Baseline::Top)
            .draw(&mut self.target)
            .is_ok()
        {
            self.shadow[row][col] = byte;
        } else {
            self.shadow[row][col] = UNKNOWN;
        }
    }
}

impl<D: DrawTarget<Color = Rgb565>> CharDisplay for TextPanel<D> {
    fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    ) {
        self.cursor = (usize::from(col), usize::from(row));
    }

    fn print(
        &mut self,
        text: &str,
    ) {
        let (mut col, row) = self.cursor;
        if row >= DISPLAY_ROWS {
            return;
        }
        for ch in text.chars() {
            if col >= DISPLAY_COLUMNS {
                break;
            }
            // The font covers printable ASCII only
            let byte = if ch.is_ascii_graphic() || ch == ' ' { ch as u8 } else { b'?' };
            if self.shadow[row][col] != byte {
                self.draw_cell(col, row, byte);
            }
            col += 1;
        }
        self.cursor = (col, row);
    }

    fn clear(&mut self) {
        let cleared = self.target.clear(BLACK).is_ok();
        let fill = if cleared { b' ' } else { UNKNOWN };
        self.shadow = [[fill; DISPLAY_COLUMNS]; DISPLAY_ROWS];
        self.cursor = (0, 0);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    /// Draw target that only counts pixels.
    struct CountingTarget {
        size: Size,
        pixels: usize,
        clears: usize,
    }

    impl CountingTarget {
        fn new() -> Self {
            Self {
                size: Size::new(320, 240),
                pixels: 0,
                clears: 0,
            }
        }
    }

    impl OriginDimensions for CountingTarget {
        fn size(&self) -> Size { self.size }
    }

    impl DrawTarget for CountingTarget {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.pixels += pixels.into_iter().count();
            Ok(())
        }

        fn clear(
            &mut self,
            _color: Self::Color,
        ) -> Result<(), Self::Error> {
            self.clears += 1;
            Ok(())
        }
    }

    #[test]
    fn test_grid_fits_reference_panel() {
        let panel = TextPanel::new(CountingTarget::new());
        let last = panel.cell_origin(DISPLAY_COLUMNS - 1, DISPLAY_ROWS - 1);
        let glyph = PANEL_FONT.character_size;
        assert!(panel.origin.x >= 0 && panel.origin.y >= 0);
        assert!(last.x + glyph.width as i32 <= 320);
        assert!(last.y + glyph.height as i32 <= 240);
    }

    #[test]
    fn test_print_fills_cells() {
        let mut panel = TextPanel::new(CountingTarget::new());
        panel.set_cursor(3, 1);
        panel.print("AB");
        assert_eq!(panel.cell(3, 1), Some('A'));
        assert_eq!(panel.cell(4, 1), Some('B'));
        assert_eq!(panel.cell(0, 0), None);
    }

    #[test]
    fn test_unchanged_text_is_not_redrawn() {
        let mut panel = TextPanel::new(CountingTarget::new());
        panel.set_cursor(0, 0);
        panel.print("Spd: 65");
        let drawn = panel.target().pixels;
        assert!(drawn > 0);

        panel.set_cursor(0, 0);
        panel.print("Spd: 65");
        assert_eq!(panel.target().pixels, drawn);

        panel.set_cursor(0, 0);
        panel.print("Spd: 66");
        assert!(panel.target().pixels > drawn);
    }

    #[test]
    fn test_print_clips_at_row_end() {
        let mut panel = TextPanel::new(CountingTarget::new());
        panel.set_cursor(14, 0);
        panel.print("XYZ");
        assert_eq!(panel.cell(14, 0), Some('X'));
        assert_eq!(panel.cell(15, 0), Some('Y'));
        assert_eq!(panel.cell(0, 1), None);
    }

    #[test]
    fn test_clear_blanks_shadow() {
        let mut panel = TextPanel::new(CountingTarget::new());
        panel.print("HELLO");
        panel.clear();
        assert_eq!(panel.target().clears, 1);
        assert_eq!(panel.cell(0, 0), Some(' '));

        // Blanks after a clear need no drawing
        let drawn = panel.target().pixels;
        panel.print("    ");
        assert_eq!(panel.target().pixels, drawn);
    }

    #[test]
    fn test_non_ascii_is_replaced() {
        let mut panel = TextPanel::new(CountingTarget::new());
        panel.print("°");
        assert_eq!(panel.cell(0, 0), Some('?'));
    }
}
