//! Display line formatting and rendering.
//!
//! Formatting is pure: the same status and clock always give the same lines.
//! [`render`] is the only part that talks to the display, writing each line
//! from column 0 and blank-padding it to the full width so a shorter line
//! (`NORMAL` after `FORWARD`) leaves no stale characters behind.
//!
//! # Layouts
//!
//! | Screen   | Row 0              | Row 1           |
//! |----------|--------------------|-----------------|
//! | Status   | `Spd: 65 Bat: 42%` | `FORWARD 07:05` |
//! | Time set | `SET HOURS`        | `07`            |

use core::fmt::Write;

use heapless::String;

use crate::clock::WallClock;
use crate::config::DISPLAY_COLUMNS;
use crate::hal::CharDisplay;
use crate::status::VehicleStatus;
use crate::time_set::SettingField;

/// One display row.
pub type DisplayLine = String<DISPLAY_COLUMNS>;

/// Both display rows.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct DisplayLines {
    /// Row 0.
    pub top: DisplayLine,
    /// Row 1.
    pub bottom: DisplayLine,
}

/// Status screen: speed and battery on top, drive mode and time below.
pub fn format_status(
    status: &VehicleStatus,
    clock: &WallClock,
) -> DisplayLines {
    let mut lines = DisplayLines::default();
    // Values are range-checked upstream, both rows fit in 16 columns
    let _ = write!(lines.top, "Spd:{:3} Bat:{:3}%", status.speed, status.battery_percentage);
    let _ = write!(
        lines.bottom,
        "{} {:02}:{:02}",
        status.drive_mode.name(),
        clock.hours,
        clock.minutes
    );
    lines
}

/// Time-set prompt: the field being edited and its current value.
pub fn format_time_set_prompt(
    field: SettingField,
    clock: &WallClock,
) -> DisplayLines {
    let mut lines = DisplayLines::default();
    let _ = write!(lines.top, "SET {}", field.label());
    let value = field.value(clock);
    let _ = match field {
        SettingField::Year => write!(lines.bottom, "{value:04}"),
        _ => write!(lines.bottom, "{value:02}"),
    };
    lines
}

/// Write both rows to the display, padding each to the full width.
pub fn render<D: CharDisplay + ?Sized>(
    display: &mut D,
    lines: &DisplayLines,
) {
    for (row, line) in [&lines.top, &lines.bottom].into_iter().enumerate() {
        let mut padded: DisplayLine = line.clone();
        while padded.len() < DISPLAY_COLUMNS {
            if padded.push(' ').is_err() {
                break;
            }
        }
        display.set_cursor(0, row as u8);
        display.print(&padded);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DriveMode;
    use crate::testing::FakeBoard;

    fn status(
        speed: u8,
        battery: u8,
        mode: DriveMode,
    ) -> VehicleStatus {
        let mut status = VehicleStatus::new();
        status.speed = speed;
        status.battery_percentage = battery;
        status.drive_mode = mode;
        status
    }

    #[test]
    fn test_status_lines() {
        let clock = WallClock::new(2024, 6, 5, 7, 5, 9);
        let lines = format_status(&status(65, 42, DriveMode::Forward), &clock);
        assert_eq!(lines.top.as_str(), "Spd: 65 Bat: 42%");
        assert_eq!(lines.bottom.as_str(), "FORWARD 07:05");
    }

    #[test]
    fn test_status_lines_at_extremes_fit() {
        let clock = WallClock::new(2024, 1, 1, 23, 59, 0);
        let lines = format_status(&status(120, 100, DriveMode::Reverse), &clock);
        assert_eq!(lines.top.as_str(), "Spd:120 Bat:100%");
        assert_eq!(lines.bottom.as_str(), "REVERSE 23:59");

        let lines = format_status(&status(0, 0, DriveMode::Normal), &WallClock::EPOCH);
        assert_eq!(lines.top.as_str(), "Spd:  0 Bat:  0%");
        assert_eq!(lines.bottom.as_str(), "NORMAL 00:00");
    }

    #[test]
    fn test_time_set_prompt() {
        let clock = WallClock::new(2031, 6, 5, 7, 5, 9);
        let lines = format_time_set_prompt(SettingField::Hours, &clock);
        assert_eq!(lines.top.as_str(), "SET HOURS");
        assert_eq!(lines.bottom.as_str(), "07");

        let lines = format_time_set_prompt(SettingField::Year, &clock);
        assert_eq!(lines.top.as_str(), "SET YEAR");
        assert_eq!(lines.bottom.as_str(), "2031");
    }

    #[test]
    fn test_render_overwrites_stale_text() {
        let mut board = FakeBoard::new();
        let clock = WallClock::new(2024, 6, 5, 7, 5, 9);

        render(&mut board, &format_status(&status(65, 42, DriveMode::Forward), &clock));
        assert_eq!(board.row(1), "FORWARD 07:05");

        render(&mut board, &format_status(&status(65, 42, DriveMode::Normal), &clock));
        assert_eq!(board.row(0), "Spd: 65 Bat: 42%");
        assert_eq!(board.row(1), "NORMAL 07:05");
    }
}
