//! Journal record formatting.
//!
//! One record per line, CRLF-terminated:
//!
//! ```text
//! DD/MM/YYYY HH:MM:SS,Speed:S,Bat:B%,Mode:M
//! 05/06/2024 07:05:09,Speed:65,Bat:42%,Mode:1
//! ```
//!
//! `M` is the numeric [`DriveMode`](crate::status::DriveMode) code.

use core::fmt::Write;

use heapless::String;

use crate::clock::WallClock;
use crate::config::LOG_RECORD_LEN;
use crate::status::VehicleStatus;

/// One formatted journal record.
pub type LogRecord = String<LOG_RECORD_LEN>;

/// Format the journal record for `status` at `clock`.
pub fn format_log_record(
    status: &VehicleStatus,
    clock: &WallClock,
) -> LogRecord {
    let mut record = LogRecord::new();
    // Capacity covers the widest possible field values
    let _ = write!(
        record,
        "{:02}/{:02}/{:04} {:02}:{:02}:{:02},Speed:{},Bat:{}%,Mode:{}\r\n",
        clock.day,
        clock.month,
        clock.year,
        clock.hours,
        clock.minutes,
        clock.seconds,
        status.speed,
        status.battery_percentage,
        status.drive_mode.code()
    );
    record
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DriveMode;

    #[test]
    fn test_record_format() {
        let mut status = VehicleStatus::new();
        status.speed = 65;
        status.battery_percentage = 42;
        status.drive_mode = DriveMode::Forward;
        let clock = WallClock::new(2024, 6, 5, 7, 5, 9);

        assert_eq!(
            format_log_record(&status, &clock).as_str(),
            "05/06/2024 07:05:09,Speed:65,Bat:42%,Mode:1\r\n"
        );
    }

    #[test]
    fn test_record_widest_values_fit() {
        let mut status = VehicleStatus::new();
        status.speed = 120;
        status.battery_percentage = 100;
        status.drive_mode = DriveMode::Reverse;
        let clock = WallClock::new(2034, 12, u8::MAX, 23, 59, 59);

        let record = format_log_record(&status, &clock);
        assert_eq!(record.as_str(), "255/12/2034 23:59:59,Speed:120,Bat:100%,Mode:2\r\n");
        assert!(record.ends_with("\r\n"));
    }

    #[test]
    fn test_record_zero_values() {
        let record = format_log_record(&VehicleStatus::new(), &WallClock::EPOCH);
        assert_eq!(record.as_str(), "01/01/2024 00:00:00,Speed:0,Bat:0%,Mode:0\r\n");
    }
}
