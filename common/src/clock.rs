//! Software wall clock.
//!
//! Kept in RAM and advanced by the main loop's one-second timer; no RTC
//! peripheral is involved.
//!
//! # Calendar Limitations
//!
//! Carries run seconds → minutes → hours → day and stop there. The day is not
//! reset at month end and month/year never advance from ticking; only the
//! time-set editor changes them. This matches the deployed cluster's
//! behaviour and is kept until a calendar rule is agreed.

/// In-memory date and time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    /// Hour of day (0-23).
    pub hours: u8,
    /// Minute (0-59).
    pub minutes: u8,
    /// Second (0-59).
    pub seconds: u8,
    /// Day of month (1-30 when set; ticking may carry past 30).
    pub day: u8,
    /// Month (1-12).
    pub month: u8,
    /// Year (2024 and later).
    pub year: u16,
}

impl WallClock {
    /// Midnight, 1 January 2024.
    pub const EPOCH: Self = Self::new(2024, 1, 1, 0, 0, 0);

    /// Build a clock from its fields.
    pub const fn new(
        year: u16,
        month: u8,
        day: u8,
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            day,
            month,
            year,
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.add_minute();
        }
    }

    /// Advance by one minute, carrying into hours.
    fn add_minute(&mut self) {
        self.minutes += 1;
        if self.minutes >= 60 {
            self.minutes = 0;
            self.add_hour();
        }
    }

    /// Advance by one hour, carrying into the day.
    fn add_hour(&mut self) {
        self.hours += 1;
        if self.hours >= 24 {
            self.hours = 0;
            // No month-end rollover, see module docs
            self.day = self.day.saturating_add(1);
        }
    }
}

impl Default for WallClock {
    fn default() -> Self { Self::EPOCH }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_epoch() {
        let clock = WallClock::default();
        assert_eq!((clock.hours, clock.minutes, clock.seconds), (0, 0, 0));
        assert_eq!((clock.day, clock.month, clock.year), (1, 1, 2024));
    }

    #[test]
    fn test_tick_seconds() {
        let mut clock = WallClock::EPOCH;
        clock.tick();
        assert_eq!(clock.seconds, 1);
    }

    #[test]
    fn test_hour_minute_second_carry() {
        let mut clock = WallClock::EPOCH;
        for _ in 0..3661 {
            clock.tick();
        }
        assert_eq!((clock.hours, clock.minutes, clock.seconds), (1, 1, 1));
        assert_eq!(clock.day, 1);
    }

    #[test]
    fn test_midnight_advances_day_only() {
        let mut clock = WallClock::new(2024, 6, 5, 23, 59, 59);
        clock.tick();
        assert_eq!(clock, WallClock::new(2024, 6, 6, 0, 0, 0));
    }

    #[test]
    fn test_day_does_not_roll_into_month() {
        let mut clock = WallClock::new(2024, 12, 30, 23, 59, 59);
        clock.tick();
        assert_eq!(clock.day, 31);
        assert_eq!(clock.month, 12);
        assert_eq!(clock.year, 2024);
    }

    #[test]
    fn test_day_saturates() {
        let mut clock = WallClock::new(2024, 1, u8::MAX, 23, 59, 59);
        clock.tick();
        assert_eq!(clock.day, u8::MAX);
        assert_eq!(clock.hours, 0);
    }
}
