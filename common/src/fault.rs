//! Fault taxonomy and accounting.
//!
//! Runtime faults never stop the cluster. They degrade one reading or drop
//! one journal record and are counted here so the binaries can report them.
//! Startup faults ([`InitError`]) are fatal and handled by the binaries
//! before the main loop is entered.

use core::fmt;

/// An analog conversion did not complete within its bounded wait.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorTimeout;

impl fmt::Display for SensorTimeout {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("analog conversion timed out")
    }
}

/// Recoverable runtime fault.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// A stale or sentinel reading was used in place of a fresh sample.
    SensorTimeout,
    /// A journal record could not be persisted and was dropped.
    StorageWriteFailure,
}

impl fmt::Display for Fault {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::SensorTimeout => f.write_str("sensor timeout"),
            Self::StorageWriteFailure => f.write_str("storage write failure"),
        }
    }
}

/// Running fault counts.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultCounters {
    /// Samples replaced by a last-known value.
    pub sensor_timeouts: u32,
    /// Journal records dropped.
    pub storage_failures: u32,
}

impl FaultCounters {
    /// No faults recorded.
    pub const fn new() -> Self {
        Self {
            sensor_timeouts: 0,
            storage_failures: 0,
        }
    }

    /// Count one fault.
    pub fn record(
        &mut self,
        fault: Fault,
    ) {
        match fault {
            Fault::SensorTimeout => self.sensor_timeouts = self.sensor_timeouts.saturating_add(1),
            Fault::StorageWriteFailure => self.storage_failures = self.storage_failures.saturating_add(1),
        }
    }

    /// Add another set of counts to this one.
    pub fn merge(
        &mut self,
        other: &Self,
    ) {
        self.sensor_timeouts = self.sensor_timeouts.saturating_add(other.sensor_timeouts);
        self.storage_failures = self.storage_failures.saturating_add(other.storage_failures);
    }

    /// Total number of faults of any kind.
    #[inline]
    pub const fn total(&self) -> u32 { self.sensor_timeouts.saturating_add(self.storage_failures) }

    /// Whether nothing has been recorded.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.total() == 0 }
}

/// Peripheral that failed to come up at boot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Character display (controller or bus).
    Display,
    /// Analog converter.
    Analog,
    /// Journal storage.
    Storage,
}

impl fmt::Display for InitError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let peripheral = match self {
            Self::Display => "display",
            Self::Analog => "analog converter",
            Self::Storage => "storage",
        };
        write!(f, "peripheral init failed: {peripheral}")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_empty() {
        let counters = FaultCounters::new();
        assert!(counters.is_empty());
        assert_eq!(counters, FaultCounters::default());
    }

    #[test]
    fn test_record_counts_by_kind() {
        let mut counters = FaultCounters::new();
        counters.record(Fault::SensorTimeout);
        counters.record(Fault::SensorTimeout);
        counters.record(Fault::StorageWriteFailure);
        assert_eq!(counters.sensor_timeouts, 2);
        assert_eq!(counters.storage_failures, 1);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn test_merge() {
        let mut total = FaultCounters {
            sensor_timeouts: 1,
            storage_failures: 0,
        };
        total.merge(&FaultCounters {
            sensor_timeouts: 2,
            storage_failures: 5,
        });
        assert_eq!(total.sensor_timeouts, 3);
        assert_eq!(total.storage_failures, 5);
    }

    #[test]
    fn test_record_saturates() {
        let mut counters = FaultCounters {
            sensor_timeouts: u32::MAX,
            storage_failures: 0,
        };
        counters.record(Fault::SensorTimeout);
        assert_eq!(counters.sensor_timeouts, u32::MAX);
    }

    #[test]
    fn test_init_error_message() {
        assert_eq!(InitError::Display.to_string(), "peripheral init failed: display");
        assert_eq!(InitError::Storage.to_string(), "peripheral init failed: storage");
    }
}
