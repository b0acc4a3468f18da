//! Analog sampling and fixed-point scaling.
//!
//! Scaling is integer-only and truncating (`raw * max / 4095`), so a given raw
//! sample always maps to the same displayed value on every target.

use crate::config::{ADC_MAX, BATTERY_MAX_PERCENT, SPEED_MAX_KMH};
use crate::fault::{Fault, FaultCounters};
use crate::hal::{AnalogChannel, AnalogInputs};

// =============================================================================
// Scaling
// =============================================================================

/// Clamp a reading into the 12-bit range.
#[inline]
pub const fn clamp_raw(raw: u16) -> u16 { if raw > ADC_MAX { ADC_MAX } else { raw } }

/// Scale a raw sample onto `0..=max`, truncating.
#[inline]
pub const fn scaled(
    raw: u16,
    max: u16,
) -> u16 {
    (clamp_raw(raw) as u32 * max as u32 / ADC_MAX as u32) as u16
}

/// Battery charge in percent (0-100).
#[inline]
pub const fn battery_pct(raw: u16) -> u8 { scaled(raw, BATTERY_MAX_PERCENT) as u8 }

/// Vehicle speed in km/h (0-120).
#[inline]
pub const fn speed_kmh(raw: u16) -> u8 { scaled(raw, SPEED_MAX_KMH) as u8 }

// =============================================================================
// Sampler
// =============================================================================

/// Samples analog channels, holding the last good reading of each.
///
/// A channel that has never produced a reading reports the sentinel `0`.
pub struct SensorSampler {
    last: [u16; AnalogChannel::COUNT],
}

impl SensorSampler {
    /// Create a sampler with every channel at the sentinel.
    pub const fn new() -> Self {
        Self {
            last: [0; AnalogChannel::COUNT],
        }
    }

    /// Sample `channel`, falling back to its last-known value on timeout.
    pub fn sample<A: AnalogInputs + ?Sized>(
        &mut self,
        adc: &mut A,
        channel: AnalogChannel,
        faults: &mut FaultCounters,
    ) -> u16 {
        let slot = &mut self.last[channel.index()];
        match adc.read_analog(channel) {
            Ok(raw) => {
                *slot = clamp_raw(raw);
                *slot
            }
            Err(_) => {
                faults.record(Fault::SensorTimeout);
                *slot
            }
        }
    }

    /// Last good reading of `channel`.
    #[inline]
    pub const fn last_known(
        &self,
        channel: AnalogChannel,
    ) -> u16 {
        self.last[channel.index()]
    }
}

impl Default for SensorSampler {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
