//! Hazard-style indicator blink timing.

use crate::config::INDICATOR_PERIOD_MS;
use crate::schedule::PeriodicTimer;

/// Decides when both indicators toggle.
///
/// Left and right are never timed separately; the blinker only reports that
/// a toggle is due and the status record flips both lamps together.
#[derive(Clone, Copy, Debug)]
pub struct IndicatorBlinker {
    timer: PeriodicTimer,
}

impl IndicatorBlinker {
    /// Create a blinker whose first toggle is due one period after `start_ms`.
    pub const fn new(start_ms: u32) -> Self {
        Self {
            timer: PeriodicTimer::new(INDICATOR_PERIOD_MS, start_ms),
        }
    }

    /// Returns true when a toggle is due at `now_ms`.
    #[inline]
    pub fn toggle_due(
        &mut self,
        now_ms: u32,
    ) -> bool {
        self.timer.poll(now_ms)
    }

    /// Restart the blink period at `now_ms`.
    #[inline]
    pub fn rearm(
        &mut self,
        now_ms: u32,
    ) {
        self.timer.rearm(now_ms);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
