//! Wraparound-safe periodic timers for the main loop.
//!
//! Elapsed time is always `now.wrapping_sub(last)`, so the 32-bit millisecond
//! counter may wrap (every ~49.7 days) without a missed or doubled event.

/// Fires once per `period_ms` of monotonic time.
///
/// Each firing advances the reference by exactly one period, so the number
/// of firings over a run is `floor(elapsed / period)` however irregularly the
/// timer is polled. A late poll fires once; the backlog is worked off on the
/// following polls.
#[derive(Clone, Copy, Debug)]
pub struct PeriodicTimer {
    period_ms: u32,
    last_ms: u32,
}

impl PeriodicTimer {
    /// Create a timer whose first firing is due `period_ms` after `start_ms`.
    pub const fn new(
        period_ms: u32,
        start_ms: u32,
    ) -> Self {
        Self {
            period_ms,
            last_ms: start_ms,
        }
    }

    /// Milliseconds since the reference point.
    #[inline]
    pub const fn elapsed(
        &self,
        now_ms: u32,
    ) -> u32 {
        now_ms.wrapping_sub(self.last_ms)
    }

    /// Whether a firing is due at `now_ms` (does not consume it).
    #[inline]
    pub const fn is_due(
        &self,
        now_ms: u32,
    ) -> bool {
        self.elapsed(now_ms) >= self.period_ms
    }

    /// Consume one firing if due.
    pub fn poll(
        &mut self,
        now_ms: u32,
    ) -> bool {
        if self.is_due(now_ms) {
            self.last_ms = self.last_ms.wrapping_add(self.period_ms);
            true
        } else {
            false
        }
    }

    /// Drop any backlog and restart the period at `now_ms`.
    #[inline]
    pub fn rearm(
        &mut self,
        now_ms: u32,
    ) {
        self.last_ms = now_ms;
    }

    /// Configured period.
    #[inline]
    pub const fn period_ms(&self) -> u32 { self.period_ms }
}

// =============================================================================
// Unit Tests
// =============================================================================
