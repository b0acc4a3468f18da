//! Button edge detection.
//!
//! The drive-mode and set-time buttons act on presses, not on levels: a button
//! held across many loop iterations produces exactly one event. Contact bounce
//! is filtered by the GPIO layer, so no time-based debounce happens here.

/// Whether a digital input just went from released to pressed.
#[inline]
pub const fn rising_edge(
    current: bool,
    previous: bool,
) -> bool {
    current && !previous
}

/// Per-button edge detector.
#[derive(Clone, Copy, Debug)]
pub struct ButtonState {
    was_pressed: bool,
}

impl ButtonState {
    /// Create a button state (not pressed).
    pub const fn new() -> Self { Self { was_pressed: false } }

    /// Create a button state that is already held, so the press in progress
    /// does not count as a new edge.
    pub const fn held() -> Self { Self { was_pressed: true } }

    /// Returns true only on the rising edge (button just pressed).
    pub fn just_pressed(
        &mut self,
        is_pressed: bool,
    ) -> bool {
        let edge = rising_edge(is_pressed, self.was_pressed);
        self.was_pressed = is_pressed;
        edge
    }

    /// Adopt the current level without reporting an edge.
    #[inline]
    pub fn resync(
        &mut self,
        is_pressed: bool,
    ) {
        self.was_pressed = is_pressed;
    }

    /// Level seen on the last sample.
    #[inline]
    pub const fn is_pressed(&self) -> bool { self.was_pressed }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
