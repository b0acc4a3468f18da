//! Hardware boundary of the cluster core.
//!
//! The core never touches a peripheral directly. Each target (the RP2350
//! firmware, the desktop simulator, the test double) implements these traits
//! once, and [`Cluster`](crate::cluster::Cluster) drives any [`Board`].
//!
//! Digital levels are logical: `true` means *asserted* (button pressed, key
//! on, stand down), whatever the electrical polarity of the pin is. Boards with
//! active-low wiring invert at this boundary.

use crate::fault::SensorTimeout;

// =============================================================================
// Channel and Pin Identifiers
// =============================================================================

/// Analog inputs sampled by the core.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Battery sense divider.
    Battery,
    /// Vehicle speed sensor.
    Speed,
    /// Time-set potentiometer.
    Potentiometer,
}

impl AnalogChannel {
    /// Number of analog channels.
    pub const COUNT: usize = 3;

    /// All channels, in sampling order.
    pub const ALL: [Self; Self::COUNT] = [Self::Battery, Self::Speed, Self::Potentiometer];

    /// Dense index for per-channel tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Battery => 0,
            Self::Speed => 1,
            Self::Potentiometer => 2,
        }
    }
}

/// Digital inputs read by the core.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitalInput {
    /// Ignition key switch.
    KeySwitch,
    /// Side stand switch.
    SideStand,
    /// Drive-mode button (also "next field" while setting the time).
    ModeButton,
    /// Set-time button (enters and leaves the time-set mode).
    SetTimeButton,
}

/// Digital outputs driven by the core.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitalOutput {
    /// Left indicator lamp.
    LeftIndicator,
    /// Right indicator lamp.
    RightIndicator,
}

// =============================================================================
// Services
// =============================================================================

/// Bounded-time analog sampling.
pub trait AnalogInputs {
    /// Read a raw 12-bit sample.
    ///
    /// Must return within a bounded time. A conversion that does not complete
    /// in time yields `Err(SensorTimeout)`; the caller falls back to its
    /// last-known value.
    fn read_analog(
        &mut self,
        channel: AnalogChannel,
    ) -> Result<u16, SensorTimeout>;
}

/// Digital pin access.
pub trait DigitalIo {
    /// Read the logical level of an input (`true` = asserted).
    fn read_digital(
        &mut self,
        pin: DigitalInput,
    ) -> bool;

    /// Drive an output (`true` = lamp on).
    fn write_digital(
        &mut self,
        pin: DigitalOutput,
        level: bool,
    );
}

/// Character display with a text cursor.
pub trait CharDisplay {
    /// Move the cursor to `col`, `row` (both zero-based).
    fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    );

    /// Write `text` at the cursor, advancing it. Text past the last column is dropped.
    fn print(
        &mut self,
        text: &str,
    );

    /// Blank the whole display and home the cursor.
    fn clear(&mut self);
}

/// Append-only line storage.
pub trait LogStorage {
    /// Backend error, only ever counted by the core.
    type Error;

    /// Append `text` (already line-terminated) to the file at `path`.
    fn append_line(
        &mut self,
        path: &str,
        text: &str,
    ) -> Result<(), Self::Error>;
}

/// Free-running millisecond counter.
pub trait Monotonic {
    /// Milliseconds since an arbitrary epoch. Wraps at `u32::MAX`; callers
    /// compare with wrapping subtraction only.
    fn monotonic_ms(&mut self) -> u32;
}

/// Everything the main loop needs from a target.
pub trait Board: AnalogInputs + DigitalIo + CharDisplay + LogStorage + Monotonic {}

impl<T> Board for T where T: AnalogInputs + DigitalIo + CharDisplay + LogStorage + Monotonic {}
