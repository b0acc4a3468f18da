//! Compile-time configuration for the cluster core.
//!
//! All periods are in milliseconds of the board's monotonic counter. Every
//! group carries `const` assertions so a bad edit fails the build instead of
//! producing a cluster that silently misbehaves.

// =============================================================================
// Analog Front End
// =============================================================================

/// Full-scale reading of the 12-bit converter.
pub const ADC_MAX: u16 = 4095;

/// Speed shown at full-scale input (km/h).
pub const SPEED_MAX_KMH: u16 = 120;

/// Battery charge shown at full-scale input (%).
pub const BATTERY_MAX_PERCENT: u16 = 100;

const _: () = assert!(ADC_MAX == (1 << 12) - 1);
// Scaled values must fit the `u8` fields of the status record
const _: () = assert!(SPEED_MAX_KMH <= u8::MAX as u16);
const _: () = assert!(BATTERY_MAX_PERCENT <= u8::MAX as u16);

// =============================================================================
// Main Loop Cadence
// =============================================================================

/// Interval between journal records.
pub const LOG_PERIOD_MS: u32 = 5_000;

/// Interval between wall-clock ticks.
pub const CLOCK_TICK_MS: u32 = 1_000;

/// Hazard indicator half-period (on for 500 ms, off for 500 ms).
pub const INDICATOR_PERIOD_MS: u32 = 500;

/// Spacing between edit passes while the time-set mode is active.
/// Doubles as the button debounce for the mode and set-time buttons.
pub const TIME_SET_PASS_MS: u32 = 200;

const _: () = assert!(INDICATOR_PERIOD_MS < CLOCK_TICK_MS);
const _: () = assert!(CLOCK_TICK_MS < LOG_PERIOD_MS);
const _: () = assert!(TIME_SET_PASS_MS > 0);

// =============================================================================
// Character Display
// =============================================================================

/// Visible columns per display row.
pub const DISPLAY_COLUMNS: usize = 16;

/// Number of display rows.
pub const DISPLAY_ROWS: usize = 2;

// =============================================================================
// Journal
// =============================================================================

/// File the journal records are appended to.
pub const LOG_PATH: &str = "log.txt";

/// Capacity of one formatted journal record, CRLF included.
/// The longest record (`255/12/2034 23:59:59,Speed:120,Bat:100%,Mode:2\r\n`) is 48 bytes.
pub const LOG_RECORD_LEN: usize = 64;

const _: () = assert!(LOG_RECORD_LEN >= 48);

// =============================================================================
// Wall Clock Editing
// =============================================================================

/// First year selectable from the potentiometer.
pub const YEAR_BASE: u16 = 2024;

/// Number of years the potentiometer sweeps above [`YEAR_BASE`].
pub const YEAR_SPAN: u16 = 10;

/// Highest day the editor allows (months are treated as 30 days long).
pub const DAYS_PER_MONTH: u8 = 30;
