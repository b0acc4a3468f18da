//! Board configuration for the Pico 2 cluster.
//!
//! # Pin Map
//!
//! | Function            | GPIO | Notes                     |
//! |---------------------|------|---------------------------|
//! | Key switch          | 2    | Active-low, pull-up       |
//! | Side stand switch   | 3    | Active-low, pull-up       |
//! | Left indicator      | 4    | Lamp driver, high = on    |
//! | Right indicator     | 5    | Lamp driver, high = on    |
//! | Mode button         | 12   | Active-low, pull-up       |
//! | Set-time button     | 13   | Active-low, pull-up       |
//! | Display DC          | 16   | ST7789 data/command       |
//! | Display CS          | 17   |                           |
//! | Display CLK         | 18   | SPI0 CLK                  |
//! | Display MOSI        | 19   | SPI0 TX                   |
//! | Display backlight   | 20   |                           |
//! | Battery sense       | 26   | ADC0                      |
//! | Speed sense         | 27   | ADC1                      |
//! | Potentiometer       | 28   | ADC2                      |

// =============================================================================
// Main Loop
// =============================================================================

/// Pause between main-loop iterations, letting the sensor task run.
pub const POLL_INTERVAL_MS: u64 = 1;

// =============================================================================
// Analog Sampling
// =============================================================================

/// Interval between ADC sweeps over all three channels.
pub const SENSOR_SAMPLE_PERIOD_MS: u64 = 10;

/// Upper bound for a single conversion before the channel is marked timed out.
pub const SENSOR_TIMEOUT_MS: u64 = 5;

/// Longest wait at boot for the first ADC sweep before the main loop starts.
pub const FIRST_SWEEP_TIMEOUT_MS: u64 = 100;

const _: () = assert!(SENSOR_TIMEOUT_MS < SENSOR_SAMPLE_PERIOD_MS);
const _: () = assert!(FIRST_SWEEP_TIMEOUT_MS > SENSOR_SAMPLE_PERIOD_MS + 3 * SENSOR_TIMEOUT_MS);
const _: () = assert!(POLL_INTERVAL_MS < SENSOR_SAMPLE_PERIOD_MS);

// =============================================================================
// Display
// =============================================================================

/// Native panel width before rotation (ST7789 on PIM715: 240x320 portrait).
pub const PANEL_NATIVE_WIDTH: u16 = 240;

/// Native panel height before rotation.
pub const PANEL_NATIVE_HEIGHT: u16 = 320;

/// SPI clock for the display. The ST7789 accepts up to 62.5 MHz.
pub const DISPLAY_SPI_HZ: u32 = 40_000_000;

/// Scratch buffer size for the display interface.
pub const DISPLAY_BUFFER_LEN: usize = 512;

const _: () = assert!(DISPLAY_SPI_HZ <= 62_500_000);

// =============================================================================
// Flash Journal
// =============================================================================

/// Total on-board flash (Pico 2: 4 MiB).
pub const FLASH_SIZE: usize = 4 * 1024 * 1024;

/// NOR erase granularity of the on-board flash.
pub const FLASH_SECTOR: u32 = 4096;

/// Start of the journal region, as an offset from the start of flash.
/// Must match the end of the `FLASH` region in `memory.x`.
pub const JOURNAL_OFFSET: u32 = 0x30_0000;

/// Journal region length (the last 1 MiB of flash).
pub const JOURNAL_LEN: u32 = 0x10_0000;

const _: () = assert!(JOURNAL_OFFSET as usize + JOURNAL_LEN as usize == FLASH_SIZE);
const _: () = assert!(JOURNAL_OFFSET % FLASH_SECTOR == 0);
const _: () = assert!(JOURNAL_LEN % FLASH_SECTOR == 0);
const _: () = assert!(JOURNAL_LEN >= 2 * FLASH_SECTOR);
