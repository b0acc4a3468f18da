//! Display driver for Pimoroni PIM715 Display Pack 2.8" (ST7789).
//!
//! Pin mapping for PIM715:
//! - CS: GPIO17
//! - DC: GPIO16
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - Backlight: GPIO20
//! - Reset: Tied to RUN pin (resets with Pico)
//!
//! The panel is driven through `mipidsi` and wrapped in a
//! [`TextPanel`](cluster_common::TextPanel) to act as the 16×2 character display.

use cluster_common::InitError;
use cluster_pico2::config::{DISPLAY_SPI_HZ, PANEL_NATIVE_HEIGHT, PANEL_NATIVE_WIDTH};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::{Builder, NoResetPin};

/// SPI device for the panel (exclusive bus, software chip select).
type PanelSpi<'d> = ExclusiveDevice<Spi<'d, SPI0, Blocking>, Output<'d>, NoDelay>;

/// Display type alias for the ST7789 on PIM715 (no reset pin).
pub type Pim715Display<'d> = mipidsi::Display<SpiInterface<'d, PanelSpi<'d>, Output<'d>>, ST7789, NoResetPin>;

/// Initialize the PIM715 display.
///
/// `buffer` is scratch space for the interface's pixel batching.
pub fn init_display<'d>(
    spi: Spi<'d, SPI0, Blocking>,
    cs: Output<'d>,
    dc: Output<'d>,
    buffer: &'d mut [u8],
) -> Result<Pim715Display<'d>, InitError> {
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).map_err(|_| InitError::Display)?;
    let di = SpiInterface::new(spi_device, dc, buffer);

    // Native panel is 240x320 (portrait), rotated 90° for 320x240 (landscape)
    Builder::new(ST7789, di)
        .display_size(PANEL_NATIVE_WIDTH, PANEL_NATIVE_HEIGHT)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut embassy_time::Delay)
        .map_err(|_| InitError::Display)
}

/// SPI configuration for the ST7789 display.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = DISPLAY_SPI_HZ;
    config
}
