//! RP2350 implementation of the cluster's hardware traits.
//!
//! Analog readings come from the sensor task's latest sweep, digital I/O from
//! embassy GPIO, the display is a [`TextPanel`] over the ST7789 and the journal
//! lives in the last megabyte of flash.

use cluster_common::fault::SensorTimeout;
use cluster_common::{AnalogChannel, AnalogInputs, CharDisplay, DigitalInput, DigitalIo, DigitalOutput, LogStorage, Monotonic, TextPanel};
use cluster_pico2::config::FLASH_SIZE;
use cluster_pico2::{AnalogSnapshot, FlashLog, FlashLogError, channel_reading};
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::{Input, Level, Output};
use embassy_rp::peripherals::FLASH;
use embassy_sync::watch::DynReceiver;
use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

/// On-board QSPI flash in blocking mode.
pub type JournalFlash<'d> = Flash<'d, FLASH, Blocking, FLASH_SIZE>;

/// Switch and button inputs (all active-low with pull-up).
pub struct Switches<'d> {
    pub key: Input<'d>,
    pub side_stand: Input<'d>,
    pub mode: Input<'d>,
    pub set_time: Input<'d>,
}

/// Indicator lamp outputs (high = lamp on).
pub struct Lamps<'d> {
    pub left: Output<'d>,
    pub right: Output<'d>,
}

/// The cluster board: everything [`cluster_common::Cluster::poll`] touches.
pub struct Pico2Board<'d, D> {
    pub analog: DynReceiver<'static, AnalogSnapshot>,
    pub switches: Switches<'d>,
    pub lamps: Lamps<'d>,
    pub panel: TextPanel<D>,
    pub journal: FlashLog<JournalFlash<'d>>,
}

impl<D> AnalogInputs for Pico2Board<'_, D> {
    fn read_analog(
        &mut self,
        channel: AnalogChannel,
    ) -> Result<u16, SensorTimeout> {
        // Boot waits for the first sweep, so a missing one is never expected here
        let snapshot = self.analog.try_get().ok_or(SensorTimeout)?;
        channel_reading(&snapshot, channel)
    }
}

impl<D> DigitalIo for Pico2Board<'_, D> {
    fn read_digital(
        &mut self,
        pin: DigitalInput,
    ) -> bool {
        let input = match pin {
            DigitalInput::KeySwitch => &self.switches.key,
            DigitalInput::SideStand => &self.switches.side_stand,
            DigitalInput::ModeButton => &self.switches.mode,
            DigitalInput::SetTimeButton => &self.switches.set_time,
        };
        // Active-low: pulled to ground when asserted
        input.is_low()
    }

    fn write_digital(
        &mut self,
        pin: DigitalOutput,
        level: bool,
    ) {
        let output = match pin {
            DigitalOutput::LeftIndicator => &mut self.lamps.left,
            DigitalOutput::RightIndicator => &mut self.lamps.right,
        };
        output.set_level(Level::from(level));
    }
}

impl<D: DrawTarget<Color = Rgb565>> CharDisplay for Pico2Board<'_, D> {
    fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    ) {
        self.panel.set_cursor(col, row);
    }

    fn print(
        &mut self,
        text: &str,
    ) {
        self.panel.print(text);
    }

    fn clear(&mut self) { self.panel.clear(); }
}

impl<D> LogStorage for Pico2Board<'_, D> {
    type Error = FlashLogError;

    fn append_line(
        &mut self,
        path: &str,
        text: &str,
    ) -> Result<(), Self::Error> {
        self.journal.append_line(path, text)
    }
}

impl<D> Monotonic for Pico2Board<'_, D> {
    fn monotonic_ms(&mut self) -> u32 { Instant::now().as_millis() as u32 }
}
