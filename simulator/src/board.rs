//! Desktop implementation of the cluster's hardware traits.
//!
//! Inputs come from [`Controls`] and the display is a [`TextPanel`] over the
//! simulator framebuffer. The indicator lamps are plain flags that the main
//! loop draws as discs in the top corners of the panel. The journal is
//! appended to a real file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use cluster_common::fault::SensorTimeout;
use cluster_common::{AnalogChannel, AnalogInputs, CharDisplay, DigitalInput, DigitalIo, DigitalOutput, LogStorage, Monotonic, TextPanel};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::SimulatorDisplay;

use crate::controls::Controls;

/// Simulated cluster hardware.
pub struct SimBoard {
    pub controls: Controls,
    pub panel: TextPanel<SimulatorDisplay<Rgb565>>,
    left_lamp: bool,
    right_lamp: bool,
    journal_dir: PathBuf,
    start: Instant,
}

impl SimBoard {
    /// Board whose journal files are created under `journal_dir`.
    pub fn new(
        display: SimulatorDisplay<Rgb565>,
        journal_dir: PathBuf,
    ) -> Self {
        Self {
            controls: Controls::new(),
            panel: TextPanel::new(display),
            left_lamp: false,
            right_lamp: false,
            journal_dir,
            start: Instant::now(),
        }
    }

    /// Indicator lamp levels (left, right).
    #[inline]
    pub const fn lamps(&self) -> (bool, bool) { (self.left_lamp, self.right_lamp) }
}

impl AnalogInputs for SimBoard {
    fn read_analog(
        &mut self,
        channel: AnalogChannel,
    ) -> Result<u16, SensorTimeout> {
        Ok(self.controls.analog(channel))
    }
}

impl DigitalIo for SimBoard {
    fn read_digital(
        &mut self,
        pin: DigitalInput,
    ) -> bool {
        self.controls.digital(pin)
    }

    fn write_digital(
        &mut self,
        pin: DigitalOutput,
        level: bool,
    ) {
        match pin {
            DigitalOutput::LeftIndicator => self.left_lamp = level,
            DigitalOutput::RightIndicator => self.right_lamp = level,
        }
    }
}

impl CharDisplay for SimBoard {
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

impl LogStorage for SimBoard {
    type Error = io::Error;

    /// Open, append, close: one file open per record.
    fn append_line(
        &mut self,
        path: &str,
        text: &str,
    ) -> Result<(), Self::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.journal_dir.join(path))?;
        file.write_all(text.as_bytes())
    }
}

impl Monotonic for SimBoard {
    fn monotonic_ms(&mut self) -> u32 { self.start.elapsed().as_millis() as u32 }
}

// =============================================================================
// Unit Tests
// =============================================================================
