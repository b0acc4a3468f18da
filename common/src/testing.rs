//! In-memory board used by the unit tests.

use crate::config::{DISPLAY_COLUMNS, DISPLAY_ROWS};
use crate::fault::SensorTimeout;
use crate::hal::{AnalogChannel, AnalogInputs, CharDisplay, DigitalInput, DigitalIo, DigitalOutput, LogStorage, Monotonic};

/// Storage failure injected by [`FakeBoard`].
#[derive(Debug)]
pub struct WriteRejected;

/// Scriptable board: tests set the input fields and inspect the outputs.
pub struct FakeBoard {
    pub now_ms: u32,

    pub battery: u16,
    pub speed: u16,
    pub pot: u16,
    pub battery_fault: Option<SensorTimeout>,
    pub speed_fault: Option<SensorTimeout>,
    pub pot_fault: Option<SensorTimeout>,

    pub key: bool,
    pub side_stand: bool,
    pub mode_button: bool,
    pub set_button: bool,

    pub left_lamp: bool,
    pub right_lamp: bool,

    pub screen: [[char; DISPLAY_COLUMNS]; DISPLAY_ROWS],
    pub cursor: (usize, usize),
    pub clears: u32,

    pub appended: Vec<(String, String)>,
    pub reject_writes: bool,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            battery: 0,
            speed: 0,
            pot: 0,
            battery_fault: None,
            speed_fault: None,
            pot_fault: None,
            key: false,
            side_stand: false,
            mode_button: false,
            set_button: false,
            left_lamp: false,
            right_lamp: false,
            screen: [[' '; DISPLAY_COLUMNS]; DISPLAY_ROWS],
            cursor: (0, 0),
            clears: 0,
            appended: Vec::new(),
            reject_writes: false,
        }
    }

    /// Display row with trailing blanks removed.
    pub fn row(
        &self,
        row: usize,
    ) -> String {
        let text: String = self.screen[row].iter().collect();
        text.trim_end().to_string()
    }
}

impl AnalogInputs for FakeBoard {
    fn read_analog(
        &mut self,
        channel: AnalogChannel,
    ) -> Result<u16, SensorTimeout> {
        let (raw, fault) = match channel {
            AnalogChannel::Battery => (self.battery, self.battery_fault),
            AnalogChannel::Speed => (self.speed, self.speed_fault),
            AnalogChannel::Potentiometer => (self.pot, self.pot_fault),
        };
        match fault {
            Some(timeout) => Err(timeout),
            None => Ok(raw),
        }
    }
}

impl DigitalIo for FakeBoard {
    fn read_digital(
        &mut self,
        pin: DigitalInput,
    ) -> bool {
        match pin {
            DigitalInput::KeySwitch => self.key,
            DigitalInput::SideStand => self.side_stand,
            DigitalInput::ModeButton => self.mode_button,
            DigitalInput::SetTimeButton => self.set_button,
        }
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

impl CharDisplay for FakeBoard {
    fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    ) {
        self.cursor = (usize::from(col), usize::from(row));
    }

    fn print(
        &mut self,
        text: &str,
    ) {
        let (mut col, row) = self.cursor;
        for ch in text.chars() {
            if col >= DISPLAY_COLUMNS || row >= DISPLAY_ROWS {
                break;
            }
            self.screen[row][col] = ch;
            col += 1;
        }
        self.cursor = (col, row);
    }

    fn clear(&mut self) {
        self.screen = [[' '; DISPLAY_COLUMNS]; DISPLAY_ROWS];
        self.cursor = (0, 0);
        self.clears += 1;
    }
}

impl LogStorage for FakeBoard {
    type Error = WriteRejected;

    fn append_line(
        &mut self,
        path: &str,
        text: &str,
    ) -> Result<(), Self::Error> {
        if self.reject_writes {
            return Err(WriteRejected);
        }
        self.appended.push((path.to_string(), text.to_string()));
        Ok(())
    }
}

impl Monotonic for FakeBoard {
    fn monotonic_ms(&mut self) -> u32 { self.now_ms }
}
