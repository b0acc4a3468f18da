//! Keyboard stand-ins for the cluster's switches, buttons and analog inputs.
//!
//! | Key     | Input                             |
//! |---------|-----------------------------------|
//! | `M`     | Mode button (held while down)     |
//! | `S`     | Set-time button (held while down) |
//! | `K`     | Key switch (toggle)               |
//! | `D`     | Side stand (toggle)               |
//! | `Q`/`A` | Speed sensor up / down            |
//! | `W`/`Z` | Battery sense up / down           |
//! | `R`/`F` | Potentiometer up / down           |
//!
//! Analog keys move the raw 12-bit reading by [`ANALOG_STEP`], saturating at
//! the converter's range.

use cluster_common::config::ADC_MAX;
use cluster_common::{AnalogChannel, DigitalInput};

/// Raw ADC counts per analog key press (~1/32 of full scale).
pub const ANALOG_STEP: u16 = 128;

/// A keyboard control, decoupled from the SDL key codes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    ModeButton,
    SetTimeButton,
    KeySwitch,
    SideStand,
    Raise(AnalogChannel),
    Lower(AnalogChannel),
}

/// Simulated input levels.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Controls {
    mode_button: bool,
    set_button: bool,
    key: bool,
    side_stand: bool,
    analog: [u16; AnalogChannel::COUNT],
}

impl Controls {
    pub const fn new() -> Self {
        Self {
            mode_button: false,
            set_button: false,
            key: false,
            side_stand: false,
            analog: [0; AnalogChannel::COUNT],
        }
    }

    /// Apply a key press. Auto-repeat only affects the analog controls.
    pub fn key_down(
        &mut self,
        control: Control,
        repeat: bool,
    ) {
        match control {
            Control::ModeButton => self.mode_button = true,
            Control::SetTimeButton => self.set_button = true,
            Control::KeySwitch if !repeat => self.key = !self.key,
            Control::SideStand if !repeat => self.side_stand = !self.side_stand,
            Control::KeySwitch | Control::SideStand => {}
            Control::Raise(channel) => {
                let raw = &mut self.analog[channel.index()];
                *raw = raw.saturating_add(ANALOG_STEP).min(ADC_MAX);
            }
            Control::Lower(channel) => {
                let raw = &mut self.analog[channel.index()];
                *raw = raw.saturating_sub(ANALOG_STEP);
            }
        }
    }

    /// Apply a key release. Only the push buttons are momentary.
    pub fn key_up(
        &mut self,
        control: Control,
    ) {
        match control {
            Control::ModeButton => self.mode_button = false,
            Control::SetTimeButton => self.set_button = false,
            _ => {}
        }
    }

    /// Logical level of a digital input.
    pub const fn digital(
        &self,
        pin: DigitalInput,
    ) -> bool {
        match pin {
            DigitalInput::KeySwitch => self.key,
            DigitalInput::SideStand => self.side_stand,
            DigitalInput::ModeButton => self.mode_button,
            DigitalInput::SetTimeButton => self.set_button,
        }
    }

    /// Raw reading of an analog channel.
    #[inline]
    pub const fn analog(
        &self,
        channel: AnalogChannel,
    ) -> u16 {
        self.analog[channel.index()]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
