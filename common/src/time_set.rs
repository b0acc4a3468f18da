//! Interactive wall-clock editor.
//!
//! While active the editor owns the potentiometer and both buttons; the main
//! loop skips status sampling, blinking, journaling and ticking. It is driven
//! as a step function: the main loop asks [`TimeSetController::pass_due`]
//! every iteration and runs one [`TimeSetController::pass`] when it is.
//!
//! # Edit Pass
//!
//! Passes are spaced [`TIME_SET_PASS_MS`] apart. Each pass, in order:
//!
//! 1. Mode button held → select the next field
//! 2. Set-time button press → leave the editor after this pass
//! 3. Overwrite the selected field from the potentiometer
//!
//! The mode button acts on its level: holding it steps one field per pass,
//! with the pass spacing as its only debounce. Set-time acts on a new press,
//! so the press that opened the editor has to be released before one closes it.
//! Both buttons are checked on every pass, so pressing both at once selects
//! the next field, writes it, and exits.

use crate::button::ButtonState;
use crate::clock::WallClock;
use crate::config::{DAYS_PER_MONTH, TIME_SET_PASS_MS, YEAR_BASE, YEAR_SPAN};
use crate::sampler::scaled;

// =============================================================================
// Editable Fields
// =============================================================================

/// Clock field selected for editing.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingField {
    #[default]
    Hours,
    Minutes,
    Day,
    Month,
    Year,
}

impl SettingField {
    /// Cycle: Hours -> Minutes -> Day -> Month -> Year -> Hours
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Hours => Self::Minutes,
            Self::Minutes => Self::Day,
            Self::Day => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::Hours,
        }
    }

    /// Prompt label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hours => "HOURS",
            Self::Minutes => "MINUTES",
            Self::Day => "DAY",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
        }
    }

    /// Value the potentiometer selects for this field.
    ///
    /// `offset + raw * span / 4095`, capped at the field's maximum so the
    /// top of the travel lands on the last valid value (23 h, 59 min, day 30,
    /// month 12) rather than one past it.
    pub const fn from_raw(
        self,
        raw: u16,
    ) -> u16 {
        let (offset, span, max) = match self {
            Self::Hours => (0, 24, 23),
            Self::Minutes => (0, 60, 59),
            Self::Day => (1, DAYS_PER_MONTH as u16, DAYS_PER_MONTH as u16),
            Self::Month => (1, 12, 12),
            Self::Year => (YEAR_BASE, YEAR_SPAN, YEAR_BASE + YEAR_SPAN),
        };
        let value = offset + scaled(raw, span);
        if value > max { max } else { value }
    }

    /// Current value of this field in `clock`.
    pub const fn value(
        self,
        clock: &WallClock,
    ) -> u16 {
        match self {
            Self::Hours => clock.hours as u16,
            Self::Minutes => clock.minutes as u16,
            Self::Day => clock.day as u16,
            Self::Month => clock.month as u16,
            Self::Year => clock.year,
        }
    }

    /// Overwrite this field of `clock` from a potentiometer sample.
    pub fn apply(
        self,
        clock: &mut WallClock,
        raw: u16,
    ) {
        let value = self.from_raw(raw);
        match self {
            Self::Hours => clock.hours = value as u8,
            Self::Minutes => clock.minutes = value as u8,
            Self::Day => clock.day = value as u8,
            Self::Month => clock.month = value as u8,
            Self::Year => clock.year = value,
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Inputs sampled for one edit pass.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct EditInputs {
    /// Mode button level.
    pub mode_pressed: bool,
    /// Set-time button level.
    pub set_pressed: bool,
    /// Potentiometer raw sample.
    pub pot_raw: u16,
}

/// Result of one edit pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassOutcome {
    /// Field written on this pass.
    pub field: SettingField,
    /// Whether the mode button selected a new field.
    pub advanced: bool,
    /// Whether the editor closed after this pass.
    pub exited: bool,
}

/// Time-set state machine: inactive, or active on one [`SettingField`].
pub struct TimeSetController {
    active: bool,
    field: SettingField,
    last_pass_ms: u32,
    /// Mode button was held when the editor opened and has not been released since.
    mode_held_on_entry: bool,
    set_button: ButtonState,
}

impl TimeSetController {
    /// Create an inactive editor.
    pub const fn new() -> Self {
        Self {
            active: false,
            field: SettingField::Hours,
            last_pass_ms: 0,
            mode_held_on_entry: false,
            set_button: ButtonState::new(),
        }
    }

    /// Whether the editor currently owns the inputs.
    #[inline]
    pub const fn is_active(&self) -> bool { self.active }

    /// Field being edited.
    #[inline]
    pub const fn field(&self) -> SettingField { self.field }

    /// Open the editor on the hours field.
    ///
    /// The set-time press that opened it is treated as still held, and a mode
    /// button already held is ignored until released, so neither counts on the
    /// first pass.
    pub fn enter(
        &mut self,
        now_ms: u32,
        mode_pressed: bool,
    ) {
        self.active = true;
        self.field = SettingField::Hours;
        self.last_pass_ms = now_ms;
        self.set_button = ButtonState::held();
        self.mode_held_on_entry = mode_pressed;
    }

    /// Whether the next pass is due at `now_ms`.
    #[inline]
    pub const fn pass_due(
        &self,
        now_ms: u32,
    ) -> bool {
        self.active && now_ms.wrapping_sub(self.last_pass_ms) >= TIME_SET_PASS_MS
    }

    /// Run one edit pass against `clock`.
    pub fn pass(
        &mut self,
        now_ms: u32,
        inputs: EditInputs,
        clock: &mut WallClock,
    ) -> PassOutcome {
        self.last_pass_ms = now_ms;

        if !inputs.mode_pressed {
            self.mode_held_on_entry = false;
        }
        let advanced = inputs.mode_pressed && !self.mode_held_on_entry;
        if advanced {
            self.field = self.field.next();
        }

        let exited = self.set_button.just_pressed(inputs.set_pressed);

        self.field.apply(clock, inputs.pot_raw);

        if exited {
            self.active = false;
        }

        PassOutcome {
            field: self.field,
            advanced,
            exited,
        }
    }
}

impl Default for TimeSetController {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
