//! Vehicle status record and its per-cycle update.
//!
//! [`StatusStore`] is the only writer of [`VehicleStatus`]. Each cycle runs
//! the same fixed sequence:
//!
//! 1. Battery channel → `battery_percentage`
//! 2. Speed channel → `speed`
//! 3. Key switch and side stand → copied straight from the pins
//! 4. Mode button rising edge → next [`DriveMode`]
//! 5. Indicator blink → both lamps flipped and written out together

use crate::button::ButtonState;
use crate::fault::FaultCounters;
use crate::hal::{AnalogChannel, AnalogInputs, DigitalInput, DigitalIo, DigitalOutput};
use crate::indicator::IndicatorBlinker;
use crate::sampler::{SensorSampler, battery_pct, speed_kmh};

// =============================================================================
// Drive Mode
// =============================================================================

/// Selected drive mode, cycled by the mode button.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// Neutral / parked.
    #[default]
    Normal,
    /// Driving forward.
    Forward,
    /// Reversing.
    Reverse,
}

impl DriveMode {
    /// Cycle to the next mode: Normal -> Forward -> Reverse -> Normal
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Normal => Self::Forward,
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Normal,
        }
    }

    /// Name shown on the display.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Forward => "FORWARD",
            Self::Reverse => "REVERSE",
        }
    }

    /// Numeric code written to the journal.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Forward => 1,
            Self::Reverse => 2,
        }
    }
}

// =============================================================================
// Status Record
// =============================================================================

/// Snapshot of everything the cluster shows and journals.
///
/// The indicator lamps are private so they can only change together.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VehicleStatus {
    /// Speed in km/h (0-120).
    pub speed: u8,
    /// Battery charge in percent (0-100).
    pub battery_percentage: u8,
    /// Ignition key on.
    pub key_status: bool,
    /// Side stand down.
    pub side_stand_status: bool,
    /// Selected drive mode.
    pub drive_mode: DriveMode,
    left_indicator: bool,
    right_indicator: bool,
}

impl VehicleStatus {
    /// Record with all readings zeroed, mode `Normal`, lamps off.
    pub const fn new() -> Self {
        Self {
            speed: 0,
            battery_percentage: 0,
            key_status: false,
            side_stand_status: false,
            drive_mode: DriveMode::Normal,
            left_indicator: false,
            right_indicator: false,
        }
    }

    /// Left lamp state.
    #[inline]
    pub const fn left_indicator(&self) -> bool { self.left_indicator }

    /// Right lamp state.
    #[inline]
    pub const fn right_indicator(&self) -> bool { self.right_indicator }

    /// Flip both lamps, returning the new level.
    pub fn toggle_indicators(&mut self) -> bool {
        let level = !self.left_indicator;
        self.left_indicator = level;
        self.right_indicator = level;
        level
    }
}

// =============================================================================
// Status Store
// =============================================================================

/// What changed during one status update.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct StatusUpdate {
    /// New drive mode, if the mode button was pressed.
    pub drive_mode: Option<DriveMode>,
    /// New lamp level, if the indicators toggled.
    pub indicators: Option<bool>,
}

/// Owns the status record and the input state feeding it.
pub struct StatusStore {
    status: VehicleStatus,
    mode_button: ButtonState,
    blinker: IndicatorBlinker,
}

impl StatusStore {
    /// Create a store with a zeroed record; the first blink is due one period after `start_ms`.
    pub const fn new(start_ms: u32) -> Self {
        Self {
            status: VehicleStatus::new(),
            mode_button: ButtonState::new(),
            blinker: IndicatorBlinker::new(start_ms),
        }
    }

    /// Current record.
    #[inline]
    pub const fn status(&self) -> &VehicleStatus { &self.status }

    /// Run one update cycle against the board.
    pub fn update<B: AnalogInputs + DigitalIo + ?Sized>(
        &mut self,
        now_ms: u32,
        board: &mut B,
        sampler: &mut SensorSampler,
        faults: &mut FaultCounters,
    ) -> StatusUpdate {
        let mut update = StatusUpdate::default();

        let battery_raw = sampler.sample(board, AnalogChannel::Battery, faults);
        self.status.battery_percentage = battery_pct(battery_raw);

        let speed_raw = sampler.sample(board, AnalogChannel::Speed, faults);
        self.status.speed = speed_kmh(speed_raw);

        self.status.key_status = board.read_digital(DigitalInput::KeySwitch);
        self.status.side_stand_status = board.read_digital(DigitalInput::SideStand);

        if self.mode_button.just_pressed(board.read_digital(DigitalInput::ModeButton)) {
            self.status.drive_mode = self.status.drive_mode.next();
            update.drive_mode = Some(self.status.drive_mode);
        }

        if self.blinker.toggle_due(now_ms) {
            let level = self.status.toggle_indicators();
            board.write_digital(DigitalOutput::LeftIndicator, level);
            board.write_digital(DigitalOutput::RightIndicator, level);
            update.indicators = Some(level);
        }

        update
    }

    /// Pick up again after the time-set mode held the inputs.
    ///
    /// The blink period restarts at `now_ms` and the mode button adopts its
    /// current level, so a press used for field selection is not replayed
    /// as a drive-mode change.
    pub fn resume(
        &mut self,
        now_ms: u32,
        mode_pressed: bool,
    ) {
        self.blinker.rearm(now_ms);
        self.mode_button.resync(mode_pressed);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ADC_MAX, INDICATOR_PERIOD_MS};
    use crate::fault::SensorTimeout;
    use crate::testing::FakeBoard;

    fn cycle(
        store: &mut StatusStore,
        board: &mut FakeBoard,
        now_ms: u32,
    ) -> StatusUpdate {
        let mut sampler = SensorSampler::new();
        let mut faults = FaultCounters::new();
        store.update(now_ms, board, &mut sampler, &mut faults)
    }

    #[test]
    fn test_drive_mode_cycle() {
        assert_eq!(DriveMode::default(), DriveMode::Normal);
        assert_eq!(DriveMode::Normal.next(), DriveMode::Forward);
        assert_eq!(DriveMode::Forward.next(), DriveMode::Reverse);
        assert_eq!(DriveMode::Reverse.next(), DriveMode::Normal);
    }

    #[test]
    fn test_drive_mode_codes_and_names() {
        assert_eq!(DriveMode::Normal.code(), 0);
        assert_eq!(DriveMode::Forward.code(), 1);
        assert_eq!(DriveMode::Reverse.code(), 2);
        assert_eq!(DriveMode::Forward.name(), "FORWARD");
    }

    #[test]
    fn test_toggle_keeps_lamps_equal() {
        let mut status = VehicleStatus::new();
        for _ in 0..5 {
            status.toggle_indicators();
            assert_eq!(status.left_indicator(), status.right_indicator());
        }
        assert!(status.left_indicator());
    }

    #[test]
    fn test_update_scales_and_copies_inputs() {
        let mut board = FakeBoard::new();
        board.battery = 2047;
        board.speed = ADC_MAX;
        board.key = true;
        board.side_stand = true;

        let mut store = StatusStore::new(0);
        cycle(&mut store, &mut board, 10);

        let status = store.status();
        assert_eq!(status.battery_percentage, 49);
        assert_eq!(status.speed, 120);
        assert!(status.key_status);
        assert!(status.side_stand_status);
    }

    #[test]
    fn test_mode_button_advances_only_on_edge() {
        let mut board = FakeBoard::new();
        let mut store = StatusStore::new(0);

        board.mode_button = true;
        assert_eq!(cycle(&mut store, &mut board, 1).drive_mode, Some(DriveMode::Forward));
        // Held: no further advance
        for t in 2..20 {
            assert_eq!(cycle(&mut store, &mut board, t).drive_mode, None);
        }
        board.mode_button = false;
        cycle(&mut store, &mut board, 20);
        board.mode_button = true;
        assert_eq!(cycle(&mut store, &mut board, 21).drive_mode, Some(DriveMode::Reverse));
        board.mode_button = false;
        cycle(&mut store, &mut board, 22);
        board.mode_button = true;
        assert_eq!(cycle(&mut store, &mut board, 23).drive_mode, Some(DriveMode::Normal));
    }

    #[test]
    fn test_indicators_blink_and_drive_outputs() {
        let mut board = FakeBoard::new();
        let mut store = StatusStore::new(0);

        assert_eq!(cycle(&mut store, &mut board, INDICATOR_PERIOD_MS - 1).indicators, None);
        assert_eq!(cycle(&mut store, &mut board, INDICATOR_PERIOD_MS).indicators, Some(true));
        assert!(board.left_lamp && board.right_lamp);
        assert_eq!(cycle(&mut store, &mut board, 2 * INDICATOR_PERIOD_MS).indicators, Some(false));
        assert!(!board.left_lamp && !board.right_lamp);
        assert_eq!(store.status().left_indicator(), store.status().right_indicator());
    }

    #[test]
    fn test_sensor_timeout_keeps_previous_reading() {
        let mut board = FakeBoard::new();
        let mut store = StatusStore::new(0);
        let mut sampler = SensorSampler::new();
        let mut faults = FaultCounters::new();

        board.speed = ADC_MAX;
        store.update(1, &mut board, &mut sampler, &mut faults);
        board.speed_fault = Some(SensorTimeout);
        store.update(2, &mut board, &mut sampler, &mut faults);

        assert_eq!(store.status().speed, 120);
        assert_eq!(faults.sensor_timeouts, 1);
    }

    #[test]
    fn test_resume_swallows_held_mode_button() {
        let mut board = FakeBoard::new();
        let mut store = StatusStore::new(0);

        store.resume(1_000, true);
        board.mode_button = true;
        assert_eq!(cycle(&mut store, &mut board, 1_001).drive_mode, None);
        assert_eq!(cycle(&mut store, &mut board, 1_000 + INDICATOR_PERIOD_MS).indicators, Some(true));
    }
}
