//! Main loop context.
//!
//! [`Cluster`] owns every piece of mutable core state (status record, wall
//! clock, time-set editor, scheduler timers, fault counters) and is driven by
//! calling [`Cluster::poll`] as often as the board allows. Each poll reads the
//! monotonic counter once and does one of:
//!
//! - **Running**: check the set-time button (a press opens the editor),
//!   otherwise update the status record, write a journal record every
//!   [`LOG_PERIOD_MS`], tick the clock every [`CLOCK_TICK_MS`] and render the
//!   status screen.
//! - **Time set**: run one edit pass when one is due, nothing otherwise.
//!
//! The core never logs. Every poll returns a [`PollReport`] describing what
//! happened so the binary can log it with whatever backend it has.

use crate::button::ButtonState;
use crate::clock::WallClock;
use crate::config::{CLOCK_TICK_MS, LOG_PATH, LOG_PERIOD_MS};
use crate::display::{format_status, format_time_set_prompt, render};
use crate::fault::{Fault, FaultCounters};
use crate::hal::{AnalogChannel, Board, DigitalInput};
use crate::journal::format_log_record;
use crate::sampler::SensorSampler;
use crate::schedule::PeriodicTimer;
use crate::status::{DriveMode, StatusStore, VehicleStatus};
use crate::time_set::{EditInputs, PassOutcome, SettingField, TimeSetController};

// =============================================================================
// Poll Report
// =============================================================================

/// What the loop is currently doing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopMode {
    /// Normal operation.
    Running,
    /// Time-set editor open on a field.
    TimeSet(SettingField),
}

/// Outcome of a due journal write.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JournalEvent {
    /// Record appended.
    Written,
    /// Storage refused the record; it is not retried.
    Dropped,
}

/// Time-set activity during one poll.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeSetEvent {
    /// Editor opened on the hours field.
    Entered,
    /// One edit pass ran; `exited` is set on the pass that closed the editor.
    Pass(PassOutcome),
}

/// Everything that happened during one [`Cluster::poll`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    /// New drive mode after a mode-button press.
    pub drive_mode: Option<DriveMode>,
    /// New indicator lamp level after a blink toggle.
    pub indicators: Option<bool>,
    /// Journal write attempted this poll.
    pub journal: Option<JournalEvent>,
    /// Clock advanced by one second.
    pub clock_ticked: bool,
    /// Time-set editor activity.
    pub time_set: Option<TimeSetEvent>,
    /// Faults recorded during this poll only.
    pub faults: FaultCounters,
}

impl PollReport {
    /// Whether the poll changed nothing worth logging.
    ///
    /// Clock ticks are not counted; they happen every second.
    pub fn is_quiet(&self) -> bool {
        self.drive_mode.is_none()
            && self.indicators.is_none()
            && self.journal.is_none()
            && self.time_set.is_none()
            && self.faults.is_empty()
    }
}

// =============================================================================
// Cluster
// =============================================================================

/// Single-writer owner of the status record and the wall clock.
pub struct Cluster {
    status: StatusStore,
    sampler: SensorSampler,
    clock: WallClock,
    time_set: TimeSetController,
    set_button: ButtonState,
    log_timer: PeriodicTimer,
    tick_timer: PeriodicTimer,
    faults: FaultCounters,
}

impl Cluster {
    /// Create the loop context; all periods start counting at `start_ms`.
    pub const fn new(
        start_ms: u32,
        clock: WallClock,
    ) -> Self {
        Self {
            status: StatusStore::new(start_ms),
            sampler: SensorSampler::new(),
            clock,
            time_set: TimeSetController::new(),
            set_button: ButtonState::new(),
            log_timer: PeriodicTimer::new(LOG_PERIOD_MS, start_ms),
            tick_timer: PeriodicTimer::new(CLOCK_TICK_MS, start_ms),
            faults: FaultCounters::new(),
        }
    }

    #[inline]
    pub const fn status(&self) -> &VehicleStatus { self.status.status() }

    #[inline]
    pub const fn clock(&self) -> &WallClock { &self.clock }

    /// Faults recorded since boot.
    #[inline]
    pub const fn faults(&self) -> &FaultCounters { &self.faults }

    pub const fn mode(&self) -> LoopMode {
        if self.time_set.is_active() {
            LoopMode::TimeSet(self.time_set.field())
        } else {
            LoopMode::Running
        }
    }

    /// Run one loop iteration against `board`.
    pub fn poll<B: Board + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> PollReport {
        let now_ms = board.monotonic_ms();
        let mut report = PollReport::default();

        if self.time_set.is_active() {
            self.edit_pass(now_ms, board, &mut report);
        } else {
            self.run(now_ms, board, &mut report);
        }

        self.faults.merge(&report.faults);
        report
    }

    fn run<B: Board + ?Sized>(
        &mut self,
        now_ms: u32,
        board: &mut B,
        report: &mut PollReport,
    ) {
        if self.set_button.just_pressed(board.read_digital(DigitalInput::SetTimeButton)) {
            let mode_pressed = board.read_digital(DigitalInput::ModeButton);
            self.time_set.enter(now_ms, mode_pressed);
            board.clear();
            render(board, &format_time_set_prompt(self.time_set.field(), &self.clock));
            report.time_set = Some(TimeSetEvent::Entered);
            return;
        }

        let update = self.status.update(now_ms, board, &mut self.sampler, &mut report.faults);
        report.drive_mode = update.drive_mode;
        report.indicators = update.indicators;

        if self.log_timer.poll(now_ms) {
            let record = format_log_record(self.status.status(), &self.clock);
            report.journal = Some(match board.append_line(LOG_PATH, &record) {
                Ok(()) => JournalEvent::Written,
                Err(_) => {
                    report.faults.record(Fault::StorageWriteFailure);
                    JournalEvent::Dropped
                }
            });
        }

        if self.tick_timer.poll(now_ms) {
            self.clock.tick();
            report.clock_ticked = true;
        }

        render(board, &format_status(self.status.status(), &self.clock));
    }

    fn edit_pass<B: Board + ?Sized>(
        &mut self,
        now_ms: u32,
        board: &mut B,
        report: &mut PollReport,
    ) {
        if !self.time_set.pass_due(now_ms) {
            return;
        }

        let inputs = EditInputs {
            mode_pressed: board.read_digital(DigitalInput::ModeButton),
            set_pressed: board.read_digital(DigitalInput::SetTimeButton),
            pot_raw: self.sampler.sample(board, AnalogChannel::Potentiometer, &mut report.faults),
        };
        let outcome = self.time_set.pass(now_ms, inputs, &mut self.clock);
        report.time_set = Some(TimeSetEvent::Pass(outcome));

        if outcome.exited {
            // Restart every period at the exit so no catch-up burst follows
            self.log_timer.rearm(now_ms);
            self.tick_timer.rearm(now_ms);
            self.status.resume(now_ms, inputs.mode_pressed);
            self.set_button.resync(inputs.set_pressed);
            board.clear();
            render(board, &format_status(self.status.status(), &self.clock));
        } else {
            render(board, &format_time_set_prompt(self.time_set.field(), &self.clock));
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
