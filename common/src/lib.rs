//! Core logic for the vehicle instrument cluster.
//!
//! This crate contains everything that is not tied to a particular board,
//! shared between the simulator and the Pico 2 firmware:
//!
//! - [`hal`]: Traits a board implements (analog, digital, display, storage, time)
//! - [`config`]: Timing, scaling and display constants
//! - [`sampler`]: Analog scaling and last-known-value fallback
//! - [`button`]: Rising-edge detection
//! - [`schedule`]: Wraparound-safe periodic timers
//! - [`indicator`]: Turn indicator blink timing
//! - [`status`]: Drive mode and the vehicle status record
//! - [`clock`]: Software wall clock
//! - [`time_set`]: Interactive clock editor
//! - [`display`]: Status and prompt line formatting
//! - [`journal`]: Log record formatting
//! - [`cluster`]: Main loop context tying the above together
//! - [`panel`]: 16×2 character grid on an `embedded-graphics` target
//! - [`fault`]: Fault and error types
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests and never allocates. All timing is
//! driven by the millisecond counter the board provides, so it carries no
//! dependency on `std::time` or on an executor.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod button;
pub mod clock;
pub mod cluster;
pub mod colors;
pub mod config;
pub mod display;
pub mod fault;
pub mod hal;
pub mod indicator;
pub mod journal;
pub mod panel;
pub mod sampler;
pub mod schedule;
pub mod status;
pub mod time_set;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use clock::WallClock;
pub use cluster::{Cluster, JournalEvent, LoopMode, PollReport, TimeSetEvent};
pub use fault::{FaultCounters, InitError};
pub use hal::{AnalogChannel, AnalogInputs, Board, CharDisplay, DigitalInput, DigitalIo, DigitalOutput, LogStorage, Monotonic};
pub use panel::TextPanel;
pub use status::DriveMode;
pub use time_set::SettingField;
