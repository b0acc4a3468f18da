//! Cluster firmware library - host-testable modules for the Pico 2 target.
//!
//! The binary (`main.rs`) adds the embassy tasks and peripheral bindings on
//! top of this library and of `cluster-common`.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p cluster-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p cluster-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod analog;
pub mod config;
pub mod flash_log;

pub use analog::{AnalogSnapshot, channel_reading};
pub use flash_log::{FlashLog, FlashLogError};
