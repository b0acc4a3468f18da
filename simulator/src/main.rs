//! Instrument Cluster Simulator for Desktop.
//!
//! Runs the same [`Cluster`] core as the firmware against a simulated board:
//! an `embedded-graphics-simulator` window for the display, the keyboard for
//! the buttons, switches and analog inputs (see [`controls`]) and a real
//! `log.txt` in the working directory for the journal. Poll events are printed
//! to stdout and the indicator lamps are drawn in the top corners.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod board;
mod controls;
mod timing;

use std::path::PathBuf;
use std::thread;

use cluster_common::colors::AMBER;
use cluster_common::{AnalogChannel, CharDisplay, Cluster, JournalEvent, Monotonic, PollReport, TimeSetEvent, WallClock};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::board::SimBoard;
use crate::controls::Control;
use crate::timing::{LAMP_DIAMETER, LAMP_MARGIN, LAMP_OFF, POLL_INTERVAL, SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_SCALE};

/// Map a key to the control it stands in for.
fn control_for(keycode: Keycode) -> Option<Control> {
    let control = match keycode {
        Keycode::M => Control::ModeButton,
        Keycode::S => Control::SetTimeButton,
        Keycode::K => Control::KeySwitch,
        Keycode::D => Control::SideStand,
        Keycode::Q => Control::Raise(AnalogChannel::Speed),
        Keycode::A => Control::Lower(AnalogChannel::Speed),
        Keycode::W => Control::Raise(AnalogChannel::Battery),
        Keycode::Z => Control::Lower(AnalogChannel::Battery),
        Keycode::R => Control::Raise(AnalogChannel::Potentiometer),
        Keycode::F => Control::Lower(AnalogChannel::Potentiometer),
        _ => return None,
    };
    Some(control)
}

/// Print what one poll did.
fn print_report(
    report: &PollReport,
    cluster: &Cluster,
) {
    let clock = cluster.clock();
    let stamp = format!("{:02}:{:02}:{:02}", clock.hours, clock.minutes, clock.seconds);

    if let Some(mode) = report.drive_mode {
        println!("[{stamp}] Drive mode: {}", mode.name());
    }

    match report.journal {
        Some(JournalEvent::Written) => println!("[{stamp}] Journal record written"),
        Some(JournalEvent::Dropped) => {
            println!("[{stamp}] Journal record dropped ({} total)", cluster.faults().storage_failures);
        }
        None => {}
    }

    match report.time_set {
        Some(TimeSetEvent::Entered) => println!("[{stamp}] Time set: editing HOURS"),
        Some(TimeSetEvent::Pass(pass)) if pass.exited => {
            println!(
                "[{stamp}] Time set: done, date {:02}/{:02}/{:04}",
                clock.day, clock.month, clock.year
            );
        }
        Some(TimeSetEvent::Pass(pass)) if pass.advanced => {
            println!("[{stamp}] Time set: editing {}", pass.field.label());
        }
        _ => {}
    }
}

/// Draw the indicator lamps in the top corners of the panel.
fn draw_lamps(board: &mut SimBoard) {
    let (left, right) = board.lamps();
    let color = |on: bool| if on { AMBER } else { LAMP_OFF };
    let target = board.panel.target_mut();
    let right_x = (SCREEN_WIDTH - LAMP_MARGIN - LAMP_DIAMETER) as i32;

    for (x, on) in [(LAMP_MARGIN as i32, left), (right_x, right)] {
        Circle::new(Point::new(x, LAMP_MARGIN as i32), LAMP_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(color(on)))
            .draw(target)
            .ok();
    }
}

fn main() {
    let display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Instrument Cluster Sim", &output_settings);

    let mut board = SimBoard::new(display, PathBuf::from("."));
    board.clear();
    draw_lamps(&mut board);
    window.update(board.panel.target());

    let mut cluster = Cluster::new(board.monotonic_ms(), WallClock::EPOCH);

    println!("Keys: M mode, S set time, K key switch, D side stand, Q/A speed, W/Z battery, R/F pot");

    loop {
        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if let Some(control) = control_for(keycode) {
                        board.controls.key_down(control, repeat);
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(control) = control_for(keycode) {
                        board.controls.key_up(control);
                    }
                }
                _ => {}
            }
        }

        let report = cluster.poll(&mut board);
        if !report.is_quiet() {
            print_report(&report, &cluster);
        }

        // Redrawn every poll since a clear wipes the whole panel
        draw_lamps(&mut board);
        window.update(board.panel.target());

        thread::sleep(POLL_INTERVAL);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
