//! Instrument Cluster Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows speed, battery charge, drive mode and time on the Pimoroni PIM715
//! Display Pack 2.8" (rendered as a 16×2 character display), blinks the
//! indicator lamps and journals the vehicle status to flash every 5 seconds.
//!
//! # Architecture
//!
//! - Sensor task: sweeps the ADC every 10 ms and publishes the readings
//! - Main task: owns the [`Cluster`] and polls it against the board,
//!   logging what each poll reports
//!
//! # Button Controls
//!
//! - **Mode** (GPIO12): Cycle drive mode (NORMAL → FORWARD → REVERSE);
//!   next field while setting the time
//! - **Set** (GPIO13): Enter / leave time setting; the potentiometer sets
//!   the selected field
//!
//! On hosts the binary compiles to an empty `main` so the workspace builds
//! and tests without an ARM toolchain.

#![cfg_attr(target_arch = "arm", no_std, no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

#[cfg(target_arch = "arm")]
mod board;
#[cfg(target_arch = "arm")]
mod display;
#[cfg(target_arch = "arm")]
mod tasks;

#[cfg(target_arch = "arm")]
use {
    cluster_common::{CharDisplay, Cluster, FaultCounters, InitError, JournalEvent, Monotonic, PollReport, TextPanel, TimeSetEvent, WallClock},
    cluster_pico2::FlashLog,
    cluster_pico2::config::{DISPLAY_BUFFER_LEN, FIRST_SWEEP_TIMEOUT_MS, JOURNAL_LEN, JOURNAL_OFFSET, POLL_INTERVAL_MS},
    defmt::{debug, error, info, trace, warn},
    defmt_rtt as _,
    embassy_executor::Spawner,
    embassy_rp::adc::{self, Adc, Channel, Config as AdcConfig},
    embassy_rp::bind_interrupts,
    embassy_rp::gpio::{Input, Level, Output, Pull},
    embassy_rp::spi::Spi,
    embassy_time::{Duration, Timer, with_timeout},
    panic_probe as _,
    static_cell::StaticCell,
};

#[cfg(target_arch = "arm")]
use crate::board::{JournalFlash, Lamps, Pico2Board, Switches};
#[cfg(target_arch = "arm")]
use crate::display::{display_spi_config, init_display};
#[cfg(target_arch = "arm")]
use crate::tasks::{ANALOG, sensor_task};

#[cfg(target_arch = "arm")]
bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-cluster"),
    embassy_rp::binary_info::rp_program_description!(c"Vehicle instrument cluster on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

// =============================================================================
// Boot Failure
// =============================================================================

/// Log the failed peripheral and stop. There is no recovery path at boot.
#[cfg(target_arch = "arm")]
fn halt(error: InitError) -> ! {
    error!("Boot aborted: {}", error);
    loop {
        cortex_m::asm::wfi();
    }
}

// =============================================================================
// Report Logging
// =============================================================================

/// Log what one poll did. `faults` are the running totals.
#[cfg(target_arch = "arm")]
fn log_report(
    report: &PollReport,
    cluster: &Cluster,
) {
    let faults: &FaultCounters = cluster.faults();

    if let Some(mode) = report.drive_mode {
        info!("Drive mode: {}", mode.name());
    }

    if let Some(level) = report.indicators {
        trace!("Indicators: {}", if level { "ON" } else { "OFF" });
    }

    match report.journal {
        Some(JournalEvent::Written) => debug!("Journal: {}", cluster.clock()),
        Some(JournalEvent::Dropped) => warn!("Journal record dropped ({} total)", faults.storage_failures),
        None => {}
    }

    match report.time_set {
        Some(TimeSetEvent::Entered) => info!("Time set: editing HOURS"),
        Some(TimeSetEvent::Pass(pass)) if pass.exited => info!("Time set: done, clock {}", cluster.clock()),
        Some(TimeSetEvent::Pass(pass)) if pass.advanced => info!("Time set: editing {}", pass.field.label()),
        _ => {}
    }

    if report.faults.sensor_timeouts > 0 {
        debug!("Sensor timeout ({} total)", faults.sensor_timeouts);
    }
}

// =============================================================================
// Entry Point
// =============================================================================

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Instrument cluster starting...");

    let p = embassy_rp::init(Default::default());

    // Initialize display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High); // Turn on backlight

    // TX-only SPI, the display doesn't need MISO
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());

    static DISPLAY_BUFFER: StaticCell<[u8; DISPLAY_BUFFER_LEN]> = StaticCell::new();
    let buffer = DISPLAY_BUFFER.init([0; DISPLAY_BUFFER_LEN]);
    let display = match init_display(spi, cs, dc, buffer) {
        Ok(display) => display,
        Err(e) => halt(e),
    };
    let mut panel = TextPanel::new(display);
    panel.clear();
    info!("Display initialized");

    // Journal in the last megabyte of flash
    let flash = JournalFlash::new_blocking(p.FLASH);
    let journal = match FlashLog::mount(flash, JOURNAL_OFFSET, JOURNAL_LEN) {
        Ok(journal) => journal,
        Err(e) => {
            error!("Journal mount failed: {}", defmt::Display2Format(&e));
            halt(InitError::Storage)
        }
    };
    info!("Journal mounted, head at {=u32:#x}", journal.head());

    // Analog inputs: battery=26, speed=27, potentiometer=28 (AnalogChannel::ALL order)
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let channels = [
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
        Channel::new_pin(p.PIN_28, Pull::None),
    ];
    let Some(mut analog) = ANALOG.dyn_receiver() else {
        halt(InitError::Analog)
    };
    if spawner.spawn(sensor_task(adc, channels, ANALOG.dyn_sender())).is_err() {
        halt(InitError::Analog);
    }
    info!("Sensor task spawned");

    // First poll needs a published sweep
    match with_timeout(Duration::from_millis(FIRST_SWEEP_TIMEOUT_MS), analog.changed()).await {
        Ok(sweep) => debug!("First ADC sweep: {}", sweep),
        Err(_) => halt(InitError::Analog),
    }

    // Switches and buttons (active-low with internal pull-up)
    let switches = Switches {
        key: Input::new(p.PIN_2, Pull::Up),
        side_stand: Input::new(p.PIN_3, Pull::Up),
        mode: Input::new(p.PIN_12, Pull::Up),
        set_time: Input::new(p.PIN_13, Pull::Up),
    };
    let lamps = Lamps {
        left: Output::new(p.PIN_4, Level::Low),
        right: Output::new(p.PIN_5, Level::Low),
    };
    info!("Inputs initialized");

    let mut board = Pico2Board {
        analog,
        switches,
        lamps,
        panel,
        journal,
    };
    let mut cluster = Cluster::new(board.monotonic_ms(), WallClock::EPOCH);

    info!("Main loop starting");

    loop {
        let report = cluster.poll(&mut board);
        if !report.is_quiet() {
            log_report(&report, &cluster);
        }

        // Yield so the sensor task can sample
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

#[cfg(not(target_arch = "arm"))]
fn main() {}
