//! ADC sampling task.
//!
//! Sweeps the three analog channels every [`SENSOR_SAMPLE_PERIOD_MS`] and
//! publishes the latest sweep through [`ANALOG`]. Each conversion is bounded
//! by [`SENSOR_TIMEOUT_MS`]; a channel that misses the bound (or reports an
//! ADC error) is published as `None` and the main loop falls back to its
//! last-known value.
//!
//! The task only produces raw readings. The status record and the wall clock
//! stay owned by the main loop.

use cluster_common::AnalogChannel;
use cluster_pico2::AnalogSnapshot;
use cluster_pico2::config::{SENSOR_SAMPLE_PERIOD_MS, SENSOR_TIMEOUT_MS};
use defmt::{info, warn};
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::{DynSender, Watch};
use embassy_time::{Duration, Ticker, with_timeout};

/// Latest sweep. The sensor task writes, the main loop reads without waiting.
/// Initialized at compile time (Watch::new() is const).
pub static ANALOG: Watch<CriticalSectionRawMutex, AnalogSnapshot, 1> = Watch::new();

/// ADC sampling task - runs concurrently with the main loop.
///
/// `channels` must be in [`AnalogChannel::ALL`] order.
#[embassy_executor::task]
pub async fn sensor_task(
    mut adc: Adc<'static, Async>,
    mut channels: [Channel<'static>; AnalogChannel::COUNT],
    sender: DynSender<'static, AnalogSnapshot>,
) {
    info!("Sensor task started");

    let timeout = Duration::from_millis(SENSOR_TIMEOUT_MS);
    let mut ticker = Ticker::every(Duration::from_millis(SENSOR_SAMPLE_PERIOD_MS));

    loop {
        let mut snapshot: AnalogSnapshot = [None; AnalogChannel::COUNT];

        for (channel, pin) in AnalogChannel::ALL.into_iter().zip(channels.iter_mut()) {
            snapshot[channel.index()] = match with_timeout(timeout, adc.read(pin)).await {
                Ok(Ok(raw)) => Some(raw),
                Ok(Err(_)) => {
                    warn!("ADC error on {}", channel);
                    None
                }
                Err(_) => None,
            };
        }

        // Overwrites the previous sweep if the main loop has not read it
        sender.send(snapshot);

        ticker.next().await;
    }
}
