//! Async tasks for the cluster firmware.
//!
//! - `sensor`: ADC sampling task feeding the main loop

pub mod sensor;

pub use sensor::{ANALOG, sensor_task};
