//! Raw analog sweeps shared between the sensor task and the board.

use cluster_common::AnalogChannel;
use cluster_common::fault::SensorTimeout;

/// Raw readings of one sweep, indexed by [`AnalogChannel::index`].
/// `None` marks a channel whose conversion missed its bound.
pub type AnalogSnapshot = [Option<u16>; AnalogChannel::COUNT];

/// Reading of `channel` in `snapshot`.
#[inline]
pub fn channel_reading(
    snapshot: &AnalogSnapshot,
    channel: AnalogChannel,
) -> Result<u16, SensorTimeout> {
    snapshot[channel.index()].ok_or(SensorTimeout)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_follows_channel_order() {
        let snapshot: AnalogSnapshot = [Some(1), Some(2), Some(3)];
        assert_eq!(channel_reading(&snapshot, AnalogChannel::Battery), Ok(1));
        assert_eq!(channel_reading(&snapshot, AnalogChannel::Speed), Ok(2));
        assert_eq!(channel_reading(&snapshot, AnalogChannel::Potentiometer), Ok(3));
    }

    #[test]
    fn test_missed_conversion_is_timeout() {
        let snapshot: AnalogSnapshot = [Some(4095), None, Some(0)];
        assert_eq!(channel_reading(&snapshot, AnalogChannel::Speed), Err(SensorTimeout));
        assert_eq!(channel_reading(&snapshot, AnalogChannel::Potentiometer), Ok(0));
    }
}
