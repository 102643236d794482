// src/common/timing.rs

use super::types::Resolution;
use core::time::Duration;

// Nominal values from the datasheet; the internal oscillator is +/- 10%.

/// Default period between sample requests (one second, matching the
/// notification cadence peers expect).
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Integration time of one channel at 16-bit resolution.
pub const CONVERSION_TIME_16BIT: Duration = Duration::from_micros(100_000);
/// Integration time of one channel at 12-bit resolution.
pub const CONVERSION_TIME_12BIT: Duration = Duration::from_micros(6_250);

/// Time for one channel conversion at the given resolution.
pub const fn conversion_time(resolution: Resolution) -> Duration {
    match resolution {
        Resolution::Bits16 => CONVERSION_TIME_16BIT,
        Resolution::Bits12 => CONVERSION_TIME_12BIT,
    }
}

/// Time until each of `channels` active channels has been converted once.
pub fn cycle_time(resolution: Resolution, channels: u8) -> Duration {
    conversion_time(resolution) * channels as u32
}
