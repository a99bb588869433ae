//! System clock configuration.

use crate::Ticks;

/// System clock configuration.
///
/// The crystal driving the simulated part. Waveform measurements taken in
/// ticks convert to real-world units through this.
#[derive(Debug, Clone, Copy)]
pub struct MasterClock {
    /// Crystal frequency in Hz (e.g. `10_000_000` for a 10 MHz reference).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Duration of the given tick count in nanoseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn nanos(&self, ticks: Ticks) -> f64 {
        ticks.get() as f64 * 1e9 / self.frequency_hz as f64
    }

    /// Frequency in Hz of a waveform whose period is the given tick count.
    ///
    /// Returns 0.0 for a zero period.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn frequency_of_period(&self, period: Ticks) -> f64 {
        if period == Ticks::ZERO {
            return 0.0;
        }
        self.frequency_hz as f64 / period.get() as f64
    }
}
