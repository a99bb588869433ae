//! PWM waveform generator.
//!
//! A free-running counter wraps at [`CARRIER_PERIOD_TICKS`], fixing the
//! carrier frequency regardless of duty. The output is high while the
//! counter is below the duty threshold, so each period starts with its high
//! phase and the rising edge always lands on the counter wrap.

/// Carrier period in system clock ticks. 10 MHz / 3333 ≈ 3000.3 Hz.
pub const CARRIER_PERIOD_TICKS: u32 = 3333;

/// Duty-to-threshold scaling.
///
/// Dividing by 255 rather than 256 makes both endpoints exact: duty 0x00
/// gives threshold 0 (output never high) and duty 0xFF gives threshold
/// equal to the full period (output never low). Intermediate duties land
/// within 0.4 of a percentage point of `duty / 256`.
#[must_use]
pub fn duty_threshold(duty: u8) -> u32 {
    u32::from(duty) * CARRIER_PERIOD_TICKS / 255
}

/// Free-running PWM generator.
#[derive(Debug)]
pub struct PwmGenerator {
    /// Phase counter, 0..`CARRIER_PERIOD_TICKS`. Never reset by duty or
    /// enable changes, so the carrier stays phase-correct.
    counter: u32,
    /// Output level driven this tick.
    level: bool,
}

impl PwmGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            counter: 0,
            level: false,
        }
    }

    /// Advance one tick with the register values latched for this tick.
    ///
    /// Disabled forces the output low while the counter keeps running, so
    /// re-enabling resumes mid-phase rather than restarting the carrier.
    pub fn tick(&mut self, enabled: bool, duty: u8) {
        self.level = enabled && self.counter < duty_threshold(duty);
        self.counter += 1;
        if self.counter == CARRIER_PERIOD_TICKS {
            self.counter = 0;
        }
    }

    /// Output level driven this tick.
    #[must_use]
    pub fn level(&self) -> bool {
        self.level
    }

    /// Current phase counter value.
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Back to phase zero, output low (synchronous reset).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PwmGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_endpoints() {
        assert_eq!(duty_threshold(0x00), 0);
        assert_eq!(duty_threshold(0xFF), CARRIER_PERIOD_TICKS);
    }

    #[test]
    fn threshold_midpoint_near_half() {
        // 128 * 3333 / 255 = 1673; 1673/3333 = 50.19%, inside ±1 pp of 50%
        assert_eq!(duty_threshold(0x80), 1673);
    }

    #[test]
    fn duty_zero_never_goes_high() {
        let mut pwm = PwmGenerator::new();
        for _ in 0..2 * CARRIER_PERIOD_TICKS {
            pwm.tick(true, 0x00);
            assert!(!pwm.level());
        }
    }

    #[test]
    fn duty_full_never_goes_low() {
        let mut pwm = PwmGenerator::new();
        for _ in 0..2 * CARRIER_PERIOD_TICKS {
            pwm.tick(true, 0xFF);
            assert!(pwm.level());
        }
    }

    #[test]
    fn disabled_forces_low() {
        let mut pwm = PwmGenerator::new();
        for _ in 0..100 {
            pwm.tick(false, 0xFF);
            assert!(!pwm.level());
        }
    }

    #[test]
    fn counter_free_runs_while_disabled() {
        let mut pwm = PwmGenerator::new();
        for _ in 0..10 {
            pwm.tick(false, 0xFF);
        }
        assert_eq!(pwm.counter(), 10);
    }

    #[test]
    fn high_time_matches_threshold() {
        let mut pwm = PwmGenerator::new();
        let mut high = 0u32;
        for _ in 0..CARRIER_PERIOD_TICKS {
            pwm.tick(true, 0x80);
            if pwm.level() {
                high += 1;
            }
        }
        assert_eq!(high, duty_threshold(0x80));
    }

    #[test]
    fn duty_change_keeps_phase() {
        let mut pwm = PwmGenerator::new();
        for _ in 0..1000 {
            pwm.tick(true, 0x40);
        }
        let phase = pwm.counter();
        pwm.tick(true, 0xC0);
        assert_eq!(pwm.counter(), phase + 1);
    }

    #[test]
    fn counter_wraps_at_period() {
        let mut pwm = PwmGenerator::new();
        for _ in 0..CARRIER_PERIOD_TICKS {
            pwm.tick(true, 0x80);
        }
        assert_eq!(pwm.counter(), 0);
    }
}
