//! PWM waveform measurement.
//!
//! Measures the carrier the way the original bench did: tick the part with
//! the bus idle and time edge to edge on output A bit 0.

use sim_core::{Tickable, Ticks};
use tt_spi_pwm::SpiPwm;

/// The PWM output as observed externally: output A bit 0.
#[must_use]
pub fn pwm_bit(chip: &SpiPwm) -> bool {
    chip.output_a() & 0x01 != 0
}

/// Tick until `pred` holds, up to `max` ticks. Returns ticks consumed, or
/// `None` on timeout. Zero if the predicate already holds.
pub fn ticks_until<F>(chip: &mut SpiPwm, max: u32, mut pred: F) -> Option<u32>
where
    F: FnMut(&SpiPwm) -> bool,
{
    for elapsed in 0..=max {
        if pred(chip) {
            return Some(elapsed);
        }
        if elapsed != max {
            chip.tick();
        }
    }
    None
}

/// One measured carrier period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carrier {
    /// Rising edge to rising edge.
    pub period: Ticks,
    /// High time within that period.
    pub high: Ticks,
}

impl Carrier {
    /// High-time fraction of the period, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duty_percent(&self) -> f64 {
        if self.period == Ticks::ZERO {
            return 0.0;
        }
        self.high.get() as f64 * 100.0 / self.period.get() as f64
    }
}

/// Measure one full carrier period, starting from the next rising edge.
///
/// Returns `None` if the output never toggles within `timeout` ticks of any
/// waiting step — which is what a constant-low or constant-high output
/// (duty 0x00 / 0xFF) produces.
pub fn measure_carrier(chip: &mut SpiPwm, timeout: u32) -> Option<Carrier> {
    // Align on a rising edge: wait out any high phase, then the low phase
    ticks_until(chip, timeout, |c| !pwm_bit(c))?;
    ticks_until(chip, timeout, pwm_bit)?;

    // First high tick of a period; count the high phase, then the low
    let high = Ticks::new(u64::from(count_while(chip, timeout, pwm_bit)?));
    let low = Ticks::new(u64::from(count_while(chip, timeout, |c| !pwm_bit(c))?));

    Some(Carrier {
        period: high + low,
        high,
    })
}

/// Count ticks (including the current one) for which `pred` holds, ending
/// with the first tick where it does not.
fn count_while<F>(chip: &mut SpiPwm, timeout: u32, mut pred: F) -> Option<u32>
where
    F: FnMut(&SpiPwm) -> bool,
{
    let mut count = 0;
    while pred(chip) {
        count += 1;
        if count > timeout {
            return None;
        }
        chip.tick();
    }
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpiMaster;
    use tt_spi_pwm::{
        CARRIER_PERIOD_TICKS, REG_OUT_A, REG_PWM_CTRL, REG_PWM_DUTY, duty_threshold,
    };

    fn enabled_chip(duty: u8) -> SpiPwm {
        let mut chip = SpiPwm::new();
        let master = SpiMaster::new(5);
        master.transaction(&mut chip, true, REG_OUT_A, 0x01);
        master.transaction(&mut chip, true, REG_PWM_CTRL, 0x01);
        master.transaction(&mut chip, true, REG_PWM_DUTY, duty);
        chip
    }

    #[test]
    fn measures_half_duty_carrier() {
        let mut chip = enabled_chip(0x80);
        let carrier = measure_carrier(&mut chip, 2 * CARRIER_PERIOD_TICKS)
            .expect("output should toggle at 50% duty");
        assert_eq!(carrier.period.get(), u64::from(CARRIER_PERIOD_TICKS));
        assert_eq!(carrier.high.get(), u64::from(duty_threshold(0x80)));
    }

    #[test]
    fn constant_low_times_out() {
        let mut chip = enabled_chip(0x00);
        assert_eq!(measure_carrier(&mut chip, 2 * CARRIER_PERIOD_TICKS), None);
    }

    #[test]
    fn constant_high_times_out() {
        let mut chip = enabled_chip(0xFF);
        assert_eq!(measure_carrier(&mut chip, 2 * CARRIER_PERIOD_TICKS), None);
    }

    #[test]
    fn duty_percent_within_a_point_of_setting() {
        let mut chip = enabled_chip(0x80);
        let carrier =
            measure_carrier(&mut chip, 2 * CARRIER_PERIOD_TICKS).expect("toggling output");
        let expected = f64::from(0x80u8) / 256.0 * 100.0;
        assert!((carrier.duty_percent() - expected).abs() <= 1.0);
    }
}
