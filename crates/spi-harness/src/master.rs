//! Bit-banged SPI master.

use sim_core::Tickable;
use tt_spi_pwm::SpiPwm;

/// Default bus clock half period: 50 system ticks, i.e. a 100 kHz bus
/// clock at the 10 MHz reference tick rate.
pub const DEFAULT_HALF_PERIOD: u32 = 50;

/// Drives a peripheral's bus lines through complete 16-bit transactions.
///
/// Timing discipline matches what the decoder expects: the data line is set
/// while the bus clock is low and held through the rising edge that samples
/// it. Chip-select frames exactly one transaction.
#[derive(Debug, Clone, Copy)]
pub struct SpiMaster {
    /// Ticks per bus clock half period.
    half_period: u32,
}

impl SpiMaster {
    #[must_use]
    pub fn new(half_period: u32) -> Self {
        Self {
            half_period: half_period.max(1),
        }
    }

    /// Shift one complete frame into the peripheral.
    ///
    /// Asserts chip-select with the bus clock low, clocks the 16 frame bits
    /// MSB first, then releases chip-select. The address's high bit is
    /// masked off, as the frame format only carries 7 address bits.
    pub fn transaction(&self, chip: &mut SpiPwm, write: bool, address: u8, data: u8) {
        self.clock_bits(chip, write, address, data, 16);
    }

    /// Shift only the first `bits` frame bits, then deassert chip-select.
    ///
    /// An aborted frame must never commit, no matter how close to complete
    /// it was.
    pub fn partial_transaction(
        &self,
        chip: &mut SpiPwm,
        write: bool,
        address: u8,
        data: u8,
        bits: u8,
    ) {
        self.clock_bits(chip, write, address, data, bits.min(16));
    }

    fn clock_bits(&self, chip: &mut SpiPwm, write: bool, address: u8, data: u8, bits: u8) {
        let word =
            (u16::from(write) << 15) | (u16::from(address & 0x7F) << 8) | u16::from(data);

        // Open the window: chip-select low, bus clock low
        hold(chip, false, false, false, 1);
        for i in 0..bits {
            let bit = (word >> (15 - i)) & 1 != 0;
            hold(chip, false, false, bit, self.half_period);
            hold(chip, false, true, bit, self.half_period);
        }
        // Close the window and give the edge a tick to register
        hold(chip, true, false, false, 2);
    }
}

impl Default for SpiMaster {
    fn default() -> Self {
        Self::new(DEFAULT_HALF_PERIOD)
    }
}

/// Hold the bus lines at the given state for `ticks` system clock ticks.
fn hold(chip: &mut SpiPwm, cs: bool, sclk: bool, copi: bool, ticks: u32) {
    chip.set_lines(cs, sclk, copi);
    for _ in 0..ticks {
        chip.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_spi_pwm::{REG_OUT_A, REG_OUT_B};

    #[test]
    fn full_transaction_commits() {
        let mut chip = SpiPwm::new();
        let master = SpiMaster::new(5);
        master.transaction(&mut chip, true, REG_OUT_B, 0xCC);
        assert_eq!(chip.output_b(), 0xCC);
    }

    #[test]
    fn partial_transaction_does_not_commit() {
        let mut chip = SpiPwm::new();
        let master = SpiMaster::new(5);
        master.transaction(&mut chip, true, REG_OUT_A, 0xF0);
        master.partial_transaction(&mut chip, true, REG_OUT_A, 0x0F, 15);
        assert_eq!(chip.output_a(), 0xF0);
    }

    #[test]
    fn address_high_bit_is_masked() {
        let mut chip = SpiPwm::new();
        let master = SpiMaster::new(5);
        // 0x81 masks to address 0x01
        master.transaction(&mut chip, true, 0x81, 0x42);
        assert_eq!(chip.output_b(), 0x42);
    }

    #[test]
    fn half_period_of_zero_is_clamped() {
        let mut chip = SpiPwm::new();
        let master = SpiMaster::new(0);
        master.transaction(&mut chip, true, REG_OUT_B, 0x77);
        assert_eq!(chip.output_b(), 0x77);
    }
}
