//! JSON-scripted harness runs.
//!
//! A script is a list of bus transactions plus clocking parameters; the
//! report is what an external observer could see afterwards — output pins,
//! register contents, and a measured PWM carrier if one is running.

use serde::{Deserialize, Serialize};
use sim_core::{MasterClock, Tickable, Ticks};
use tt_spi_pwm::{CARRIER_PERIOD_TICKS, SpiPwm};

use crate::master::{DEFAULT_HALF_PERIOD, SpiMaster};
use crate::measure::measure_carrier;

/// A scripted run: clocking parameters and the transactions to perform.
#[derive(Debug, Deserialize)]
pub struct Script {
    /// System clock frequency in Hz.
    #[serde(default = "default_clock_hz")]
    pub clock_hz: u64,
    /// Bus clock half period in system ticks.
    #[serde(default = "default_half_period")]
    pub sclk_half_period_ticks: u32,
    /// Idle ticks to run after the last transaction.
    #[serde(default)]
    pub settle_ticks: u64,
    pub transactions: Vec<Transaction>,
}

fn default_clock_hz() -> u64 {
    10_000_000
}

fn default_half_period() -> u32 {
    DEFAULT_HALF_PERIOD
}

/// Frame direction.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Write,
    Read,
}

/// One 16-bit bus frame.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transaction {
    pub op: Operation,
    pub address: u8,
    pub data: u8,
}

/// What the run left behind, as observable from outside the part.
#[derive(Debug, Serialize)]
pub struct Report {
    pub output_a: u8,
    pub output_b: u8,
    pub registers: RegisterReport,
    /// Present only when the output actually toggles.
    pub pwm: Option<PwmReport>,
}

#[derive(Debug, Serialize)]
pub struct RegisterReport {
    pub out_a: u8,
    pub out_b: u8,
    pub pwm_ctrl: u8,
    pub pwm_duty: u8,
    pub last_read: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct PwmReport {
    pub period_ticks: u64,
    pub high_ticks: u64,
    pub period_ns: f64,
    pub frequency_hz: f64,
    pub duty_percent: f64,
}

/// Run a script against a freshly reset peripheral and report the outcome.
#[must_use]
pub fn run_script(script: &Script) -> Report {
    let mut chip = SpiPwm::new();
    let master = SpiMaster::new(script.sclk_half_period_ticks);

    for transaction in &script.transactions {
        let write = matches!(transaction.op, Operation::Write);
        master.transaction(&mut chip, write, transaction.address, transaction.data);
    }
    chip.tick_n(Ticks::new(script.settle_ticks));

    let clock = MasterClock::new(script.clock_hz);
    let pwm = measure_carrier(&mut chip, 2 * CARRIER_PERIOD_TICKS).map(|carrier| PwmReport {
        period_ticks: carrier.period.get(),
        high_ticks: carrier.high.get(),
        period_ns: clock.nanos(carrier.period),
        frequency_hz: clock.frequency_of_period(carrier.period),
        duty_percent: carrier.duty_percent(),
    });

    let regs = chip.registers();
    Report {
        output_a: chip.output_a(),
        output_b: chip.output_b(),
        registers: RegisterReport {
            out_a: regs.read(tt_spi_pwm::REG_OUT_A),
            out_b: regs.read(tt_spi_pwm::REG_OUT_B),
            pwm_ctrl: regs.read(tt_spi_pwm::REG_PWM_CTRL),
            pwm_duty: regs.read(tt_spi_pwm::REG_PWM_DUTY),
            last_read: regs.last_read(),
        },
        pwm,
    }
}
