//! Bus master and test oracle for the SPI/PWM peripheral.
//!
//! The peripheral is a slave: something external must wiggle its three bus
//! lines and watch its output pins. This crate is that external party — a
//! bit-banged SPI master plus waveform measurement helpers, driving the
//! simulated part tick by tick. It lives outside the peripheral on purpose;
//! nothing here is part of the silicon under test.

mod master;
mod measure;
mod script;

pub use master::SpiMaster;
pub use measure::{Carrier, measure_carrier, pwm_bit, ticks_until};
pub use script::{Operation, Report, Script, Transaction, run_script};
