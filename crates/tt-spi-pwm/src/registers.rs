//! Peripheral register file.
//!
//! # Register map
//!
//! | Addr | Name     | Description                                   |
//! |------|----------|-----------------------------------------------|
//! | 0x00 | OUT_A    | Output A byte; bit 0 doubles as global enable |
//! | 0x01 | OUT_B    | Output B byte, mirrored directly              |
//! | 0x02 | PWM_CTRL | Bit 0: PWM generator enable                   |
//! | 0x04 | PWM_DUTY | Duty: 0x00 always low, 0xFF always high       |
//!
//! Writes outside the defined set are accepted at the bus level and change
//! nothing; reads outside it return 0. Neither is an error — this register
//! interface has no error channel and misuse is indistinguishable from a
//! successful no-op by design.

/// Output A / global enable.
pub const REG_OUT_A: u8 = 0x00;
/// Output B.
pub const REG_OUT_B: u8 = 0x01;
/// PWM enable (bit 0).
pub const REG_PWM_CTRL: u8 = 0x02;
/// PWM duty cycle.
pub const REG_PWM_DUTY: u8 = 0x04;

/// The peripheral's addressable state. Single source of truth for the
/// current configuration; persists across transactions until reset.
#[derive(Debug)]
pub struct RegisterFile {
    out_a: u8,
    out_b: u8,
    pwm_ctrl: u8,
    pwm_duty: u8,
    /// Address of the last read frame, if any. Read frames produce no bus
    /// response (there is no readback line); this hook is the only place
    /// they are observable.
    last_read: Option<u8>,
}

impl RegisterFile {
    /// All registers at their zero reset value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out_a: 0,
            out_b: 0,
            pwm_ctrl: 0,
            pwm_duty: 0,
            last_read: None,
        }
    }

    /// Commit a write. Undefined addresses are a no-op.
    pub fn write(&mut self, address: u8, value: u8) {
        match address {
            REG_OUT_A => self.out_a = value,
            REG_OUT_B => self.out_b = value,
            REG_PWM_CTRL => self.pwm_ctrl = value,
            REG_PWM_DUTY => self.pwm_duty = value,
            _ => {}
        }
    }

    /// Nondestructive read. Undefined addresses return 0 (don't-care).
    #[must_use]
    pub fn read(&self, address: u8) -> u8 {
        match address {
            REG_OUT_A => self.out_a,
            REG_OUT_B => self.out_b,
            REG_PWM_CTRL => self.pwm_ctrl,
            REG_PWM_DUTY => self.pwm_duty,
            _ => 0,
        }
    }

    /// Record that a read frame targeted `address`.
    pub fn record_read(&mut self, address: u8) {
        self.last_read = Some(address);
    }

    /// Address of the most recent read frame.
    #[must_use]
    pub fn last_read(&self) -> Option<u8> {
        self.last_read
    }

    /// Output A register content.
    #[must_use]
    pub fn out_a(&self) -> u8 {
        self.out_a
    }

    /// Output B register content.
    #[must_use]
    pub fn out_b(&self) -> u8 {
        self.out_b
    }

    /// Global enable: OUT_A bit 0.
    #[must_use]
    pub fn global_enabled(&self) -> bool {
        self.out_a & 0x01 != 0
    }

    /// PWM generator enable: PWM_CTRL bit 0.
    #[must_use]
    pub fn pwm_enabled(&self) -> bool {
        self.pwm_ctrl & 0x01 != 0
    }

    /// Current duty setting.
    #[must_use]
    pub fn pwm_duty(&self) -> u8 {
        self.pwm_duty
    }

    /// Back to reset values.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
