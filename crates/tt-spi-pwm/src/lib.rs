//! SPI-controlled PWM peripheral.
//!
//! A fixed-function peripheral reachable over a 3-wire bus (active-low
//! chip-select, bus clock, single master-to-peripheral data line). Each
//! transaction shifts one 16-bit frame in MSB first — 1 R/W bit, 7 address
//! bits, 8 data bits — addressing an 8-bit register file that configures
//! two mirrored output bytes and a PWM generator.
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
//! Everything advances once per system clock tick in a fixed order: line
//! sampler, frame decoder, register commit, PWM generator. The bus lines
//! are the only asynchronous inputs and are always registered before use.

mod decoder;
mod pwm;
mod registers;
mod sampler;

pub use decoder::{Frame, FrameDecoder};
pub use pwm::{CARRIER_PERIOD_TICKS, PwmGenerator, duty_threshold};
pub use registers::{REG_OUT_A, REG_OUT_B, REG_PWM_CTRL, REG_PWM_DUTY, RegisterFile};
pub use sampler::{LineEvent, LineSampler};

use sim_core::{Observable, Tickable, Value};

/// The peripheral: bus front-end, register file, and PWM generator.
#[derive(Debug)]
pub struct SpiPwm {
    /// Raw chip-select input (active low). Set by the external master.
    cs_in: bool,
    /// Raw bus clock input.
    sclk_in: bool,
    /// Raw data line input.
    copi_in: bool,

    sampler: LineSampler,
    decoder: FrameDecoder,
    registers: RegisterFile,
    pwm: PwmGenerator,
}

impl SpiPwm {
    /// Power-on state: registers zeroed, bus idle (chip-select high).
    #[must_use]
    pub fn new() -> Self {
        Self {
            cs_in: true,
            sclk_in: false,
            copi_in: false,
            sampler: LineSampler::new(),
            decoder: FrameDecoder::new(),
            registers: RegisterFile::new(),
            pwm: PwmGenerator::new(),
        }
    }

    /// Drive the raw bus lines. Takes effect at the next tick; the lines
    /// are sampled, never acted on combinationally.
    pub fn set_lines(&mut self, cs: bool, sclk: bool, copi: bool) {
        self.cs_in = cs;
        self.sclk_in = sclk;
        self.copi_in = copi;
    }

    /// Synchronous reset: registers to defaults, in-progress frame
    /// aborted, PWM back to phase zero. Line inputs are left as driven.
    pub fn reset(&mut self) {
        self.sampler.reset();
        self.decoder.reset();
        self.registers.reset();
        self.pwm.reset();
    }

    /// Output A byte. Mirrors register 0x00; when both the global enable
    /// (0x00 bit 0) and the PWM enable (0x02 bit 0) are set, bit 0 carries
    /// the PWM waveform instead.
    #[must_use]
    pub fn output_a(&self) -> u8 {
        let byte = self.registers.out_a();
        if self.registers.global_enabled() && self.registers.pwm_enabled() {
            (byte & !0x01) | u8::from(self.pwm.level())
        } else {
            byte
        }
    }

    /// Output B byte, mirroring register 0x01.
    #[must_use]
    pub fn output_b(&self) -> u8 {
        self.registers.out_b()
    }

    /// The register file, for inspection.
    #[must_use]
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }
}

impl Default for SpiPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl Tickable for SpiPwm {
    /// One system clock tick: sample lines, advance the decoder, commit a
    /// completed write, then tick the PWM generator.
    fn tick(&mut self) {
        // The generator consumes the register values as they stood at the
        // start of the tick; a write committed below is first visible to
        // it on the next tick.
        let pwm_enabled = self.registers.pwm_enabled();
        let duty = self.registers.pwm_duty();

        let event = self.sampler.sample(self.cs_in, self.sclk_in, self.copi_in);
        if let Some(frame) = self.decoder.advance(event, self.sampler.data()) {
            if frame.write {
                self.registers.write(frame.address, frame.data);
            } else {
                self.registers.record_read(frame.address);
            }
        }

        self.pwm.tick(pwm_enabled, duty);
    }
}

impl Observable for SpiPwm {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "registers.out_a" => Some(self.registers.out_a().into()),
            "registers.out_b" => Some(self.registers.out_b().into()),
            "registers.pwm_ctrl" => Some(self.registers.read(REG_PWM_CTRL).into()),
            "registers.pwm_duty" => Some(self.registers.pwm_duty().into()),
            "registers.last_read" => self.registers.last_read().map(Value::from),
            "decoder.collecting" => Some(self.decoder.collecting().into()),
            "decoder.bits_received" => Some(self.decoder.bits_received().into()),
            "decoder.shift" => Some(self.decoder.shift_bits().into()),
            "pwm.counter" => Some(self.pwm.counter().into()),
            "pwm.level" => Some(self.pwm.level().into()),
            "output.a" => Some(self.output_a().into()),
            "output.b" => Some(self.output_b().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "registers.out_a",
            "registers.out_b",
            "registers.pwm_ctrl",
            "registers.pwm_duty",
            "registers.last_read",
            "decoder.collecting",
            "decoder.bits_received",
            "decoder.shift",
            "pwm.counter",
            "pwm.level",
            "output.a",
            "output.b",
        ]
    }
}
