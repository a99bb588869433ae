//! Serial frame decoder.
//!
//! Assembles bus clock rising-edge samples into one 16-bit frame per
//! chip-select window: 1 R/W bit, 7 address bits, 8 data bits, MSB first.
//! Deasserting chip-select mid-frame silently drops the partial frame —
//! the protocol has no error channel, so silent drop is the policy.

use crate::sampler::LineEvent;

/// Bits in one complete frame.
const FRAME_BITS: u8 = 16;

/// A decoded 16-bit bus frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Bit 15: true = write, false = read.
    pub write: bool,
    /// Bits 14–8: register address (0–127).
    pub address: u8,
    /// Bits 7–0: data payload.
    pub data: u8,
}

impl Frame {
    /// Split a fully shifted-in 16-bit word into its fields.
    #[must_use]
    pub fn from_bits(bits: u16) -> Self {
        Self {
            write: bits & 0x8000 != 0,
            address: ((bits >> 8) & 0x7F) as u8,
            data: (bits & 0xFF) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for chip-select to assert.
    Idle,
    /// Shifting bits in while chip-select is held low.
    Collecting {
        /// Bits received so far (0–15).
        bits: u8,
        /// Shift register; bit 0 is the most recent sample.
        shift: u16,
    },
}

/// Frame assembly state machine.
#[derive(Debug)]
pub struct FrameDecoder {
    state: State,
}

impl FrameDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Advance one tick with the sampler's event and registered data bit.
    ///
    /// Returns a completed frame on the tick its 16th bit arrives. The
    /// decoder then returns to idle and waits for a fresh chip-select
    /// assertion; further bus clock edges in the same window are ignored.
    pub fn advance(&mut self, event: LineEvent, data: bool) -> Option<Frame> {
        match event {
            LineEvent::CsAsserted => {
                self.state = State::Collecting { bits: 0, shift: 0 };
                None
            }
            LineEvent::CsDeasserted => {
                // Mid-frame abort: partial bits are dropped, nothing commits
                self.state = State::Idle;
                None
            }
            LineEvent::SclkRose => {
                if let State::Collecting { bits, shift } = &mut self.state {
                    *shift = (*shift << 1) | u16::from(data);
                    *bits += 1;
                    if *bits == FRAME_BITS {
                        let frame = Frame::from_bits(*shift);
                        self.state = State::Idle;
                        return Some(frame);
                    }
                }
                None
            }
            // Falling edges exist so the master can change the data line
            LineEvent::SclkFell | LineEvent::None => None,
        }
    }

    /// True while a frame is being shifted in.
    #[must_use]
    pub fn collecting(&self) -> bool {
        matches!(self.state, State::Collecting { .. })
    }

    /// Bits received for the in-progress frame (0 when idle).
    #[must_use]
    pub fn bits_received(&self) -> u8 {
        match self.state {
            State::Idle => 0,
            State::Collecting { bits, .. } => bits,
        }
    }

    /// Shift register contents of the in-progress frame (0 when idle).
    /// The most recent sample sits in bit 0.
    #[must_use]
    pub fn shift_bits(&self) -> u16 {
        match self.state {
            State::Idle => 0,
            State::Collecting { shift, .. } => shift,
        }
    }

    /// Back to idle (synchronous reset).
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock the 16 bits of a frame word through the decoder, MSB first.
    fn shift_frame(decoder: &mut FrameDecoder, word: u16) -> Option<Frame> {
        let mut result = None;
        for i in (0..16).rev() {
            let bit = (word >> i) & 1 != 0;
            let frame = decoder.advance(LineEvent::SclkRose, bit);
            if frame.is_some() {
                result = frame;
            }
        }
        result
    }

    #[test]
    fn decodes_write_frame() {
        let mut decoder = FrameDecoder::new();
        decoder.advance(LineEvent::CsAsserted, false);
        // Write, address 0x04, data 0x80
        let frame = shift_frame(&mut decoder, 0x8480);
        assert_eq!(
            frame,
            Some(Frame {
                write: true,
                address: 0x04,
                data: 0x80
            })
        );
    }

    #[test]
    fn decodes_read_frame() {
        let mut decoder = FrameDecoder::new();
        decoder.advance(LineEvent::CsAsserted, false);
        // Read, address 0x30, data 0xBE
        let frame = shift_frame(&mut decoder, 0x30BE);
        assert_eq!(
            frame,
            Some(Frame {
                write: false,
                address: 0x30,
                data: 0xBE
            })
        );
    }

    #[test]
    fn edges_before_cs_are_ignored() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.advance(LineEvent::SclkRose, true), None);
        assert!(!decoder.collecting());
    }

    #[test]
    fn falling_edges_do_not_sample() {
        let mut decoder = FrameDecoder::new();
        decoder.advance(LineEvent::CsAsserted, false);
        decoder.advance(LineEvent::SclkFell, true);
        assert_eq!(decoder.bits_received(), 0);
    }

    #[test]
    fn shift_register_tracks_partial_frame() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.shift_bits(), 0);
        decoder.advance(LineEvent::CsAsserted, false);
        for bit in [true, false, true, false] {
            decoder.advance(LineEvent::SclkRose, bit);
        }
        assert_eq!(decoder.shift_bits(), 0b1010);
        decoder.advance(LineEvent::CsDeasserted, false);
        assert_eq!(decoder.shift_bits(), 0);
    }

    #[test]
    fn cs_deassert_aborts_partial_frame() {
        let mut decoder = FrameDecoder::new();
        decoder.advance(LineEvent::CsAsserted, false);
        for _ in 0..15 {
            decoder.advance(LineEvent::SclkRose, true);
        }
        assert_eq!(decoder.bits_received(), 15);
        assert_eq!(decoder.advance(LineEvent::CsDeasserted, true), None);
        assert!(!decoder.collecting());
        // The 16th edge after the abort must not complete the old frame
        assert_eq!(decoder.advance(LineEvent::SclkRose, true), None);
    }

    #[test]
    fn seventeenth_edge_in_same_window_is_ignored() {
        let mut decoder = FrameDecoder::new();
        decoder.advance(LineEvent::CsAsserted, false);
        assert!(shift_frame(&mut decoder, 0x8001).is_some());
        // Still inside the same CS window: no new frame without a fresh assert
        assert_eq!(decoder.advance(LineEvent::SclkRose, true), None);
        assert!(!decoder.collecting());
    }

    #[test]
    fn fresh_cs_assert_restarts_collection() {
        let mut decoder = FrameDecoder::new();
        decoder.advance(LineEvent::CsAsserted, false);
        decoder.advance(LineEvent::SclkRose, true);
        decoder.advance(LineEvent::CsDeasserted, false);
        decoder.advance(LineEvent::CsAsserted, false);
        assert_eq!(decoder.bits_received(), 0);
        let frame = shift_frame(&mut decoder, 0x81CC);
        assert_eq!(
            frame,
            Some(Frame {
                write: true,
                address: 0x01,
                data: 0xCC
            })
        );
    }
}
