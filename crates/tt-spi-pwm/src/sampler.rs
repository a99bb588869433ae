//! Bus line sampler and edge detector.
//!
//! The three bus lines (chip-select, bus clock, data) live in an external
//! clock domain and are never trusted combinationally. Each system clock
//! tick they are registered, and edges are derived by comparing the newly
//! registered level against the previously registered one. A level must
//! therefore hold across a full system clock sample point before an edge
//! is produced.

/// One bit-level event per system clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// No line changed state.
    None,
    /// Bus clock rose (the decoder samples data on this).
    SclkRose,
    /// Bus clock fell (the master may change the data line now).
    SclkFell,
    /// Chip-select went low: a transaction begins.
    CsAsserted,
    /// Chip-select went high: the transaction window closed.
    CsDeasserted,
}

/// Registers the raw bus lines once per tick and derives edge events.
#[derive(Debug)]
pub struct LineSampler {
    /// Chip-select as registered this tick (raw line is active low).
    cs: bool,
    /// Bus clock as registered this tick.
    sclk: bool,
    /// Data line as registered this tick.
    copi: bool,
    /// Chip-select as registered the previous tick.
    cs_prev: bool,
    /// Bus clock as registered the previous tick.
    sclk_prev: bool,
}

impl LineSampler {
    /// Line history preset to the idle bus state (chip-select high, bus
    /// clock low) so the first tick after reset never fabricates an edge.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cs: true,
            sclk: false,
            copi: false,
            cs_prev: true,
            sclk_prev: false,
        }
    }

    /// Register the raw lines for this tick and return the derived event.
    ///
    /// Chip-select edges take priority over bus clock edges when both
    /// lines changed in the same tick; the bus clock edge is dropped, not
    /// deferred, which matches a transaction window opening or closing.
    pub fn sample(&mut self, cs: bool, sclk: bool, copi: bool) -> LineEvent {
        self.cs_prev = self.cs;
        self.sclk_prev = self.sclk;
        self.cs = cs;
        self.sclk = sclk;
        self.copi = copi;

        if self.cs_prev && !self.cs {
            LineEvent::CsAsserted
        } else if !self.cs_prev && self.cs {
            LineEvent::CsDeasserted
        } else if !self.sclk_prev && self.sclk {
            LineEvent::SclkRose
        } else if self.sclk_prev && !self.sclk {
            LineEvent::SclkFell
        } else {
            LineEvent::None
        }
    }

    /// The data line as registered this tick.
    ///
    /// Valid to sample on `SclkRose`: the master holds data stable through
    /// the bus clock low phase and the rising edge.
    #[must_use]
    pub fn data(&self) -> bool {
        self.copi
    }

    /// Back to the idle bus state (synchronous reset).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for LineSampler {
    fn default() -> Self {
        Self::new()
    }
}
