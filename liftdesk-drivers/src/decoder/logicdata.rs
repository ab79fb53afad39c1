//! LOGICDATA-style display wire decoder
//!
//! The desk's motor controller drives its height display over a
//! single-wire serial protocol: the line idles high and words are
//! 32 bits of NRZ data in 1 ms cells, beginning with a falling edge
//! (the first bit on the wire is always zero). Words are separated by
//! a long high gap.
//!
//! An interrupt-style capture task timestamps every edge and feeds it
//! in via [`LogicDecoder::feed_edge`]; the decoder reconstructs words
//! from the run lengths between edges. Words whose trailing bits are
//! high have no terminating edge, so [`LogicDecoder::finish_idle`]
//! must be called periodically to flush a word once the line has
//! rested in idle.
//!
//! Height readouts are recognized by a fixed key in the upper bits;
//! the low byte carries the height in centimeters. Every other word
//! is reported as display activity (display-on, menu chatter), which
//! still counts as a live sensor signal upstream.

use heapless::Deque;

use liftdesk_core::traits::{DisplayMessage, PositionDecoder};

/// One bit cell on the wire (µs)
pub const BIT_US: u64 = 1000;

/// Bits per word
pub const WORD_BITS: u8 = 32;

/// High run longer than this is an inter-word gap (µs)
///
/// Longer than any in-word run (at most 31 bit cells) so a word is
/// never cut in half.
pub const IDLE_GAP_US: u64 = 33 * BIT_US;

/// Key and mask identifying a height readout word
const NUMBER_KEY: u32 = 0x4060_1000;
const NUMBER_MASK: u32 = 0xFFFF_F000;

/// Decoded word backlog; the polling cycle drains far faster than the
/// display transmits
const WORD_QUEUE: usize = 8;

/// A captured line transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edge {
    /// Line level after the transition
    pub level: bool,
    /// Capture timestamp (µs)
    pub t_us: u64,
}

/// Run-length decoder for the display wire
#[derive(Debug)]
pub struct LogicDecoder {
    last_level: bool,
    last_edge_us: u64,
    in_word: bool,
    shift: u32,
    nbits: u8,
    words: Deque<u32, WORD_QUEUE>,
}

impl Default for LogicDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicDecoder {
    /// Create a decoder assuming an idle-high line
    pub fn new() -> Self {
        Self {
            last_level: true,
            last_edge_us: 0,
            in_word: false,
            shift: 0,
            nbits: 0,
            words: Deque::new(),
        }
    }

    /// Feed one captured edge
    pub fn feed_edge(&mut self, edge: Edge) {
        let prev = self.last_level;
        if edge.level == prev {
            // duplicate capture, not a transition; keep the original
            // timestamp so run lengths stay accurate
            return;
        }
        let dt = edge.t_us.saturating_sub(self.last_edge_us);
        self.last_level = edge.level;
        self.last_edge_us = edge.t_us;

        if !self.in_word {
            // a falling edge out of idle opens a word
            if prev && !edge.level {
                self.in_word = true;
                self.shift = 0;
                self.nbits = 0;
            }
            return;
        }

        if !prev && dt > IDLE_GAP_US {
            // line was stuck low; the partial word is garbage
            self.in_word = false;
            return;
        }

        // The previous level persisted for dt: that many bit cells.
        // Runt pulses still count as one cell.
        let run = ((dt + BIT_US / 2) / BIT_US).clamp(1, WORD_BITS as u64) as u8;
        let take = run.min(WORD_BITS - self.nbits);
        for _ in 0..take {
            self.shift = (self.shift << 1) | u32::from(prev);
            self.nbits += 1;
        }

        if self.nbits == WORD_BITS {
            let _ = self.words.push_back(self.shift);
            self.in_word = false;
            self.shift = 0;
            self.nbits = 0;
            // an over-long high run ending in a falling edge is the
            // gap plus the start of the next word
            if prev && !edge.level {
                self.in_word = true;
            }
        }
    }

    /// Flush a word whose trailing bits are high
    ///
    /// Call once per polling cycle with the current time; a no-op
    /// unless the line has idled past the inter-word gap.
    pub fn finish_idle(&mut self, now_us: u64) {
        if !self.in_word {
            return;
        }
        if now_us.saturating_sub(self.last_edge_us) <= IDLE_GAP_US {
            return;
        }
        if self.last_level {
            while self.nbits < WORD_BITS {
                self.shift = (self.shift << 1) | 1;
                self.nbits += 1;
            }
            let _ = self.words.push_back(self.shift);
        }
        // a line resting low is a wiring fault; drop the partial word
        self.in_word = false;
        self.shift = 0;
        self.nbits = 0;
    }

    fn classify(word: u32) -> DisplayMessage {
        if word & NUMBER_MASK == NUMBER_KEY {
            DisplayMessage::Height((word & 0xFF) as u8)
        } else {
            DisplayMessage::Activity
        }
    }
}

impl PositionDecoder for LogicDecoder {
    fn poll(&mut self) -> Option<DisplayMessage> {
        self.words.pop_front().map(Self::classify)
    }
}
