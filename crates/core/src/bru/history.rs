//! Branch history registers.
//!
//! Two encodings of the same shift register:
//! 1. [`HistoryRegister`]: the bitwise form used to index counter tables,
//!    newest outcome in bit 0.
//! 2. [`SignedHistory`]: the `±1` form consumed by the perceptron, newest
//!    outcome at position 0.

use crate::common::Outcome;

/// Mask covering the low `width` bits.
#[inline(always)]
pub const fn mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

/// Fixed-width shift register of branch outcomes.
///
/// The value is kept masked to exactly `width` bits after every update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HistoryRegister {
    bits: u64,
    width: u32,
}

impl HistoryRegister {
    /// Creates an all-zero register `width` bits wide.
    pub const fn new(width: u32) -> Self {
        Self { bits: 0, width }
    }

    /// Current history value.
    #[inline(always)]
    pub const fn value(&self) -> u64 {
        self.bits
    }

    /// Register width in bits.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Mask applied after each shift.
    #[inline(always)]
    pub const fn mask(&self) -> u64 {
        mask(self.width)
    }

    /// Shifts `outcome` in as the newest bit.
    #[inline(always)]
    pub fn push(&mut self, outcome: Outcome) {
        self.bits = ((self.bits << 1) | outcome.bit()) & self.mask();
    }

    /// Clears every bit of history.
    pub fn clear(&mut self) {
        self.bits = 0;
    }
}

/// The global history as a vector of `+1` (taken) and `-1` (not taken).
///
/// Starts out all `-1`, the signed reading of an all-zero bitwise history.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignedHistory {
    values: Vec<i8>,
}

impl SignedHistory {
    /// Creates a history of `len` not-taken entries.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![-1; len],
        }
    }

    /// Number of outcomes held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a zero-length history.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `±1` entries, newest first.
    #[inline(always)]
    pub fn as_slice(&self) -> &[i8] {
        &self.values
    }

    /// Inserts `outcome` at position 0 and drops the oldest entry.
    pub fn push(&mut self, outcome: Outcome) {
        if self.values.is_empty() {
            return;
        }
        self.values.rotate_right(1);
        self.values[0] = outcome.sign() as i8;
    }

    /// Packs the history back into bits: bit `i` is set iff entry `i` is `+1`.
    ///
    /// Entries past bit 63 are not represented.
    pub fn packed(&self) -> u64 {
        self.values
            .iter()
            .take(u64::BITS as usize)
            .enumerate()
            .filter(|&(_, &v)| v > 0)
            .fold(0, |acc, (i, _)| acc | (1 << i))
    }

    /// Resets every entry to not taken.
    pub fn clear(&mut self) {
        self.values.fill(-1);
    }
}
