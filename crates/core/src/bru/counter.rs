//! Two-bit saturating counter.
//!
//! The counter walks the four tiers `SN → WN → WT → ST` and clamps at either
//! end instead of wrapping. The upper half (`WT`, `ST`) predicts taken.

use crate::common::Outcome;

/// A 2-bit saturating counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Strongly not taken.
    pub const SN: Self = Self(0);
    /// Weakly not taken.
    pub const WN: Self = Self(1);
    /// Weakly taken.
    pub const WT: Self = Self(2);
    /// Strongly taken.
    pub const ST: Self = Self(3);

    /// Builds a counter from a raw value, clamping to `ST`.
    pub const fn new(value: u8) -> Self {
        if value > Self::ST.0 { Self::ST } else { Self(value) }
    }

    /// Raw counter value in `0..=3`.
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` when the counter sits in the taken half.
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        self.0 >= Self::WT.0
    }

    /// Direction this counter predicts.
    #[inline(always)]
    pub const fn prediction(self) -> Outcome {
        if self.is_taken() {
            Outcome::Taken
        } else {
            Outcome::NotTaken
        }
    }

    /// Moves one step toward `ST`.
    #[inline(always)]
    pub fn increment(&mut self) {
        if self.0 < Self::ST.0 {
            self.0 += 1;
        }
    }

    /// Moves one step toward `SN`.
    #[inline(always)]
    pub fn decrement(&mut self) {
        if self.0 > Self::SN.0 {
            self.0 -= 1;
        }
    }

    /// Moves one step toward the given outcome.
    #[inline(always)]
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Taken => self.increment(),
            Outcome::NotTaken => self.decrement(),
        }
    }
}
