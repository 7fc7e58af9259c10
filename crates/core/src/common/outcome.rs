//! Branch outcome.
//!
//! A conditional branch resolves to one of two outcomes. The bitwise history
//! registers shift in `1` for taken and `0` for not taken; the perceptron
//! works on the signed form, `+1` and `-1`.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// Resolved (or predicted) direction of a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The branch falls through.
    #[default]
    NotTaken = 0,
    /// The branch jumps to its target.
    Taken = 1,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Taken`].
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        matches!(self, Self::Taken)
    }

    /// History bit for this outcome (`1` taken, `0` not taken).
    #[inline(always)]
    pub const fn bit(self) -> u64 {
        self as u64
    }

    /// Signed perceptron input for this outcome (`+1` taken, `-1` not taken).
    #[inline(always)]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Taken => 1,
            Self::NotTaken => -1,
        }
    }
}

impl From<bool> for Outcome {
    #[inline(always)]
    fn from(taken: bool) -> Self {
        if taken { Self::Taken } else { Self::NotTaken }
    }
}

impl From<Outcome> for bool {
    #[inline(always)]
    fn from(outcome: Outcome) -> Self {
        outcome.is_taken()
    }
}

impl Not for Outcome {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Taken => Self::NotTaken,
            Self::NotTaken => Self::Taken,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Taken => write!(f, "T"),
            Self::NotTaken => write!(f, "N"),
        }
    }
}
