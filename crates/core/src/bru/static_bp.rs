//! Stateless Branch Predictors.
//!
//! [`StaticPredictor`] implements the "Always Taken" policy. [`FallbackPredictor`]
//! backs the reserved `Custom` scheme slot: it predicts not-taken for every
//! branch so a driver loop keeps running when no real predictor is selected.
//! Neither holds any state, so training has no effect.

use super::{BranchContext, BranchPredictor, Prediction};
use crate::common::Outcome;

/// Static "Always Taken" predictor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts conditional branches as taken.
    fn predict(&self, pc: u32) -> Prediction {
        Prediction::new(pc, Outcome::Taken, BranchContext::None)
    }

    fn train(&mut self, _prediction: Prediction, _actual: Outcome) {}

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "Static"
    }
}

/// Predictor for an unsupported scheme: always not taken, never trains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FallbackPredictor;

impl FallbackPredictor {
    /// Creates a new Fallback Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for FallbackPredictor {
    fn predict(&self, pc: u32) -> Prediction {
        Prediction::new(pc, Outcome::NotTaken, BranchContext::None)
    }

    fn train(&mut self, _prediction: Prediction, _actual: Outcome) {}

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "Custom"
    }
}
