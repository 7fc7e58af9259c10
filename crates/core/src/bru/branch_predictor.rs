//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements, and the [`Prediction`] value that links a prediction
//! to its later training.
//!
//! Several schemes compute intermediate results at prediction time that the
//! training step must reuse rather than recompute from an already-updated
//! history (the tournament's two sub-predictions, the perceptron's output).
//! Those results travel inside the `Prediction`, so a predictor holds no
//! hidden per-branch state between the two calls.

use crate::common::Outcome;

/// Scheme-specific state captured by `predict` and consumed by `train`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchContext {
    /// Stateless schemes.
    None,
    /// GShare counter index, computed with the pre-update history.
    GShare {
        /// Pattern table index.
        index: usize,
    },
    /// Tournament indices and both sub-predictions.
    Tournament {
        /// Low PC bits selecting the local history entry.
        pc_index: usize,
        /// Local history at prediction time (local counter index).
        local_history: u64,
        /// Global history at prediction time (global counter and selector index).
        global_history: u64,
        /// What the local sub-predictor said.
        local: Outcome,
        /// What the global sub-predictor said.
        global: Outcome,
    },
    /// Perceptron row and dot-product output.
    Perceptron {
        /// Weight table row.
        row: usize,
        /// Bias plus weighted history sum.
        output: i32,
        /// Packed history the output was computed over.
        history: u64,
    },
}

/// A direction prediction for one dynamic branch.
///
/// Returned by [`BranchPredictor::predict`] and handed back, once the branch
/// resolves, to [`BranchPredictor::train`]. Each prediction must be trained
/// before the next branch is predicted.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a prediction must be passed to `train` once the branch resolves"]
pub struct Prediction {
    pc: u32,
    outcome: Outcome,
    context: BranchContext,
}

impl Prediction {
    /// Bundles a predicted direction with its training context.
    pub const fn new(pc: u32, outcome: Outcome, context: BranchContext) -> Self {
        Self {
            pc,
            outcome,
            context,
        }
    }

    /// Program counter of the predicted branch.
    #[inline(always)]
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Predicted direction.
    #[inline(always)]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Shorthand for `self.outcome().is_taken()`.
    #[inline(always)]
    pub const fn is_taken(&self) -> bool {
        self.outcome.is_taken()
    }

    /// Scheme-specific training context.
    #[inline(always)]
    pub const fn context(&self) -> BranchContext {
        self.context
    }
}

/// Trait for branch direction prediction algorithms.
///
/// The driver calls `predict`, executes the branch, then calls `train` with
/// the returned [`Prediction`] and the real outcome. Predictors are not
/// reentrant: predicting a second branch before training the first leaves the
/// first prediction's context stale. Debug builds assert on that misuse.
pub trait BranchPredictor {
    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// Has no side effects on the predictor tables.
    fn predict(&self, pc: u32) -> Prediction;

    /// Trains the predictor with the resolved outcome of `prediction`.
    ///
    /// # Arguments
    ///
    /// * `prediction` - Value returned by the matching `predict` call
    /// * `actual` - Whether the branch was actually taken
    fn train(&mut self, prediction: Prediction, actual: Outcome);

    /// Restores every table to its initial state, keeping the geometry.
    fn reset(&mut self);

    /// Human-readable scheme name.
    fn name(&self) -> &'static str;

    /// Predicts the branch at `pc`, trains with `actual`, and returns the prediction.
    #[inline(always)]
    fn step(&mut self, pc: u32, actual: Outcome) -> Outcome {
        let prediction = self.predict(pc);
        let predicted = prediction.outcome();
        self.train(prediction, actual);
        predicted
    }
}
