//! Perceptron Branch Predictor.
//!
//! Uses a single-layer perceptron to predict branch direction. Instead of
//! saturating counters, it keeps a table of weight vectors. The prediction is
//! the sign of the bias plus the dot product of the weights and the signed
//! global history.
//!
//! See "Dynamic Branch Prediction with Perceptrons" (Jiménez and Lin, 2001).
//!
//! - **Indexing:** `(pc XOR packed history) & (2^P - 1)` selects a row.
//! - **Row layout:** `H` history weights followed by the bias, `H + 1` slots.
//! - **Training:** on a misprediction, or when `|output| <= threshold`, every
//!   weight moves by `actual × history[i]` and the bias by `actual`, clamped to
//!   the configured signed weight range.

use super::history::{SignedHistory, mask};
use super::{BranchContext, BranchPredictor, Prediction};
use crate::common::Outcome;
use crate::config::Config;

/// Coefficient used to calculate the training threshold.
const THETA_COEFF: f64 = 1.93;
/// Bias used to calculate the training threshold.
const THETA_BIAS: f64 = 14.0;

/// Training threshold for a history of `history_length` outcomes.
///
/// `round(1.93 × H + 14)`.
pub fn training_threshold(history_length: usize) -> i32 {
    THETA_COEFF.mul_add(history_length as f64, THETA_BIAS).round() as i32
}

/// Perceptron Predictor structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerceptronPredictor {
    /// Signed global history, newest outcome first.
    history: SignedHistory,
    /// Table of weights (flattened, `row_size` weights per row).
    table: Vec<i16>,
    /// Mask for indexing the table.
    table_mask: u64,
    /// Size of a single row in the table (history length + bias).
    row_size: usize,
    /// Training threshold (theta).
    threshold: i32,
    /// Smallest representable weight.
    weight_min: i32,
    /// Largest representable weight.
    weight_max: i32,
}

impl PerceptronPredictor {
    /// Creates a new Perceptron Predictor based on configuration.
    ///
    /// `global_history_bits` sets the history length and `pc_index_bits` the
    /// number of rows. All weights start at zero.
    pub fn new(config: &Config) -> Self {
        let hist_len = config.global_history_bits as usize;
        let table_entries = 1usize << config.pc_index_bits;
        let row_size = hist_len + 1;

        Self {
            history: SignedHistory::new(hist_len),
            table: vec![0; table_entries * row_size],
            table_mask: mask(config.pc_index_bits),
            row_size,
            threshold: training_threshold(hist_len),
            weight_min: config.perceptron.weight_min(),
            weight_max: config.perceptron.weight_max(),
        }
    }

    /// Calculates the weight table row for `pc` under the current history.
    #[inline(always)]
    pub fn index(&self, pc: u32) -> usize {
        self.row_for(pc, self.history.packed())
    }

    #[inline(always)]
    const fn row_for(&self, pc: u32, packed: u64) -> usize {
        ((pc as u64 ^ packed) & self.table_mask) as usize
    }

    /// Computes the perceptron output for a given row.
    ///
    /// Sums the bias weight and the product of history entries and weights.
    fn output(&self, row_idx: usize) -> i32 {
        let row = self.row(row_idx);
        let (weights, bias) = row.split_at(self.row_size - 1);
        weights
            .iter()
            .zip(self.history.as_slice())
            .fold(i32::from(bias[0]), |y, (&w, &x)| {
                y + i32::from(w) * i32::from(x)
            })
    }

    fn row(&self, row_idx: usize) -> &[i16] {
        let base = row_idx * self.row_size;
        &self.table[base..base + self.row_size]
    }

    /// Weights of one row, history weights first and bias last.
    pub fn weights(&self, row_idx: usize) -> Option<&[i16]> {
        let base = row_idx.checked_mul(self.row_size)?;
        self.table.get(base..base + self.row_size)
    }

    /// Signed history, newest outcome first.
    pub fn history(&self) -> &[i8] {
        self.history.as_slice()
    }

    /// Training threshold (theta).
    pub const fn threshold(&self) -> i32 {
        self.threshold
    }
}

impl BranchPredictor for PerceptronPredictor {
    /// Predicts taken if the perceptron output is non-negative.
    fn predict(&self, pc: u32) -> Prediction {
        let history = self.history.packed();
        let row = self.row_for(pc, history);
        let output = self.output(row);
        let outcome = Outcome::from(output >= 0);
        Prediction::new(
            pc,
            outcome,
            BranchContext::Perceptron {
                row,
                output,
                history,
            },
        )
    }

    /// Trains the perceptron if a misprediction occurred or if the confidence
    /// (magnitude of the output) was at or below the training threshold, then
    /// shifts the outcome into the history.
    fn train(&mut self, prediction: Prediction, actual: Outcome) {
        let BranchContext::Perceptron {
            row,
            output,
            history,
        } = prediction.context()
        else {
            debug_assert!(false, "perceptron trained with a foreign prediction");
            return;
        };
        debug_assert_eq!(
            history,
            self.history.packed(),
            "perceptron history moved between predict and train"
        );

        let t = actual.sign();
        let mispredicted = (output >= 0) != actual.is_taken();

        if mispredicted || output.abs() <= self.threshold {
            let (lo, hi) = (self.weight_min, self.weight_max);
            let base = row * self.row_size;
            let weights = &mut self.table[base..base + self.row_size];
            let (history_weights, bias) = weights.split_at_mut(self.row_size - 1);

            bias[0] = (i32::from(bias[0]) + t).clamp(lo, hi) as i16;
            for (w, &x) in history_weights.iter_mut().zip(self.history.as_slice()) {
                *w = (i32::from(*w) + t * i32::from(x)).clamp(lo, hi) as i16;
            }
        }

        self.history.push(actual);
    }

    fn reset(&mut self) {
        self.history.clear();
        self.table.fill(0);
    }

    fn name(&self) -> &'static str {
        "Perceptron"
    }
}
