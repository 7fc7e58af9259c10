//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `train()`: O(1)
//! - **Space Complexity:** O(2^H) 2-bit counters for an H-bit global history
//! - **Hardware Cost:** Moderate - single PHT lookup, XOR, and counter update
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use super::counter::SaturatingCounter;
use super::history::HistoryRegister;
use super::{BranchContext, BranchPredictor, Prediction};
use crate::common::Outcome;
use crate::config::Config;

/// GShare Predictor structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: HistoryRegister,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<SaturatingCounter>,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor with `2^global_history_bits` counters.
    ///
    /// Counters start weakly not-taken and the history starts cleared.
    pub fn new(config: &Config) -> Self {
        let ghr = HistoryRegister::new(config.global_history_bits);
        Self {
            pht: vec![SaturatingCounter::WN; 1 << config.global_history_bits],
            ghr,
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// XORs the low `H` bits of the PC with the Global History Register.
    #[inline(always)]
    fn index(&self, pc: u32) -> usize {
        let pc_part = u64::from(pc) & self.ghr.mask();
        (pc_part ^ self.ghr.value()) as usize
    }

    /// Current global history.
    pub const fn history(&self) -> u64 {
        self.ghr.value()
    }

    /// The whole Pattern History Table.
    pub fn counters(&self) -> &[SaturatingCounter] {
        &self.pht
    }
}

impl BranchPredictor for GSharePredictor {
    /// Predicts taken if the 2-bit counter at the hashed index is `WT` or `ST`.
    fn predict(&self, pc: u32) -> Prediction {
        let index = self.index(pc);
        let outcome = self.pht[index].prediction();
        Prediction::new(pc, outcome, BranchContext::GShare { index })
    }

    /// Updates the counter selected at prediction time, then shifts the
    /// outcome into the Global History Register.
    fn train(&mut self, prediction: Prediction, actual: Outcome) {
        let BranchContext::GShare { index } = prediction.context() else {
            debug_assert!(false, "gshare trained with a foreign prediction");
            return;
        };
        debug_assert_eq!(
            index,
            self.index(prediction.pc()),
            "gshare history moved between predict and train"
        );

        self.pht[index].update(actual);
        self.ghr.push(actual);
    }

    fn reset(&mut self) {
        self.ghr.clear();
        self.pht.fill(SaturatingCounter::WN);
    }

    fn name(&self) -> &'static str {
        "Gshare"
    }
}
