//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (selector table) to choose
//! between a Global predictor and a Local predictor (PAg). This allows the
//! predictor to adapt to different types of branch behaviors.
//!
//! - **Local:** the low `P` PC bits select an `L`-bit local history, which
//!   indexes a table of `2^L` counters.
//! - **Global:** the `H`-bit global history indexes a table of `2^H` counters.
//! - **Selector:** `2^H` counters indexed by the global history. Values below
//!   `WT` choose the local prediction, `WT` and above choose the global one.

use super::counter::SaturatingCounter;
use super::history::{HistoryRegister, mask};
use super::{BranchContext, BranchPredictor, Prediction};
use crate::common::Outcome;
use crate::config::Config;

/// Tournament Predictor structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentPredictor {
    /// Global History Register.
    ghr: HistoryRegister,

    /// Global Pattern History Table (2-bit counters).
    global_pht: Vec<SaturatingCounter>,

    /// Local History Table storing history patterns per PC index.
    local_history_table: Vec<u64>,
    /// Mask keeping each local history `L` bits wide.
    local_mask: u64,
    /// Mask selecting the PC bits that index the Local History Table.
    pc_mask: u32,

    /// Local Pattern History Table indexed by local history patterns.
    local_pht: Vec<SaturatingCounter>,

    /// Choice table (2-bit counters).
    /// Selects between Local (0,1) and Global (2,3) predictors.
    choice_pht: Vec<SaturatingCounter>,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor based on the provided configuration.
    ///
    /// Histories start cleared; both pattern tables start strongly not-taken and
    /// the selector starts strongly favoring the local predictor.
    pub fn new(config: &Config) -> Self {
        let global_size = 1 << config.global_history_bits;
        let local_hist_size = 1 << config.pc_index_bits;
        let local_pred_size = 1 << config.local_history_bits;

        Self {
            ghr: HistoryRegister::new(config.global_history_bits),
            global_pht: vec![SaturatingCounter::SN; global_size],
            local_history_table: vec![0; local_hist_size],
            local_mask: mask(config.local_history_bits),
            pc_mask: (local_hist_size - 1) as u32,
            local_pht: vec![SaturatingCounter::SN; local_pred_size],
            choice_pht: vec![SaturatingCounter::SN; global_size],
        }
    }

    /// Current global history.
    pub const fn global_history(&self) -> u64 {
        self.ghr.value()
    }

    /// Local history of the entry selected by `pc`.
    pub fn local_history(&self, pc: u32) -> u64 {
        self.local_history_table[(pc & self.pc_mask) as usize]
    }

    /// Selector counters, indexed by global history.
    pub fn selectors(&self) -> &[SaturatingCounter] {
        &self.choice_pht
    }

    /// Global pattern table, indexed by global history.
    pub fn global_counters(&self) -> &[SaturatingCounter] {
        &self.global_pht
    }

    /// Local pattern table, indexed by local history.
    pub fn local_counters(&self) -> &[SaturatingCounter] {
        &self.local_pht
    }
}

impl BranchPredictor for TournamentPredictor {
    /// Queries both the Global and Local predictors and lets the selector
    /// entry for the current global history decide which one to use.
    fn predict(&self, pc: u32) -> Prediction {
        let pc_index = (pc & self.pc_mask) as usize;
        let local_history = self.local_history_table[pc_index];
        let local = self.local_pht[local_history as usize].prediction();

        let global_history = self.ghr.value();
        let global = self.global_pht[global_history as usize].prediction();

        let use_global = self.choice_pht[global_history as usize].is_taken();
        let outcome = if use_global { global } else { local };

        Prediction::new(
            pc,
            outcome,
            BranchContext::Tournament {
                pc_index,
                local_history,
                global_history,
                local,
                global,
            },
        )
    }

    /// Trains with the sub-predictions captured at prediction time.
    ///
    /// The selector moves toward whichever sub-predictor was right when they
    /// disagree; both pattern tables and both histories are always updated.
    fn train(&mut self, prediction: Prediction, actual: Outcome) {
        let BranchContext::Tournament {
            pc_index,
            local_history,
            global_history,
            local,
            global,
        } = prediction.context()
        else {
            debug_assert!(false, "tournament trained with a foreign prediction");
            return;
        };
        debug_assert_eq!(
            global_history,
            self.ghr.value(),
            "global history moved between predict and train"
        );
        debug_assert_eq!(
            local_history,
            self.local_history_table[pc_index],
            "local history moved between predict and train"
        );

        let global_idx = global_history as usize;
        let global_correct = global == actual;
        let local_correct = local == actual;

        if global_correct != local_correct {
            let choice = &mut self.choice_pht[global_idx];
            if global_correct {
                choice.increment();
            } else {
                choice.decrement();
            }
        }

        self.global_pht[global_idx].update(actual);
        self.local_pht[local_history as usize].update(actual);

        let lhr = &mut self.local_history_table[pc_index];
        *lhr = ((*lhr << 1) | actual.bit()) & self.local_mask;
        self.ghr.push(actual);
    }

    fn reset(&mut self) {
        self.ghr.clear();
        self.global_pht.fill(SaturatingCounter::SN);
        self.local_history_table.fill(0);
        self.local_pht.fill(SaturatingCounter::SN);
        self.choice_pht.fill(SaturatingCounter::SN);
    }

    fn name(&self) -> &'static str {
        "Tournament"
    }
}
