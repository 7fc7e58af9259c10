//! Simulator: owns the predictor engine and its statistics side-by-side.
//!
//! Each record is predicted, trained with its real outcome, and scored, in
//! trace order. The engine never sees the statistics and the statistics never
//! see the predictor tables.

use tracing::{debug, trace};

use super::trace::BranchRecord;
use crate::bru::{BranchPredictor, PredictorEngine};
use crate::common::{Outcome, SimError, TraceError};
use crate::config::Config;
use crate::stats::PredictionStats;

/// Top-level simulator: predictor engine + prediction statistics.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// Predictor engine for the configured scheme.
    pub engine: PredictorEngine,
    /// Counts gathered so far.
    pub stats: PredictionStats,
}

impl Simulator {
    /// Creates a simulator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] when the configuration is rejected.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        Ok(Self::with_engine(PredictorEngine::initialize(config)?))
    }

    /// Creates a simulator around an existing engine.
    pub fn with_engine(engine: PredictorEngine) -> Self {
        Self {
            engine,
            stats: PredictionStats::default(),
        }
    }

    /// Predicts, trains and scores a single branch; returns the prediction.
    pub fn step(&mut self, record: BranchRecord) -> Outcome {
        score(&mut self.engine, &mut self.stats, record)
    }

    /// Replays a whole trace, stopping at the first read or parse error.
    ///
    /// Statistics accumulate across calls; branches before an error stay counted.
    ///
    /// # Errors
    ///
    /// Returns the first [`TraceError`] yielded by `records`.
    pub fn run<I>(&mut self, records: I) -> Result<&PredictionStats, TraceError>
    where
        I: IntoIterator<Item = Result<BranchRecord, TraceError>>,
    {
        for record in records {
            let _ = self.step(record?);
        }
        debug!(
            scheme = self.engine.name(),
            branches = self.stats.branches,
            mispredictions = self.stats.mispredictions,
            "trace replay finished"
        );
        Ok(&self.stats)
    }

    /// Restores the engine tables and clears the statistics.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.stats = PredictionStats::default();
    }
}

/// Replays `records` through any predictor and returns fresh statistics.
///
/// Branches are predicted and trained in trace order. The first read or parse
/// error aborts the replay.
///
/// # Errors
///
/// Returns [`SimError::Trace`] wrapping the first error yielded by `records`.
pub fn run_trace<P, I>(predictor: &mut P, records: I) -> Result<PredictionStats, SimError>
where
    P: BranchPredictor + ?Sized,
    I: IntoIterator<Item = Result<BranchRecord, TraceError>>,
{
    let mut stats = PredictionStats::default();
    for record in records {
        let _ = score(predictor, &mut stats, record?);
    }
    Ok(stats)
}

#[inline(always)]
fn score<P>(predictor: &mut P, stats: &mut PredictionStats, record: BranchRecord) -> Outcome
where
    P: BranchPredictor + ?Sized,
{
    let predicted = predictor.step(record.pc, record.outcome);
    trace!(
        pc = format_args!("{:#010x}", record.pc),
        predicted = %predicted,
        actual = %record.outcome,
        "branch"
    );
    stats.record(predicted, record.outcome);
    predicted
}
