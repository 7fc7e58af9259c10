//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the conditional branch direction predictors (static,
//! gshare, tournament and perceptron), their shared building blocks
//! (saturating counters and history registers), and the [`PredictorEngine`]
//! that owns whichever scheme the configuration selects.

pub use self::branch_predictor::{BranchContext, BranchPredictor, Prediction};

/// Branch predictor trait and the predict/train context.
pub mod branch_predictor;

/// Two-bit saturating counters.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Bitwise and signed branch history registers.
pub mod history;

/// Perceptron-based neural branch predictor.
pub mod perceptron;

/// Static branch predictor (always taken) and the unsupported-scheme fallback.
pub mod static_bp;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use tracing::{debug, warn};

use self::{
    gshare::GSharePredictor,
    perceptron::PerceptronPredictor,
    static_bp::{FallbackPredictor, StaticPredictor},
    tournament::TournamentPredictor,
};
use crate::common::{ConfigError, Outcome};
use crate::config::{Config, Scheme};

/// Predictor engine: exactly one scheme's tables, selected at initialization.
///
/// Enum wrapper for static dispatch, which keeps the per-branch loop free of
/// vtable lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredictorEngine {
    /// Always taken.
    Static(StaticPredictor),
    /// Global history XOR PC.
    GShare(GSharePredictor),
    /// Local/global with a selector.
    Tournament(TournamentPredictor),
    /// Perceptron table.
    Perceptron(PerceptronPredictor),
    /// Reserved scheme slot; always not taken.
    Fallback(FallbackPredictor),
}

impl PredictorEngine {
    /// Validates `config` and allocates the tables of the selected scheme only.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a width used by the scheme is zero or
    /// too large.
    pub fn initialize(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let engine = match config.scheme {
            Scheme::Static => Self::Static(StaticPredictor::new()),
            Scheme::GShare => Self::GShare(GSharePredictor::new(config)),
            Scheme::Tournament => Self::Tournament(TournamentPredictor::new(config)),
            Scheme::Perceptron => Self::Perceptron(PerceptronPredictor::new(config)),
            Scheme::Custom => {
                warn!("no predictor implements the Custom scheme; predicting not-taken");
                Self::Fallback(FallbackPredictor::new())
            }
        };

        debug!(
            scheme = %config.scheme,
            ghistory = config.global_history_bits,
            lhistory = config.local_history_bits,
            pc_index = config.pc_index_bits,
            "initialized branch predictor"
        );
        Ok(engine)
    }

    /// Scheme this engine was initialized with.
    pub const fn scheme(&self) -> Scheme {
        match self {
            Self::Static(_) => Scheme::Static,
            Self::GShare(_) => Scheme::GShare,
            Self::Tournament(_) => Scheme::Tournament,
            Self::Perceptron(_) => Scheme::Perceptron,
            Self::Fallback(_) => Scheme::Custom,
        }
    }
}

impl BranchPredictor for PredictorEngine {
    #[inline(always)]
    fn predict(&self, pc: u32) -> Prediction {
        match self {
            Self::Static(bp) => bp.predict(pc),
            Self::GShare(bp) => bp.predict(pc),
            Self::Tournament(bp) => bp.predict(pc),
            Self::Perceptron(bp) => bp.predict(pc),
            Self::Fallback(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn train(&mut self, prediction: Prediction, actual: Outcome) {
        match self {
            Self::Static(bp) => bp.train(prediction, actual),
            Self::GShare(bp) => bp.train(prediction, actual),
            Self::Tournament(bp) => bp.train(prediction, actual),
            Self::Perceptron(bp) => bp.train(prediction, actual),
            Self::Fallback(bp) => bp.train(prediction, actual),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Static(bp) => bp.reset(),
            Self::GShare(bp) => bp.reset(),
            Self::Tournament(bp) => bp.reset(),
            Self::Perceptron(bp) => bp.reset(),
            Self::Fallback(bp) => bp.reset(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Static(bp) => bp.name(),
            Self::GShare(bp) => bp.name(),
            Self::Tournament(bp) => bp.name(),
            Self::Perceptron(bp) => bp.name(),
            Self::Fallback(bp) => bp.name(),
        }
    }
}
