//! Branch direction predictor models.
//!
//! This crate implements trace-driven models of conditional branch predictors with the following:
//! 1. **Predictors:** Static, GShare, Tournament (local/global with a selector) and Perceptron.
//! 2. **Primitives:** 2-bit saturating counters, bitwise and signed history registers.
//! 3. **Configuration:** Scheme selection and table geometry, from JSON or the classic
//!    `gshare:<bits>` style predictor spec.
//! 4. **Simulation:** Trace parsing, a predict/train driver, and misprediction statistics.
//!
//! A predictor is used in two steps per branch: [`BranchPredictor::predict`] returns a
//! [`Prediction`] that carries the per-branch context, and [`BranchPredictor::train`]
//! consumes that context together with the resolved outcome.
//!
//! ```
//! use bpsim_core::{BranchPredictor, Config, Outcome, PredictorEngine};
//!
//! let config = Config::from_predictor_spec("gshare:12").unwrap();
//! let mut engine = PredictorEngine::initialize(&config).unwrap();
//!
//! let prediction = engine.predict(0x4000_1234);
//! engine.train(prediction, Outcome::Taken);
//! ```

/// Shared types: branch outcomes and error definitions.
pub mod common;
/// Predictor configuration (defaults, scheme selection, validation).
pub mod config;
/// Branch prediction unit: counters, histories and the predictor schemes.
pub mod bru;
/// Trace reading and the predict/train driver.
pub mod sim;
/// Prediction statistics collection and reporting.
pub mod stats;

pub use crate::bru::{BranchPredictor, Prediction, PredictorEngine};
pub use crate::common::{ConfigError, Outcome, SimError, TraceError};
pub use crate::config::{Config, Scheme};
pub use crate::sim::{BranchRecord, Simulator, TraceReader, run_trace};
pub use crate::stats::PredictionStats;
