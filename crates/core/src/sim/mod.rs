//! Trace-driven simulation.
//!
//! Provides the reader for `(pc, outcome)` branch traces and the simulator
//! that replays them through a predictor engine.

/// Predictor engine plus statistics, driven one branch at a time.
pub mod simulator;

/// Text branch trace parsing.
pub mod trace;

pub use simulator::{Simulator, run_trace};
pub use trace::{BranchRecord, TraceReader};
