//! # Unit Components
//!
//! Central hub for the component tests: predictor building blocks and
//! schemes, configuration, trace-driven simulation and statistics.

/// Unit tests for the branch prediction unit.
///
/// Counters, history registers, every scheme and the engine dispatch.
pub mod bru;
