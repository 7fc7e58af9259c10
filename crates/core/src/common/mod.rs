//! Common types used throughout the predictor models.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Outcomes:** The taken/not-taken result of a conditional branch.
//! 2. **Error Handling:** Configuration, trace and top-level simulation errors.

/// Error types for configuration, trace parsing and simulation.
pub mod error;

/// Branch outcome definition.
pub mod outcome;

pub use error::{ConfigError, SimError, TraceError};
pub use outcome::Outcome;
