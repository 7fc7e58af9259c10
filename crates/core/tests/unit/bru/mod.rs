//! Branch prediction unit tests.

/// Saturating counter behavior.
pub mod counter;

/// Engine initialization, dispatch, determinism and reset.
pub mod engine;





/// Tournament selection and training.
pub mod tournament;
