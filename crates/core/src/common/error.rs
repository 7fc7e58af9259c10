//! Error definitions.
//!
//! This module defines the error types surfaced by the crate:
//! 1. **Configuration:** Rejected bit widths, unknown schemes, malformed specs and JSON.
//! 2. **Traces:** I/O failures and malformed trace lines (with their line number).
//! 3. **Simulation:** A single error type for the driver, wrapping both of the above.
//!
//! The predictors themselves never fail once constructed; every table index is
//! derived by masking.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Scheme;

/// Errors raised while building or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A table or history width was zero.
    #[error("{field} must be at least 1 bit")]
    ZeroWidth {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// A width exceeds what the table representation supports.
    #[error("{field} = {bits} exceeds the maximum of {max} bits")]
    WidthTooLarge {
        /// Name of the offending parameter.
        field: &'static str,
        /// Requested width.
        bits: u32,
        /// Largest accepted width.
        max: u32,
    },

    /// The widths are individually valid but the tables would not fit in memory.
    #[error("{scheme} tables need {bytes} bytes, more than the {max}-byte limit")]
    TableTooLarge {
        /// Scheme whose tables were sized.
        scheme: Scheme,
        /// Bytes the configuration asks for.
        bytes: u64,
        /// Largest accepted table storage.
        max: u64,
    },

    /// Perceptron weights must be between 2 and 16 bits wide.
    #[error("perceptron weight width {0} is outside 2..=16 bits")]
    WeightWidth(u32),

    /// The scheme name did not match any known predictor.
    #[error("unknown predictor scheme `{0}`")]
    UnknownScheme(String),

    /// A `scheme:bits:...` predictor spec could not be parsed.
    #[error("malformed predictor spec `{spec}`: {reason}")]
    InvalidSpec {
        /// The predictor string as given.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A JSON configuration could not be deserialized.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file could not be read.
    #[error("failed to read configuration {}: {source}", .path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised while reading a branch trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not match `<hex pc> <outcome>`.
    #[error("trace line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}

/// Top-level error for driving a predictor over a trace.
#[derive(Debug, Error)]
pub enum SimError {
    /// The predictor could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be read.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
