//! Prediction statistics collection and reporting.
//!
//! This module tracks how a predictor fared over a trace. It provides:
//! 1. **Summary:** Branch count, mispredictions and the misprediction rate.
//! 2. **Branch breakdown:** Taken/not-taken split of the trace and of the predictions.

use std::io::{self, Write};

use serde::Serialize;

use crate::common::Outcome;

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"branch"`.
/// Pass an empty slice to `write_sections` to write all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "branch"];

/// Prediction statistics for one trace replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PredictionStats {
    /// Conditional branches seen.
    pub branches: u64,
    /// Branches whose prediction disagreed with the outcome.
    pub mispredictions: u64,
    /// Branches that were actually taken.
    pub taken: u64,
    /// Branches that were predicted taken.
    pub predicted_taken: u64,
}

impl PredictionStats {
    /// Scores one prediction against its resolved outcome.
    #[inline(always)]
    pub fn record(&mut self, predicted: Outcome, actual: Outcome) {
        self.branches += 1;
        self.mispredictions += u64::from(predicted != actual);
        self.taken += u64::from(actual.is_taken());
        self.predicted_taken += u64::from(predicted.is_taken());
    }

    /// Number of correct predictions.
    pub const fn correct(&self) -> u64 {
        self.branches - self.mispredictions
    }

    /// Percentage of branches mispredicted; `0.0` for an empty trace.
    pub fn misprediction_rate(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            100.0 * (self.mispredictions as f64 / self.branches as f64)
        }
    }

    /// Percentage of branches predicted correctly; `0.0` for an empty trace.
    pub fn accuracy(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            100.0 - self.misprediction_rate()
        }
    }

    /// Writes only the requested statistics sections.
    ///
    /// Each element of `sections` should be one of `"summary"` or `"branch"`.
    /// Pass an empty slice to write all sections.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the report.
    /// * `sections` - Slice of section names to write, or empty for all.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_sections<W: Write>(&self, mut out: W, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let pct = |n: u64| {
            if self.branches == 0 {
                0.0
            } else {
                (n as f64 / self.branches as f64) * 100.0
            }
        };

        writeln!(out, "==========================================================")?;
        writeln!(out, "BRANCH PREDICTION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        if want("summary") {
            writeln!(out, "Branches:           {:10}", self.branches)?;
            writeln!(out, "Incorrect:          {:10}", self.mispredictions)?;
            writeln!(out, "Misprediction Rate: {:10.3}", self.misprediction_rate())?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("branch") {
            let not_taken = self.branches - self.taken;
            let predicted_not_taken = self.branches - self.predicted_taken;
            writeln!(out, "BRANCH BREAKDOWN")?;
            writeln!(
                out,
                "  trace.taken            {} ({:.2}%)",
                self.taken,
                pct(self.taken)
            )?;
            writeln!(
                out,
                "  trace.not_taken        {} ({:.2}%)",
                not_taken,
                pct(not_taken)
            )?;
            writeln!(
                out,
                "  pred.taken             {} ({:.2}%)",
                self.predicted_taken,
                pct(self.predicted_taken)
            )?;
            writeln!(
                out,
                "  pred.not_taken         {} ({:.2}%)",
                predicted_not_taken,
                pct(predicted_not_taken)
            )?;
            writeln!(out, "  bp.accuracy            {:.2}%", self.accuracy())?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        Ok(())
    }

    /// Prints the requested sections to stdout.
    ///
    /// # Errors
    ///
    /// Fails when stdout cannot be written.
    pub fn print_sections(&self, sections: &[String]) -> io::Result<()> {
        self.write_sections(io::stdout().lock(), sections)
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    ///
    /// # Errors
    ///
    /// Fails when stdout cannot be written.
    pub fn print(&self) -> io::Result<()> {
        self.print_sections(&[])
    }
}
