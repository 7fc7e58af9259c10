//! Branch trace reader.
//!
//! Traces are plain text, one conditional branch per line in program order:
//!
//! ```text
//! # pc        outcome
//! 0x40d7f8    1
//! 40d800      0
//! ```
//!
//! The PC is hexadecimal with an optional `0x` prefix and must fit in 32 bits.
//! The outcome is `1`/`0` or `T`/`N`. Blank lines and `#` comments are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::{Outcome, TraceError};

/// One resolved conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BranchRecord {
    /// Program counter of the branch.
    pub pc: u32,
    /// Resolved direction.
    pub outcome: Outcome,
}

impl BranchRecord {
    /// Creates a record.
    pub const fn new(pc: u32, outcome: Outcome) -> Self {
        Self { pc, outcome }
    }
}

/// Iterator over the records of a text trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            match parse_line(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(reason) => {
                    return Some(Err(TraceError::Parse {
                        line: self.line_no,
                        reason,
                    }));
                }
            }
        }
    }
}

/// Parses one trace line; `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a description of the problem for a missing or extra field, a PC
/// that is not 32-bit hex, or an unknown outcome.
pub fn parse_line(line: &str) -> Result<Option<BranchRecord>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let (Some(pc), Some(outcome)) = (fields.next(), fields.next()) else {
        return Err(format!("expected `<pc> <outcome>`, got `{line}`"));
    };
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected trailing field `{extra}`"));
    }

    let digits = pc
        .strip_prefix("0x")
        .or_else(|| pc.strip_prefix("0X"))
        .unwrap_or(pc);
    let pc = u32::from_str_radix(digits, 16)
        .map_err(|e| format!("invalid 32-bit hex pc `{pc}`: {e}"))?;

    let outcome = match outcome {
        "1" | "T" | "t" => Outcome::Taken,
        "0" | "N" | "n" => Outcome::NotTaken,
        other => return Err(format!("invalid outcome `{other}`, expected 0/1 or N/T")),
    };

    Ok(Some(BranchRecord { pc, outcome }))
}
