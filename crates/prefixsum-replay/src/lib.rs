//! Replay harness for the prefix-sum index.
//!
//! Scripts are JSON Lines, one operation per line:
//!
//! ```text
//! {"op":"create","len":5}
//! {"op":"set","index":0,"value":1}
//! {"op":"range_sum","low":0,"high":2,"expect":1}
//! ```
//!
//! [`Replayer`] executes the steps against a [`PrefixSumIndex`] and records a
//! [`Transcript`] of outcomes and expectation checks. [`scenarios`] holds the
//! built-in self-checking scripts.
//!
//! [`PrefixSumIndex`]: prefixsum_fenwick::PrefixSumIndex

use thiserror::Error;

mod runner;
pub mod scenarios;
mod script;

pub use runner::{DEFAULT_MAX_LEN, Outcome, Replayer, StepReport, Transcript};
pub use scenarios::{Scenario, scenarios};
pub use script::{ErrorKind, Expect, Missing, Op, Step, parse_script, read_script};

/// Errors that abort a replay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: no index has been created yet")]
    NoIndex { line: usize },
}
