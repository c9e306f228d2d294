use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::ScriptError;

/// One operation against the index.
///
/// Indices and lengths are signed so that boundary cases such as a negative
/// length or the empty prefix (`-1`) can be scripted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Create { len: i64 },
    Add { index: i64, delta: i64 },
    Set { index: i64, value: i64 },
    Get { index: i64 },
    PrefixSum { index: i64 },
    RangeSum { low: i64, high: i64 },
    Total,
    LowerBound { target: i64 },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Create { len } => write!(f, "create len={len}"),
            Op::Add { index, delta } => write!(f, "add index={index} delta={delta}"),
            Op::Set { index, value } => write!(f, "set index={index} value={value}"),
            Op::Get { index } => write!(f, "get index={index}"),
            Op::PrefixSum { index } => write!(f, "prefix_sum index={index}"),
            Op::RangeSum { low, high } => write!(f, "range_sum low={low} high={high}"),
            Op::Total => write!(f, "total"),
            Op::LowerBound { target } => write!(f, "lower_bound target={target}"),
        }
    }
}

/// Error kinds a step can expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    OutOfRange,
    InvalidArgument,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::InvalidArgument => "invalid_argument",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Missing {
    None,
}

/// Expected result of a step.
///
/// On the wire: an integer (`"expect": 9`), the string `"none"` for a
/// `lower_bound` that finds nothing, or `{"error": "out_of_range"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expect {
    Value(i64),
    Missing(Missing),
    Error { error: ErrorKind },
}

impl Expect {
    pub fn error(kind: ErrorKind) -> Self {
        Expect::Error { error: kind }
    }

    pub fn none() -> Self {
        Expect::Missing(Missing::None)
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Value(v) => write!(f, "{v}"),
            Expect::Missing(_) => write!(f, "none"),
            Expect::Error { error } => write!(f, "error {}", error.as_str()),
        }
    }
}

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based line number in the source script.
    pub line: usize,
    pub op: Op,
    pub expect: Option<Expect>,
}

#[derive(Serialize, Deserialize)]
struct Line {
    #[serde(flatten)]
    op: Op,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expect: Option<Expect>,
}

impl Step {
    /// Render as a single JSONL line.
    pub fn to_json_line(&self) -> Result<String, ScriptError> {
        let line = Line {
            op: self.op.clone(),
            expect: self.expect.clone(),
        };
        serde_json::to_string(&line).map_err(|e| ScriptError::Parse {
            line: self.line,
            message: e.to_string(),
        })
    }
}

/// Parse a JSONL script. Blank lines are skipped but still counted.
pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed: Line = serde_json::from_str(trimmed).map_err(|e| ScriptError::Parse {
            line: i + 1,
            message: e.to_string(),
        })?;
        steps.push(Step {
            line: i + 1,
            op: parsed.op,
            expect: parsed.expect,
        });
    }
    Ok(steps)
}

/// Read and parse a JSONL script from disk.
pub fn read_script(path: &Path) -> anyhow::Result<Vec<Step>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path:?}"))?;
    let steps = parse_script(&text).with_context(|| format!("parse script {path:?}"))?;
    Ok(steps)
}
