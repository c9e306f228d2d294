use prefixsum_fenwick::{IndexError, PrefixSumIndex};
use std::fmt;
use std::num::Wrapping;

use crate::script::{Expect, Op, Step};
use crate::ScriptError;

/// Result of executing one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { len: usize },
    Updated,
    Value(i64),
    Position(Option<usize>),
    Failed(IndexError),
}

impl Outcome {
    fn from_result<T>(
        result: prefixsum_fenwick::Result<T>,
        f: impl FnOnce(T) -> Outcome,
    ) -> Self {
        match result {
            Ok(v) => f(v),
            Err(e) => Outcome::Failed(e),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { len } => write!(f, "created len={len}"),
            Outcome::Updated => write!(f, "ok"),
            Outcome::Value(v) => write!(f, "{v}"),
            Outcome::Position(Some(p)) => write!(f, "{p}"),
            Outcome::Position(None) => write!(f, "none"),
            Outcome::Failed(e) => write!(f, "error: {e}"),
        }
    }
}

impl Expect {
    /// Whether `outcome` satisfies this expectation.
    pub fn matches(&self, outcome: &Outcome) -> bool {
        match (self, outcome) {
            (Expect::Value(want), Outcome::Value(got)) => want == got,
            (Expect::Value(want), Outcome::Position(Some(p))) => {
                i64::try_from(*p).is_ok_and(|p| p == *want)
            }
            (Expect::Missing(_), Outcome::Position(None)) => true,
            (Expect::Error { error }, Outcome::Failed(e)) => error.as_str() == e.kind(),
            _ => false,
        }
    }
}

/// What happened on one script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub line: usize,
    pub op: Op,
    pub outcome: Outcome,
    pub expect: Option<Expect>,
    /// `None` when the step carries no expectation.
    pub matched: Option<bool>,
    /// Element values after the step, when value capture is enabled.
    pub values: Option<Vec<i64>>,
}

impl StepReport {
    pub fn is_mismatch(&self) -> bool {
        self.matched == Some(false)
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} -> {}", self.line, self.op, self.outcome)?;
        match (&self.expect, self.matched) {
            (Some(_), Some(true)) => write!(f, " [ok]")?,
            (Some(want), Some(false)) => write!(f, " [FAIL expected {want}]")?,
            _ => {}
        }
        if let Some(values) = &self.values {
            write!(f, " values={values:?}")?;
        }
        Ok(())
    }
}

/// Reports for a whole script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub reports: Vec<StepReport>,
    /// Set when the run halted at a failed expectation.
    pub stopped_early: bool,
}

impl Transcript {
    pub fn passed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.matched == Some(true))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_mismatch()).count()
    }

    pub fn checks(&self) -> usize {
        self.passed() + self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn render(&self) -> String {
        let mut out: Vec<String> = self.reports.iter().map(ToString::to_string).collect();
        if self.stopped_early {
            out.push("stopped at first failed check".to_string());
        }
        out.push(format!(
            "checks: {} passed, {} failed",
            self.passed(),
            self.failed()
        ));
        out.join("\n")
    }
}

/// Largest `create` length a [`Replayer`] accepts unless told otherwise.
pub const DEFAULT_MAX_LEN: usize = 1 << 20;

/// Drives a `PrefixSumIndex` through script steps.
///
/// Arithmetic wraps on `i64` overflow. A `create` longer than the configured
/// maximum fails with `InvalidArgument` and leaves the current index alone.
#[derive(Debug, Clone)]
pub struct Replayer {
    index: Option<PrefixSumIndex<Wrapping<i64>>>,
    stop_on_mismatch: bool,
    capture_values: bool,
    max_len: usize,
}

impl Default for Replayer {
    fn default() -> Self {
        Self {
            index: None,
            stop_on_mismatch: false,
            capture_values: false,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl Replayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the length a `create` step may request.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Halt `run` at the first failed expectation.
    pub fn stop_on_mismatch(mut self, stop: bool) -> Self {
        self.stop_on_mismatch = stop;
        self
    }

    /// Record element values after each create or update.
    pub fn capture_values(mut self, capture: bool) -> Self {
        self.capture_values = capture;
        self
    }

    /// Current element values, if an index has been created.
    pub fn values(&self) -> Option<Vec<i64>> {
        self.index
            .as_ref()
            .map(|ix| ix.values().iter().map(|v| v.0).collect())
    }

    fn index_mut(
        &mut self,
        line: usize,
    ) -> Result<&mut PrefixSumIndex<Wrapping<i64>>, ScriptError> {
        self.index.as_mut().ok_or(ScriptError::NoIndex { line })
    }

    fn create(&self, len: i64) -> prefixsum_fenwick::Result<PrefixSumIndex<Wrapping<i64>>> {
        if usize::try_from(len).is_ok_and(|n| n > self.max_len) {
            return Err(IndexError::InvalidArgument(format!(
                "length {len} exceeds the limit of {}",
                self.max_len
            )));
        }
        PrefixSumIndex::try_new(len)
    }

    /// Execute a single operation.
    pub fn execute(&mut self, line: usize, op: &Op) -> Result<Outcome, ScriptError> {
        let outcome = match *op {
            Op::Create { len } => match self.create(len) {
                Ok(index) => {
                    let len = index.len();
                    self.index = Some(index);
                    Outcome::Created { len }
                }
                Err(e) => Outcome::Failed(e),
            },
            Op::Add { index: i, delta } => {
                let index = self.index_mut(line)?;
                let result = position(i, index.len()).and_then(|i| index.add(i, Wrapping(delta)));
                Outcome::from_result(result, |_| Outcome::Updated)
            }
            Op::Set { index: i, value } => {
                let index = self.index_mut(line)?;
                let result = position(i, index.len()).and_then(|i| index.set(i, Wrapping(value)));
                Outcome::from_result(result, |_| Outcome::Updated)
            }
            Op::Get { index: i } => {
                let index = self.index_mut(line)?;
                let result = position(i, index.len()).and_then(|i| index.get(i));
                Outcome::from_result(result, |v| Outcome::Value(v.0))
            }
            Op::PrefixSum { index: i } => {
                let index = self.index_mut(line)?;
                Outcome::from_result(index.prefix_sum_signed(i), |v| Outcome::Value(v.0))
            }
            Op::RangeSum { low, high } => {
                let index = self.index_mut(line)?;
                Outcome::from_result(index.range_sum_signed(low, high), |v| Outcome::Value(v.0))
            }
            Op::Total => Outcome::Value(self.index_mut(line)?.total().0),
            Op::LowerBound { target } => {
                Outcome::Position(self.index_mut(line)?.lower_bound(Wrapping(target)))
            }
        };
        Ok(outcome)
    }

    /// Execute a step and check its expectation.
    pub fn step(&mut self, step: &Step) -> Result<StepReport, ScriptError> {
        let outcome = self.execute(step.line, &step.op)?;
        let matched = step.expect.as_ref().map(|want| want.matches(&outcome));
        let values = match outcome {
            Outcome::Created { .. } | Outcome::Updated if self.capture_values => self.values(),
            _ => None,
        };
        Ok(StepReport {
            line: step.line,
            op: step.op.clone(),
            outcome,
            expect: step.expect.clone(),
            matched,
            values,
        })
    }

    /// Execute every step in order.
    pub fn run(&mut self, steps: &[Step]) -> Result<Transcript, ScriptError> {
        let mut transcript = Transcript::default();
        for step in steps {
            let report = self.step(step)?;
            let mismatch = report.is_mismatch();
            transcript.reports.push(report);
            if mismatch && self.stop_on_mismatch {
                transcript.stopped_early = true;
                break;
            }
        }
        Ok(transcript)
    }
}

/// Signed script index to a 0-based position; negatives are out of range.
fn position(index: i64, len: usize) -> prefixsum_fenwick::Result<usize> {
    usize::try_from(index).map_err(|_| IndexError::OutOfRange { index, len })
}
