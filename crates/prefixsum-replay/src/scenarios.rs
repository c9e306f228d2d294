//! Built-in scenarios, runnable without any script files.

use crate::script::{ErrorKind, Expect, Op, Step};

/// A named, self-checking script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<Step>,
}

/// Numbers steps in the order they are added.
#[derive(Default)]
struct Script {
    steps: Vec<Step>,
}

impl Script {
    fn op(mut self, op: Op) -> Self {
        self.push(op, None);
        self
    }

    fn check(mut self, op: Op, expect: Expect) -> Self {
        self.push(op, Some(expect));
        self
    }

    fn value(self, op: Op, value: i64) -> Self {
        self.check(op, Expect::Value(value))
    }

    fn fails(self, op: Op, kind: ErrorKind) -> Self {
        self.check(op, Expect::error(kind))
    }

    fn adds(self, values: &[i64]) -> Self {
        values.iter().enumerate().fold(self, |script, (i, &delta)| {
            script.op(Op::Add {
                index: i as i64,
                delta,
            })
        })
    }

    fn push(&mut self, op: Op, expect: Option<Expect>) {
        self.steps.push(Step {
            line: self.steps.len() + 1,
            op,
            expect,
        });
    }

    fn named(self, name: &'static str, description: &'static str) -> Scenario {
        Scenario {
            name,
            description,
            steps: self.steps,
        }
    }
}

const SAMPLE: [i64; 10] = [3, 2, -1, 6, 5, 4, -3, 3, 7, 2];

fn create(len: i64) -> Script {
    Script::default().op(Op::Create { len })
}

fn prefix(index: i64) -> Op {
    Op::PrefixSum { index }
}

fn range(low: i64, high: i64) -> Op {
    Op::RangeSum { low, high }
}

fn add(index: i64, delta: i64) -> Op {
    Op::Add { index, delta }
}

fn set_ascending(script: Script, len: i64) -> Script {
    (0..len).fold(script, |script, i| script.op(Op::Set { index: i, value: i + 1 }))
}

/// All built-in scenarios, in a stable order.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        set_ascending(create(5), 5)
            .value(range(1, 3), 9)
            .named("set-then-range", "set [1,2,3,4,5] and sum [1,3]"),
        set_ascending(create(5), 5)
            .value(range(1, 3), 9)
            .op(add(2, 2))
            .value(Op::Get { index: 2 }, 5)
            .value(range(1, 3), 11)
            .value(range(0, 4), 17)
            .named("add-then-range", "add +2 at index 2 and re-sum"),
        create(10)
            .adds(&SAMPLE)
            .value(prefix(4), 15)
            .value(range(2, 7), 14)
            .value(prefix(-1), 0)
            .named("mixed-signs", "signed sample: prefix and range sums"),
        create(0)
            .fails(add(0, 1), ErrorKind::OutOfRange)
            .fails(prefix(0), ErrorKind::OutOfRange)
            .value(Op::Total, 0)
            .named("empty-index", "every position of an empty index is out of range"),
        Script::default()
            .fails(Op::Create { len: -1 }, ErrorKind::InvalidArgument)
            .named("negative-length", "a negative length is rejected"),
        create(10)
            .adds(&SAMPLE)
            .value(prefix(0), 3)
            .value(prefix(1), 5)
            .value(prefix(2), 4)
            .value(prefix(4), 15)
            .value(prefix(9), 28)
            .named("prefix-queries", "prefix sums over the signed sample"),
        create(10)
            .adds(&SAMPLE)
            .value(range(0, 0), 3)
            .value(range(0, 4), 15)
            .value(range(2, 7), 14)
            .value(range(4, 6), 6)
            .value(range(0, 9), 28)
            .value(range(5, 9), 13)
            .named("range-queries", "range sums over the signed sample"),
        create(10)
            .adds(&SAMPLE)
            .value(prefix(4), 15)
            .op(add(3, 5))
            .value(prefix(4), 20)
            .value(range(2, 7), 19)
            .op(add(0, -2))
            .value(prefix(0), 1)
            .value(prefix(4), 18)
            .op(add(9, 10))
            .value(prefix(9), 41)
            .value(range(7, 9), 22)
            .named("update-requery", "updates are visible to later queries"),
        create(1)
            .op(add(0, 5))
            .value(prefix(0), 5)
            .value(range(0, 0), 5)
            .op(Op::Create { len: 5 })
            .value(prefix(4), 0)
            .value(range(0, 4), 0)
            .op(Op::Create { len: 5 })
            .op(add(0, -5))
            .op(add(1, -3))
            .op(add(2, -1))
            .value(prefix(2), -9)
            .value(range(0, 2), -9)
            .named("edge-cases", "single element, all zeros, negative values"),
        create(5)
            .adds(&[1, 2, 3, 4, 5])
            .value(prefix(2), 6)
            .op(add(1, 5))
            .value(prefix(2), 11)
            .op(add(1, -3))
            .value(prefix(2), 8)
            .op(add(1, 10))
            .value(prefix(2), 18)
            .named("repeated-updates", "several updates to one index accumulate"),
        create(100)
            .adds(&(1..=100).collect::<Vec<i64>>())
            .value(prefix(99), 5050)
            .value(range(49, 99), 3825)
            .value(range(0, 49), 1275)
            .named("large-range", "values 1..=100"),
        create(11)
            .adds(&[0, 3, 2, -1, 6, 5, 4, -3, 3, 7, 2])
            .value(prefix(0), 0)
            .value(prefix(3), 4)
            .value(prefix(5), 15)
            .value(prefix(-5), 0)
            .value(range(2, 4), 7)
            .value(range(0, 9), 26)
            .value(range(-5, 9), 26)
            .op(add(3, 2))
            .value(prefix(3), 6)
            .value(range(3, 3), 1)
            .value(range(2, 4), 9)
            .named("negative-bounds", "negative low bounds clamp to the empty prefix"),
        set_ascending(create(5), 5)
            .value(Op::LowerBound { target: 3 }, 1)
            .value(Op::LowerBound { target: 6 }, 2)
            .value(Op::LowerBound { target: 15 }, 4)
            .check(Op::LowerBound { target: 16 }, Expect::none())
            .named("lower-bound", "first index whose prefix sum reaches a target"),
        create(3)
            .fails(range(2, 1), ErrorKind::InvalidArgument)
            .fails(range(0, 3), ErrorKind::OutOfRange)
            .fails(Op::Set { index: -1, value: 1 }, ErrorKind::OutOfRange)
            .named("rejected-arguments", "inverted and out-of-range bounds"),
    ]
}

/// Look up a built-in scenario by name.
pub fn find(name: &str) -> Option<Scenario> {
    scenarios().into_iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let all = scenarios();
        let names: HashSet<_> = all.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn steps_are_numbered_from_one() {
        for scenario in scenarios() {
            let lines: Vec<usize> = scenario.steps.iter().map(|s| s.line).collect();
            let expected: Vec<usize> = (1..=scenario.steps.len()).collect();
            assert_eq!(lines, expected, "{}", scenario.name);
        }
    }

    #[test]
    fn find_by_name() {
        assert!(find("set-then-range").is_some());
        assert!(find("no-such-scenario").is_none());
    }
}
