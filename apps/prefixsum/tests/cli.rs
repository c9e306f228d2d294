use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn prefixsum() -> Command {
    let mut cmd = Command::cargo_bin("prefixsum").unwrap();
    cmd.env_remove("PREFIXSUM_CONFIG");
    cmd
}

fn script(lines: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[test]
fn demo_prints_walkthrough() {
    prefixsum()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial array: [1, 2, 3, 4, 5]"))
        .stdout(predicate::str::contains("Sum [1, 3] = 9"))
        .stdout(predicate::str::contains("Sum [1, 3] after update = 11"))
        .stdout(predicate::str::contains("All operations completed successfully."));
}

#[test]
fn check_runs_every_scenario() {
    prefixsum()
        .args(["check", "--log-level", "error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS set-then-range"))
        .stdout(predicate::str::contains("PASS negative-length"))
        .stdout(predicate::str::contains("RESULTS: 14/14 scenarios passed"));
}

#[test]
fn check_single_scenario() {
    prefixsum()
        .args(["check", "--scenario", "mixed-signs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS mixed-signs (3 checks)"))
        .stdout(predicate::str::contains("RESULTS: 1/1 scenarios passed"));
}

#[test]
fn check_unknown_scenario_fails() {
    prefixsum()
        .args(["check", "--scenario", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario 'nope'"));
}

#[test]
fn check_list_names_scenarios() {
    prefixsum()
        .args(["check", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lower-bound"))
        .stdout(predicate::str::contains("RESULTS").not());
}

#[test]
fn replay_passing_script() {
    let file = script(&[
        r#"{"op":"create","len":5}"#,
        r#"{"op":"set","index":0,"value":1}"#,
        r#"{"op":"set","index":1,"value":2}"#,
        r#"{"op":"range_sum","low":0,"high":1,"expect":3}"#,
        r#"{"op":"prefix_sum","index":-1,"expect":0}"#,
    ]);
    prefixsum()
        .args(["replay", "--script"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("line 4: range_sum low=0 high=1 -> 3 [ok]"))
        .stdout(predicate::str::contains("checks: 2 passed, 0 failed"));
}

#[test]
fn replay_failed_expectation_exits_nonzero() {
    let file = script(&[
        r#"{"op":"create","len":2}"#,
        r#"{"op":"total","expect":1}"#,
        r#"{"op":"total","expect":0}"#,
    ]);
    prefixsum()
        .args(["--log-level", "warn", "replay", "--script"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("[FAIL expected 1]"))
        .stdout(predicate::str::contains("checks: 1 passed, 1 failed"))
        .stderr(predicate::str::contains("WARN cli: line 2: total"))
        .stderr(predicate::str::contains("1 of 2 checks failed"));
}

#[test]
fn replay_honours_config_file() {
    let file = script(&[
        r#"{"op":"create","len":2}"#,
        r#"{"op":"total","expect":1}"#,
        r#"{"op":"total","expect":0}"#,
    ]);
    let mut config = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(config, "stop_on_mismatch: true\nshow_values: true\nlogging:\n  level: error").unwrap();

    prefixsum()
        .arg("--config")
        .arg(config.path())
        .args(["replay", "--script"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("created len=2 values=[0, 0]"))
        .stdout(predicate::str::contains("stopped at first failed check"))
        .stdout(predicate::str::contains("line 3").not());
}

#[test]
fn replay_step_before_create_fails() {
    let file = script(&[r#"{"op":"total"}"#]);
    prefixsum()
        .args(["replay", "--script"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no index has been created yet"));
}

#[test]
fn replay_missing_script_names_path() {
    prefixsum()
        .args(["replay", "--script", "does-not-exist.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.jsonl"));
}

#[test]
fn rejects_unknown_log_level() {
    prefixsum()
        .args(["--log-level", "loud", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log level"));
}

#[test]
fn replay_oversized_create_is_reported() {
    let file = script(&[
        r#"{"op":"create","len":9223372036854775807,"expect":{"error":"invalid_argument"}}"#,
        r#"{"op":"create","len":3}"#,
        r#"{"op":"create","len":4,"expect":{"error":"invalid_argument"}}"#,
        r#"{"op":"total","expect":0}"#,
    ]);
    prefixsum()
        .args(["replay", "--max-len", "3", "--script"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeds the limit of 3"))
        .stdout(predicate::str::contains("checks: 3 passed, 0 failed"));
}

#[test]
fn json_logs_go_to_stderr() {
    let file = script(&[r#"{"op":"create","len":1}"#, r#"{"op":"total","expect":0}"#]);
    let mut config = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(config, "logging:\n  level: info\n  format: json\n  timestamps: false").unwrap();

    prefixsum()
        .arg("--config")
        .arg(config.path())
        .args(["replay", "--script"])
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(r#""target":"cli""#))
        .stderr(predicate::str::contains(r#""message":"run finished""#))
        .stdout(predicate::str::contains("run finished").not());
}
