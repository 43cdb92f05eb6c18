use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_replay_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("replay").arg("tests/fixtures/operations.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("account,balance\n1,70\n2,80.25\n3,10\n"));

    Ok(())
}

#[test]
fn test_replay_writes_transaction_log() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let log_path = dir.path().join("log.csv");

    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("replay")
        .arg("tests/fixtures/operations.csv")
        .arg("--transactions")
        .arg(&log_path);
    cmd.assert().success();

    let log = std::fs::read_to_string(&log_path)?;
    assert_eq!(
        log,
        "account,kind,amount\n1,transfer,30\n2,deposit,0.25\n3,withdrawal,2.5\n3,transfer,10\n"
    );

    Ok(())
}

#[test]
fn test_bench_reports_phases() {
    let mut cmd = Command::new(cargo_bin!("ledgerbench"));
    cmd.args(["bench", "--accounts", "500", "--seed", "42"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ledger benchmark: 500 accounts, seed 42"))
        .stdout(predicate::str::contains("create_accounts"))
        .stdout(predicate::str::contains("batch_deposit"))
        .stdout(predicate::str::contains("withdraw"))
        .stdout(predicate::str::contains("transfer"));
}

#[test]
fn test_bench_top_limits_phase_rows() {
    let output = Command::new(cargo_bin!("ledgerbench"))
        .args(["bench", "--accounts", "50", "--seed", "1", "--top", "1"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let table: Vec<&str> = stdout
        .lines()
        .skip_while(|line| !line.starts_with("phase"))
        .collect();
    assert_eq!(table.len(), 2, "header plus one phase row: {stdout}");
}

#[test]
fn test_bench_json_is_deterministic_for_seed() {
    let run = || {
        let output = Command::new(cargo_bin!("ledgerbench"))
            .args(["bench", "--accounts", "100", "--seed", "9", "--json"])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());
        serde_json::from_slice::<serde_json::Value>(&output.stdout).expect("valid JSON")
    };

    let first = run();
    let second = run();
    assert_eq!(first["accounts"], 100);
    assert_eq!(first["seed"], 9);
    assert_eq!(first["final_total"], second["final_total"]);
    assert_eq!(first["transactions"], second["transactions"]);
}

#[test]
fn test_bench_accounts_from_environment() {
    let mut cmd = Command::new(cargo_bin!("ledgerbench"));
    cmd.env("LEDGERBENCH_ACCOUNTS", "25")
        .env("LEDGERBENCH_SEED", "3")
        .arg("bench");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ledger benchmark: 25 accounts, seed 3"));
}

#[test]
fn test_bench_rejects_zero_accounts() {
    let mut cmd = Command::new(cargo_bin!("ledgerbench"));
    cmd.args(["bench", "--accounts", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("accounts must be greater than zero"));
}
