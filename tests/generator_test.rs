use assert_cmd::cargo_bin;
use std::process::Command;

mod common;

#[test]
fn test_generate_operations_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ops.csv");
    common::generate_operations_csv(&path, 5, 2).expect("Failed to generate CSV");

    let content = std::fs::read_to_string(&path).expect("Failed to read file");
    // Header + 5 creates + 2 rounds * 5 accounts * 3 operations
    assert_eq!(content.lines().count(), 1 + 5 + 30);
}

#[test]
fn test_replay_generated_script_conserves_total() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ops.csv");
    common::generate_operations_csv(&path, 100, 5).expect("Failed to generate CSV");

    let output = Command::new(cargo_bin!("ledgerbench"))
        .arg("replay")
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let mut reader = csv::Reader::from_reader(output.stdout.as_slice());
    let mut accounts = 0;
    let mut total = 0i64;
    for record in reader.records() {
        let record = record.expect("Failed to read record");
        total += record[1].parse::<i64>().expect("integral balance");
        accounts += 1;
    }

    // Every deposit is matched by an equal withdrawal and transfers are neutral.
    assert_eq!(accounts, 100);
    assert_eq!(total, 100 * 100);
}
