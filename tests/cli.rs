use assert_cmd::Command;
use predicates::prelude::*;

fn kickbook(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("kickbook").unwrap();
    cmd.env("HOME", home);
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    kickbook(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("--empty"));
}

#[test]
fn test_demo_walks_through_scenario() {
    let home = tempfile::tempdir().unwrap();
    kickbook(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample transactions"))
        .stdout(predicate::str::contains("Transaction added successfully!"))
        .stdout(predicate::str::contains("Transaction deleted successfully!"))
        .stdout(predicate::str::contains("Transaction updated successfully!"))
        .stdout(predicate::str::contains("250"))
        .stdout(predicate::str::contains("Puma"));
}

#[test]
fn test_init_writes_settings() {
    let home = tempfile::tempdir().unwrap();
    kickbook(home.path())
        .args(["init", "--name", "Jordan", "--no-seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));

    let path = home.path().join(".config").join("kickbook").join("settings.json");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("\"user_name\": \"Jordan\""));
    assert!(content.contains("\"seed_sample_data\": false"));
}

#[test]
fn test_demo_writes_log_file() {
    let home = tempfile::tempdir().unwrap();
    kickbook(home.path()).arg("demo").assert().success();

    let logs = home.path().join(".config").join("kickbook").join("logs");
    let has_log = std::fs::read_dir(&logs)
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().starts_with("kickbook"));
    assert!(has_log, "expected a kickbook log file in {}", logs.display());
}

#[test]
fn test_init_name_keeps_earlier_no_seed() {
    let home = tempfile::tempdir().unwrap();
    kickbook(home.path())
        .args(["init", "--no-seed"])
        .assert()
        .success();
    kickbook(home.path())
        .args(["init", "--name", "Riley"])
        .assert()
        .success();

    let path = home.path().join(".config").join("kickbook").join("settings.json");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("\"user_name\": \"Riley\""));
    assert!(content.contains("\"seed_sample_data\": false"));
}
