use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn piggy(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("piggy").unwrap();
    cmd.env("PIGGY_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn write_statement(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("statement.csv");
    fs::write(
        &path,
        "date,amount,description\n\
         2024-01-05,-100,store purchase\n\
         2024-01-20,-50,store purchase\n\
         2024-02-10,2000,salary payment\n",
    )
    .unwrap();
    path
}

#[test]
fn test_report_text() {
    let home = TempDir::new().unwrap();
    let csv = write_statement(&home);

    piggy(&home)
        .args(["report", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance:  1850.00"))
        .stdout(predicate::str::contains("Products: 150.00 (100.0%)"));
}

#[test]
fn test_report_json_positional_file() {
    let home = TempDir::new().unwrap();
    let csv = write_statement(&home);

    let output = piggy(&home)
        .arg("report")
        .arg(&csv)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["basic"]["transaction_count"], 3);
    assert_eq!(json["history"]["average_spending"][0][1], 150.0);
}

#[test]
fn test_report_without_input_fails() {
    let home = TempDir::new().unwrap();
    piggy(&home)
        .arg("report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input files"));
}

#[test]
fn test_categorize_with_custom_rules() {
    let home = TempDir::new().unwrap();
    let rules = home.path().join("rules.toml");
    fs::write(
        &rules,
        "priority = [\"Salary\", \"Products\"]\n[keywords]\nSalary = [\"salary\"]\nProducts = [\"store\"]\n",
    )
    .unwrap();

    piggy(&home)
        .args(["categorize", "salary at the store", "--rules"])
        .arg(&rules)
        .assert()
        .success()
        .stdout("Salary\n");

    piggy(&home)
        .args(["categorize", "xyz123", "--rules"])
        .arg(&rules)
        .assert()
        .success()
        .stdout("Other\n");
}

#[test]
fn test_rules_check_flags_unreachable() {
    let home = TempDir::new().unwrap();
    let rules = home.path().join("rules.json");
    fs::write(
        &rules,
        r#"{"keywords": {"Salary": ["salary"], "Gifts": ["gift"]}, "priority": ["Salary"]}"#,
    )
    .unwrap();

    piggy(&home)
        .args(["rules", "--check", "--rules"])
        .arg(&rules)
        .assert()
        .failure()
        .stdout(predicate::str::contains("never matched): Gifts"));

    piggy(&home).args(["rules", "--check"]).assert().success();
}

#[test]
fn test_chart_writes_json() {
    let home = TempDir::new().unwrap();
    let csv = write_statement(&home);
    let out = home.path().join("chart.json");

    piggy(&home)
        .args(["chart", "--csv"])
        .arg(&csv)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let bars: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(bars[0]["category"], "Products");
    assert_eq!(bars[0]["amount"], 150.0);
}

#[test]
fn test_init_config() {
    let home = TempDir::new().unwrap();
    piggy(&home).arg("init-config").assert().success();
    let cfg = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(cfg.contains("headroom = 0.05"));
}
