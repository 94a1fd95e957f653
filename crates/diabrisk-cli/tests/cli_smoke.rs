//! CLI binary smoke tests using assert_cmd.
//!
//! These run the compiled `diabrisk` binary against local files only.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("diabrisk").unwrap();
    cmd.env("DIABRISK_LOG", "error");
    cmd
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("predict"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("diabrisk"));
}

// ---------------------------------------------------------------------------
// Train subcommand
// ---------------------------------------------------------------------------

#[test]
fn train_missing_data_file_fails_without_artifacts() {
    let dir = tempdir().unwrap();
    cmd()
        .args(["train", "--data", "/nonexistent/pima.csv", "--output-dir"])
        .arg(dir.path())
        .assert()
        .failure();
    assert!(!dir.path().join("diabetes_model.pkl").exists());
    assert!(!dir.path().join("scaler.pkl").exists());
}

#[test]
fn train_nonexistent_config_errors() {
    cmd()
        .args(["train", "/nonexistent/config.json"])
        .assert()
        .failure();
}

#[test]
fn train_rejects_bad_test_size() {
    let dir = tempdir().unwrap();
    let data = common::write_synthetic_csv(dir.path(), 50, 1);
    cmd()
        .args(["train", "--test-size", "1.5", "--data"])
        .arg(&data)
        .assert()
        .failure();
}

#[test]
fn train_with_config_writes_both_artifacts() {
    let dir = tempdir().unwrap();
    let data = common::write_synthetic_csv(dir.path(), 200, 9);
    let out_dir = dir.path().join("out");
    let config = common::fast_train_config(&data, &out_dir);
    let config_path = common::write_config(dir.path(), &config);

    cmd()
        .arg("train")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy:"))
        .stdout(predicate::str::contains("precision"))
        .stdout(predicate::str::contains("Model and scaler saved successfully"));

    assert!(out_dir.join("diabetes_model.pkl").is_file());
    assert!(out_dir.join("scaler.pkl").is_file());
}

// ---------------------------------------------------------------------------
// Predict subcommand
// ---------------------------------------------------------------------------

#[test]
fn predict_without_artifacts_names_missing_file() {
    let dir = tempdir().unwrap();
    cmd()
        .args(["predict", "--artifact-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Diabetes Risk Prediction Tool"))
        .stdout(predicate::str::contains("diabetes_model.pkl"))
        .stdout(predicate::str::contains("Prediction is disabled"))
        .stdout(predicate::str::contains("Patient Information"))
        .stdout(predicate::str::contains("Glucose (mg/dL)"))
        .stdout(predicate::str::contains("Age (years)"));
}

#[test]
fn predict_about_lists_features() {
    let dir = tempdir().unwrap();
    cmd()
        .args(["predict", "--about", "--artifact-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("About the Model"))
        .stdout(predicate::str::contains("Diabetes Pedigree Function"));
}
