//! Integration tests for the skill-scaffold binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn scaffold() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("skill-scaffold"))
}

#[test]
fn test_help_lists_flags() {
    scaffold()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--description"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_creates_skill() {
    let dir = TempDir::new().unwrap();
    scaffold()
        .args(["-n", "excel-handler", "-d", "Handle Excel files", "-o"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created skill 'excel-handler'"))
        .stdout(predicate::str::contains("SKILL.md"));

    let skill_dir = dir.path().join("excel-handler");
    let skill = fs::read_to_string(skill_dir.join("SKILL.md")).unwrap();
    assert!(skill.contains("name: excel-handler"));
    assert!(skill.contains("description: Handle Excel files"));
    assert!(skill_dir.join("examples").join("README.md").is_file());
    assert!(skill_dir.join("scripts").join(".gitkeep").is_file());
}

#[test]
fn test_output_defaults_to_working_directory() {
    let dir = TempDir::new().unwrap();
    scaffold()
        .current_dir(dir.path())
        .args(["--name", "csv-reader", "--description", "Read CSV files"])
        .assert()
        .success();
    assert!(dir.path().join("csv-reader").join("SKILL.md").is_file());
}

#[test]
fn test_invalid_name_exits_with_one() {
    let dir = TempDir::new().unwrap();
    scaffold()
        .args(["-n", "My_Skill", "-d", "Handle Excel files", "-o"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid name"));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_description_with_tag_rejected() {
    let dir = TempDir::new().unwrap();
    scaffold()
        .args(["-n", "excel-handler", "-d", "Handle <b>Excel</b>", "-o"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid description"));
    assert!(!dir.path().join("excel-handler").exists());
}

#[test]
fn test_second_run_collides() {
    let dir = TempDir::new().unwrap();
    let run = || {
        let mut cmd = scaffold();
        cmd.args(["-n", "excel-handler", "-d", "Handle Excel files", "-o"])
            .arg(dir.path());
        cmd
    };
    run().assert().success();

    let skill_file = dir.path().join("excel-handler").join("SKILL.md");
    fs::write(&skill_file, "edited by hand").unwrap();

    run()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&skill_file).unwrap(), "edited by hand");
}

#[test]
fn test_missing_arguments_fail() {
    scaffold().args(["-n", "excel-handler"]).assert().failure();
}
