#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::{fs, process::Command};
use tempfile::tempdir;

fn mandel(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("mandel-cli").unwrap();
    cmd.current_dir(dir);
    for var in ["MANDEL_CONFIG", "MANDEL_INPUT", "MANDEL_OUTPUT_DIR", "MANDEL_LANG", "MANDEL_LOG_LEVEL", "MANDEL_DPI", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn config_show_defaults() {
    let dir = tempdir().unwrap();
    mandel(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"config_file\": null"))
        .stdout(predicate::str::contains("\"input\": \"benchmarks/results.csv\""))
        .stdout(predicate::str::contains("\"dpi\": 300"))
        .stdout(predicate::str::contains("\"format\": \"png\""))
        .stdout(predicate::str::contains("\"lang\": \"es\""));
}

#[test]
fn config_show_merges_file_then_env() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("mandel.toml"), "[render]\ndpi = 150\n[cli]\nlang = \"en\"\n").unwrap();
    mandel(dir.path())
        .args(["config", "show"])
        .env("MANDEL_LANG", "es")
        .env("MANDEL_OUTPUT_DIR", "  plots  ")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"config_file\": \"mandel.toml\""))
        .stdout(predicate::str::contains("\"dpi\": 150"))
        .stdout(predicate::str::contains("\"lang\": \"es\""))
        .stdout(predicate::str::contains("\"output_dir\": \"plots\""));
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempdir().unwrap();
    mandel(dir.path())
        .args(["--config", "absent.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_dpi_is_rejected() {
    let dir = tempdir().unwrap();
    mandel(dir.path())
        .args(["config", "show"])
        .env("MANDEL_DPI", "5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dpi"));
}

#[test]
fn write_template_creates_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mandel.toml");
    mandel(dir.path())
        .args(["config", "write-template", "--path"])
        .arg(&path)
        .assert()
        .success();
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[render]"));
    assert!(contents.contains("[cli]"));
}

#[test]
fn write_template_refuses_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mandel.toml");
    fs::write(&path, "keep me").unwrap();
    mandel(dir.path())
        .args(["config", "write-template"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("refusing to overwrite"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

    mandel(dir.path())
        .args(["config", "write-template", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("[paths]"));
}
