// main.rsとエントリーポイントのテスト
use crate::fixtures::{write_archive, write_png};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_image-triage"))
}

#[test]
fn test_cli_help() {
    let output = binary().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["run", "catalog", "classify", "prune", "sweep", "purge"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn test_catalog_lists_labels() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("pic");
    write_archive(&input, "063");
    write_archive(&input, "No.0631");

    let output = binary()
        .args(["catalog", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0063"));
    assert!(stdout.contains("0631"));
}

#[test]
fn test_sweep_dry_run_keeps_files() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("a.jpg");
    fs::write(&target, vec![0u8; 42]).unwrap();

    let output = binary()
        .arg("sweep")
        .arg(temp_dir.path())
        .args(["--size", "42", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(target.exists());
}

#[test]
fn test_classify_via_binary_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("loose");
    write_png(&source.join("tall.png"), 2, 5);
    let config = temp_dir.path().join("triage.json");
    fs::write(
        &config,
        format!(
            r#"{{ "mobile_dir": {:?}, "pc_dir": {:?} }}"#,
            temp_dir.path().join("m").display().to_string(),
            temp_dir.path().join("p").display().to_string()
        ),
    )
    .unwrap();

    let output = binary()
        .arg("--config")
        .arg(&config)
        .arg("classify")
        .arg(&source)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(temp_dir.path().join("m/mobile_0001.png").exists());
}

#[test]
fn test_missing_directory_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();
    let output = binary()
        .arg("prune")
        .arg(temp_dir.path().join("nope"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
