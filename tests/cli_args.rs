//! Tests for CLI argument parsing, run against the built binary.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runs the binary with a config path inside `dir` so a user config on the
/// machine never leaks into the test.
fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_locale-tool"))
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("find"));
    assert!(stdout.contains("apply"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("--api-url"));
}

#[test]
fn find_rejects_wrong_extension() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("report.txt");
    fs::write(&file, "안녕").unwrap();

    let output = run(&dir, &["find", file.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Please select a .tsx file"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn find_rejects_unknown_template_type() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("page.tsx");
    fs::write(&file, "const a = 1;").unwrap();

    let output = run(
        &dir,
        &["find", file.to_str().unwrap(), "--template-type", "zzz"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown template type 'zzz'"));
    assert!(stderr.contains("bt, bvt"));
}

#[test]
fn apply_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.tsx");

    let output = run(&dir, &["apply", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot read"));
}

#[test]
fn invalid_api_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("page.tsx");
    fs::write(&file, "const a = 1;").unwrap();

    let output = run(
        &dir,
        &["--api-url", "ftp://example.com", "find", file.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must use http or https"));
}

#[test]
fn broken_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[service\n").unwrap();
    let file = dir.path().join("page.tsx");
    fs::write(&file, "const a = 1;").unwrap();

    let output = run(&dir, &["find", file.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"));
}

#[test]
fn serve_requires_assets_dir() {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("no-assets");

    let output = run(
        &dir,
        &[
            "serve",
            "--port",
            "0",
            "--assets-dir",
            assets.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Asset directory not found"));
}
