//! CLI integration tests for vmtunectl
//!
//! Tests the command surface:
//! - vmtunectl               banner + usage, exit 1
//! - vmtunectl --help        usage, exit 0
//! - vmtunectl --version     version, exit 0
//! - vmtunectl --bogus       error + usage, exit 1
//! - vmtunectl --info        report from config-provided surfaces, exit 0
//!
//! Privileged actions are covered in workflow_tests.rs against the in-memory
//! kernel, since these tests may run as root.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vmtunectl"))
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(binary())
        .args(args)
        .env_remove("VMTUNE_LOG")
        .output()
        .expect("Failed to run vmtunectl")
}

/// Config whose surfaces all live in `dir`
fn write_fake_procfs(dir: &Path) -> PathBuf {
    let meminfo = dir.join("meminfo");
    let swappiness = dir.join("swappiness");
    fs::write(
        &meminfo,
        "MemTotal:       8388608 kB\nMemFree:        1048576 kB\nMemAvailable:   6291456 kB\nBuffers:          65536 kB\nCached:         2097152 kB\nSwapTotal:            0 kB\nSwapFree:             0 kB\n",
    )
    .unwrap();
    fs::write(&swappiness, "60\n").unwrap();

    let config = dir.join("config.toml");
    fs::write(
        &config,
        format!(
            "[output]\ncolor = \"never\"\n\n[paths]\nmeminfo = {:?}\nswappiness = {:?}\ndrop_caches = {:?}\ncompact_memory = {:?}\n",
            meminfo,
            swappiness,
            dir.join("drop_caches"),
            dir.join("compact_memory"),
        ),
    )
    .unwrap();
    config
}

#[test]
fn test_no_args_shows_usage_and_fails() {
    let output = run(&["--no-color"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("vmtune Memory Optimizer"), "got: {}", stdout);
    assert!(stdout.contains("--optimize"), "usage should list actions: {}", stdout);
}

#[test]
fn test_help_succeeds() {
    let output = run(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--gaming"));
    assert!(stdout.contains("--monitor"));
}

#[test]
fn test_version_succeeds() {
    for flag in ["-v", "--version"] {
        let output = run(&[flag]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.starts_with("vmtunectl version "), "got: {}", stdout);
    }
}

#[test]
fn test_unknown_argument_fails() {
    let output = run(&["--turbo"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("--turbo"), "got: {}", stderr);
}

#[test]
fn test_info_reads_configured_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fake_procfs(dir.path());

    let output = run(&["--info", "--config", config.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Total Memory:     8 GB"));
    assert!(stdout.contains("Memory Usage:     2 GB (25%)"));
    assert!(stdout.contains("Current Swappiness: 60"));
    assert!(!stdout.contains("Swap Information"));
}

#[test]
fn test_info_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fake_procfs(dir.path());

    let output = run(&["-i", "--json", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["memory"]["available"], 6291456);
    assert_eq!(json["pressure"], "normal");
}

#[test]
fn test_unreadable_meminfo_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("[paths]\nmeminfo = {:?}\n", dir.path().join("missing")),
    )
    .unwrap();

    let output = run(&["--info", "--no-color", "--config", config.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Cannot read"), "got: {}", stderr);
}

#[test]
fn test_bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[tuning]\ndesktop_swappiness = 500\n").unwrap();

    let output = run(&["--info", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}
