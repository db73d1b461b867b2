#![allow(unused)]
//! Process-level integration harness for the `logsift` binary.
//!
//! # What this covers
//!
//! This harness runs `logsift` via [`std::process::Command`] and checks what
//! a user or a calling script would observe.
//!
//! - **Exit codes**: 0 on a clean scan, 1 when nothing was found, non-zero
//!   on bad flags or a missing directory.
//! - **Output**: `--json` emits the structured result; plain output carries
//!   the per-file lines, the summary block and no ANSI codes when piped.
//! - **Subcommands**: `scan`, `inspect` and `generate`.
//!
//! Each test points `XDG_CONFIG_HOME` at a temp dir so the user's real config
//! is neither read nor created.
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use std::process::{Command, Output};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn logsift(config_home: &LogDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logsift"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn logsift")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn mixed_dir() -> LogDir {
    LogDirBuilder::new()
        .file("app.log", SAMPLE_TEXT)
        .file("events.json", SAMPLE_JSON)
        .file("table.csv", SAMPLE_CSV)
        .file("feed.xml", SAMPLE_XML)
        .build()
}

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

#[test]
fn scan_prints_summary_and_exports() {
    let (home, logs) = (LogDirBuilder::new().build(), mixed_dir());
    let out = logs.out();
    let output = logsift(
        &home,
        &["scan", logs.path().to_str().unwrap(), "--out", out.to_str().unwrap(), "--levels", "errors"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(!text.contains('\u{1b}'));
    assert!(text.contains("[json] 3 records"));
    assert!(text.contains("Total Lines: 12"));
    assert!(text.contains("Unusual Activity: Yes"));
    assert!(text.contains("Exported 4 rows"));
    assert_eq!(read_export(&out.join("selected_logs.csv")).len(), 4);
}

#[test]
fn scan_json_output() {
    let (home, logs) = (LogDirBuilder::new().build(), mixed_dir());
    let out = logs.out();
    let output = logsift(
        &home,
        &[
            "scan",
            logs.path().to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--prefix",
            "combined",
            "--concurrent",
            "--json",
        ],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["outcome"], "exported");
    assert_eq!(value["exported"], 12);
    assert!(out.join("combined.csv").exists());
}

#[test]
fn scan_of_empty_folder_exits_one() {
    let (home, logs) = (LogDirBuilder::new().build(), LogDirBuilder::new().build());
    let output = logsift(&home, &["scan", logs.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No logs found in folder."));
}

#[test]
fn scan_of_missing_folder_fails() {
    let home = LogDirBuilder::new().build();
    let output = logsift(&home, &["scan", home.join("nope").to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("scanning"));
}

#[test]
fn bad_level_list_is_rejected() {
    let (home, logs) = (LogDirBuilder::new().build(), mixed_dir());
    let output = logsift(&home, &["scan", logs.path().to_str().unwrap(), "--levels", ",,"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no level names"));
}

// ---------------------------------------------------------------------------
// inspect / generate
// ---------------------------------------------------------------------------

#[test]
fn inspect_detects_content_of_unknown_suffix() {
    let home = LogDirBuilder::new().build();
    let logs = LogDirBuilder::new().file("data.bin", SAMPLE_JSON).build();
    let output = logsift(&home, &["inspect", logs.join("data.bin").to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Detected log type: json"));
    assert!(text.contains("Total Lines: 3"));
}

#[test]
fn generate_writes_five_formats() {
    let home = LogDirBuilder::new().build();
    let target = home.join("generated");
    let output = logsift(&home, &["generate", target.to_str().unwrap(), "--seed", "5"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let mut suffixes: Vec<String> = std::fs::read_dir(&target)
        .unwrap()
        .map(|e| e.unwrap().path().extension().unwrap().to_string_lossy().into_owned())
        .collect();
    suffixes.sort();
    assert_eq!(suffixes, ["csv", "json", "log", "txt", "xml"]);
}
