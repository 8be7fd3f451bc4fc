//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COMMENTS: &str = "You are STUPID!! stupid idiot idiot idiot nice";

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("TOXISCAN_DICTIONARY")
        .env_remove("TOXISCAN_MAX_UNIQUE_WORDS")
        .env_remove("RUST_LOG");
    cmd
}

/// A directory holding `toxicwords.txt` and `comments.txt`.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("toxicwords.txt"), "stupid\nidiot\n").unwrap();
    fs::write(tmp.path().join("comments.txt"), COMMENTS).unwrap();
    tmp
}

/// Command running in `dir` with colors disabled.
fn cmd_in(dir: &Path) -> Command {
    let mut cmd = cmd();
    cmd.args(["--color", "never", "-C", dir.to_str().unwrap()]);
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("interactive"));
}

#[test]
fn long_help_lists_environment_variables() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TOXISCAN_DICTIONARY"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    let tmp = TempDir::new().unwrap();
    cmd_in(tmp.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("toxicwords.txt"));
}

#[test]
fn info_json_contains_expected_fields() {
    let tmp = TempDir::new().unwrap();
    let json = json_output(cmd_in(tmp.path()).args(["info", "--json"]));
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"].is_object());
    assert_eq!(json["config"]["top"], 10);
}

// =============================================================================
// Analyze Command
// =============================================================================

#[test]
fn analyze_worked_example() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["analyze", "comments.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Unique Words: 5"))
        .stdout(predicate::str::contains("Total Word Count: 8"))
        .stdout(predicate::str::contains("Total Toxic Occurrences: 5"))
        .stdout(predicate::str::contains("Toxicity Rate: 62.50%"))
        .stdout(predicate::str::contains("--- TOP 10 FREQUENT WORDS ---"));
}

#[test]
fn analyze_json_ranks_by_frequency_then_first_appearance() {
    let tmp = workspace();
    let json = json_output(cmd_in(tmp.path()).args(["analyze", "comments.txt", "--json"]));

    let words: Vec<_> = json["top_words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["word"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(words, vec!["idiot", "stupid", "you", "are", "nice"]);
    assert_eq!(json["top_words"][0]["frequency"], 3);
    assert_eq!(json["top_words"][0]["is_toxic"], true);
    assert_eq!(json["top_words"][2]["is_toxic"], false);
    assert_eq!(json["summary"]["toxicity_rate"], 62.5);
    assert_eq!(json["load"]["tokens_read"], 8);
}

#[test]
fn analyze_empty_file_has_undefined_rate() {
    let tmp = workspace();
    fs::write(tmp.path().join("empty.txt"), "  \n!!! ???\n").unwrap();

    cmd_in(tmp.path())
        .args(["analyze", "empty.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Word Count: 0"))
        .stdout(predicate::str::contains("Toxicity Rate: undefined"))
        .stdout(predicate::str::contains("No toxic words found"));
}

#[test]
fn analyze_missing_comment_file_fails() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["analyze", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn missing_dictionary_degrades_to_clean() {
    let tmp = workspace();
    fs::remove_file(tmp.path().join("toxicwords.txt")).unwrap();

    let output = cmd_in(tmp.path())
        .args(["analyze", "comments.txt", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty dictionary"));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["toxic_occurrences"], 0);
    assert_eq!(json["summary"]["toxicity_rate"], 0.0);
}

#[test]
fn quiet_suppresses_dictionary_warning() {
    let tmp = workspace();
    fs::remove_file(tmp.path().join("toxicwords.txt")).unwrap();

    cmd_in(tmp.path())
        .args(["-q", "analyze", "comments.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning").not());
}

#[test]
fn dictionary_flag_overrides_default() {
    let tmp = workspace();
    fs::write(tmp.path().join("other.txt"), "NICE\n").unwrap();

    let json = json_output(cmd_in(tmp.path()).args([
        "--dictionary",
        "other.txt",
        "analyze",
        "comments.txt",
        "--json",
    ]));
    assert_eq!(json["summary"]["toxic_occurrences"], 1);
    assert_eq!(json["top_toxic_words"][0]["word"], "nice");
}

#[test]
fn unique_word_limit_truncates_with_warning() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["--max-unique-words", "2", "analyze", "comments.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Unique Words: 2"))
        .stderr(predicate::str::contains("word table is full"));
}

#[test]
fn oversized_input_is_refused() {
    let tmp = workspace();
    fs::write(
        tmp.path().join(".toxiscan.toml"),
        "max_input_bytes = 10\n",
    )
    .unwrap();

    cmd_in(tmp.path())
        .args(["analyze", "comments.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Top Command
// =============================================================================

#[test]
fn top_lists_requested_count() {
    let tmp = workspace();
    let json = json_output(cmd_in(tmp.path()).args(["top", "comments.txt", "-n", "2", "--json"]));
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["word"], "idiot");
    assert_eq!(list[1]["word"], "stupid");
}

#[test]
fn top_toxic_filters_before_limiting() {
    let tmp = workspace();
    fs::write(
        tmp.path().join("comments.txt"),
        "you you you you idiot idiot idiot are are stupid",
    )
    .unwrap();

    let json = json_output(cmd_in(tmp.path()).args([
        "top",
        "comments.txt",
        "-n",
        "2",
        "--toxic",
        "--json",
    ]));
    let words: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["word"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(words, vec!["idiot", "stupid"]);
}

#[test]
fn top_zero_prints_only_header() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["top", "comments.txt", "-n", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- TOP 0 FREQUENT WORDS ---"))
        .stdout(predicate::str::contains("idiot").not());
}

// =============================================================================
// Report Command
// =============================================================================

#[test]
fn report_writes_default_file() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["report", "comments.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("analysis_report.txt"));

    let report = fs::read_to_string(tmp.path().join("analysis_report.txt")).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines[0], "CYBERBULLYING ANALYSIS REPORT");
    assert!(report.contains("Total Toxic Words: 5"));
    assert!(report.contains("Toxicity Level: 62.50%"));
    assert!(report.contains("--- TOP 20 WORDS LIST ---"));
    assert_eq!(lines.last().copied(), Some("nice                 : 1 (CLEAN)"));
}

#[test]
fn report_respects_output_and_limit() {
    let tmp = workspace();
    let json = json_output(cmd_in(tmp.path()).args([
        "report",
        "comments.txt",
        "-o",
        "out.txt",
        "--limit",
        "2",
        "--json",
    ]));
    assert_eq!(json["entries"], 2);
    assert_eq!(json["summary"]["total_words"], 8);

    let report = fs::read_to_string(tmp.path().join("out.txt")).unwrap();
    assert!(report.contains("--- TOP 2 WORDS LIST ---"));
    assert_eq!(report.lines().filter(|l| l.contains(" : ")).count(), 2);
}

// =============================================================================
// Interactive Menu
// =============================================================================

#[test]
fn interactive_menu_full_session() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .arg("interactive")
        .write_stdin("1\ncomments.txt\n2\n3\n3\n4\n5\n5\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Toxicity Rate: 62.50%"))
        .stdout(predicate::str::contains("--- TOP 3 FREQUENT WORDS ---"))
        .stdout(predicate::str::contains("--- TOP 5 TOXIC WORDS ---"))
        .stdout(predicate::str::contains("Report saved to"))
        .stdout(predicate::str::contains("Goodbye."));

    assert!(tmp.path().join("analysis_report.txt").exists());
}

#[test]
fn interactive_reload_replaces_previous_counts() {
    let tmp = workspace();
    fs::write(tmp.path().join("second.txt"), "hello world hello").unwrap();

    cmd_in(tmp.path())
        .arg("interactive")
        .write_stdin("1\ncomments.txt\n1\nsecond.txt\n2\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Word Count: 3"))
        .stdout(predicate::str::contains("Total Unique Words: 2"))
        .stdout(predicate::str::contains("Toxicity Rate: 0.00%"));
}

#[test]
fn interactive_exits_on_end_of_input() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .arg("interactive")
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice."));
}

#[test]
fn interactive_load_flag_preloads_file() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["menu", "--load", "comments.txt"])
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Word Count: 8"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn verbose_logs_to_stderr() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["-vv", "analyze", "comments.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("comment text processed"));
}

#[test]
fn log_dir_writes_jsonl() {
    let tmp = workspace();
    let logs = tmp.path().join("logs");
    cmd_in(tmp.path())
        .env("TOXISCAN_LOG_DIR", &logs)
        .args(["analyze", "comments.txt"])
        .assert()
        .success();

    let log = fs::read_to_string(logs.join("toxiscan.jsonl")).unwrap();
    assert!(log.lines().any(|l| l.contains("comment text processed")));
}

#[test]
fn color_never_accepted() {
    let tmp = TempDir::new().unwrap();
    cmd_in(tmp.path()).arg("info").assert().success();
}
