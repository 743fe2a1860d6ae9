//! End-to-end CLI tests for chatlens.
//!
//! These tests run the actual binary against fixture exports and check
//! what it prints.
//!
//! # Test Categories
//!
//! - **Reports**: every subcommand produces its report
//! - **Output formats**: CSV, JSON, JSONL generation
//! - **Filters**: date and sender filtering
//! - **Error handling**: proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const CHAT: &str = r#"{
  "name": "Release Chat",
  "type": "private_supergroup",
  "participants": [
    {"id": "user1", "role": "creator"},
    {"id": "user2", "role": "member"}
  ],
  "messages": [
    {"id": 1, "type": "message", "date": "2024-01-15T10:30:00", "date_unixtime": "1705314600", "from": "Alice", "from_id": "user1", "text": "Релиз готов, см. https://docs.rs/regex"},
    {"id": 2, "type": "message", "date": "2024-01-15T10:31:00", "date_unixtime": "1705314660", "from": "Bob", "from_id": "user2", "text": ["@Alice ", {"type": "bold", "text": "тесты"}, " зелёные"], "reply_to_message_id": 1},
    {"id": 3, "type": "service", "date": "2024-01-16T08:00:00", "date_unixtime": "1705392000", "action": "pin_message", "text": ""},
    {"id": 4, "type": "message", "date": "2024-01-17T12:00:00", "date_unixtime": "1705492800", "from": "Alice", "from_id": "user1", "text": "тесты тесты и релиз", "reply_to_message_id": 2}
  ]
}"#;

fn setup() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("result.json");
    fs::write(&path, CHAT).unwrap();
    (dir, path)
}

fn chatlens() -> Command {
    Command::cargo_bin("chatlens").expect("binary is built")
}

// ============================================================================
// Basic
// ============================================================================

#[test]
fn test_help() {
    chatlens()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("participants"))
        .stdout(predicate::str::contains("graph"));
}

#[test]
fn test_version() {
    chatlens()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_info() {
    let (_dir, path) = setup();
    chatlens()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("title;messages;participants;admins;interactions"))
        .stdout(predicate::str::contains("Release Chat;4;2;user1;3"));
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_participants_sorted_by_count() {
    let (_dir, path) = setup();
    let output = chatlens()
        .args(["participants", "--sort", "messages"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "id;display_name;message_count;is_admin");
    assert_eq!(lines[1], "user1;Alice;2;true");
    assert_eq!(lines[2], "user2;Bob;1;false");
}

#[test]
fn test_users_alias() {
    let (_dir, path) = setup();
    chatlens()
        .arg("users")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn test_user_messages() {
    let (_dir, path) = setup();
    chatlens()
        .args(["user", "--ids"])
        .arg(&path)
        .arg("user2")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID;FromId;Sender;Content"))
        .stdout(predicate::str::contains("2;user2;Bob;@Alice тесты зелёные"));
}

#[test]
fn test_search_case_insensitive() {
    let (_dir, path) = setup();
    let output = chatlens()
        .arg("search")
        .arg(&path)
        .arg("РЕЛИЗ")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    // Header plus two hits
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_graph_csv_lists_multi_edges() {
    let (_dir, path) = setup();
    chatlens()
        .arg("graph")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("from;to;kind"))
        .stdout(predicate::str::contains("user2;user1;reply"))
        .stdout(predicate::str::contains("user2;user1;mention"))
        .stdout(predicate::str::contains("user1;user2;reply"));
}

#[test]
fn test_graph_weighted() {
    let (_dir, path) = setup();
    chatlens()
        .args(["graph", "--weighted"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("from;to;weight;replies;mentions"))
        .stdout(predicate::str::contains("user2;user1;2;1;1"));
}

#[test]
fn test_graph_json_document() {
    let (_dir, path) = setup();
    let output = chatlens()
        .args(["graph", "-f", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(doc["edges"].as_array().unwrap().len(), 3);
    assert_eq!(doc["nodes"][0]["label"], "Alice");
}

#[test]
fn test_history_paging() {
    let (_dir, path) = setup();
    let output = chatlens()
        .args(["history", "--page", "2", "--page-size", "3", "-f", "jsonl"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let page: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(page["page"], 2);
    assert_eq!(page["total"], 4);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next"], false);
    assert_eq!(page["entries"][0]["text_content"], "тесты тесты и релиз");
}

#[test]
fn test_history_page_past_end_is_empty() {
    let (_dir, path) = setup();
    let output = chatlens()
        .args(["history", "--page", "9", "-f", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(page["entries"].as_array().unwrap().is_empty());
    assert_eq!(page["total"], 4);
}

#[test]
fn test_history_csv_lists_entries() {
    let (_dir, path) = setup();
    chatlens()
        .args(["history", "--page-size", "2"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("date;from_id;from_name;text_content"))
        .stdout(predicate::str::contains("Release Chat").not());
}

#[test]
fn test_links() {
    let (_dir, path) = setup();
    chatlens()
        .arg("links")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://docs.rs/regex;user1;Alice"));
}

#[test]
fn test_words() {
    let (_dir, path) = setup();
    let output = chatlens()
        .args(["words", "--top", "2"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["word;count", "тесты;3", "релиз;2"]);
}

#[test]
fn test_words_extra_stop_word() {
    let (_dir, path) = setup();
    chatlens()
        .args(["words", "--stop-word", "Тесты"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("тесты").not());
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_output_file_with_summary() {
    let (dir, path) = setup();
    let out = dir.path().join("participants.json");

    chatlens()
        .args(["participants", "-f", "json", "-o"])
        .arg(&out)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Release Chat"))
        .stdout(predicate::str::contains("Report saved"));

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 2);
}

#[test]
fn test_format_follows_output_extension() {
    let (dir, path) = setup();
    let out = dir.path().join("edges.jsonl");

    chatlens()
        .args(["graph", "--weighted", "-o"])
        .arg(&out)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("JSONL"));

    let written = fs::read_to_string(&out).unwrap();
    let first: serde_json::Value = serde_json::from_str(written.lines().next().unwrap()).unwrap();
    assert_eq!(first["from"], "user2");
    assert_eq!(first["weight"], 2);
}

#[test]
fn test_search_json_with_dates() {
    let (_dir, path) = setup();
    chatlens()
        .args(["search", "-f", "json", "--dates"])
        .arg(&path)
        .arg("зелёные")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date\": \"2024-01-15T10:31:00\""));
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_filter_after() {
    let (_dir, path) = setup();
    chatlens()
        .args(["info", "--after", "2024-01-16"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Release Chat;2;1;user1;0"));
}

#[test]
fn test_filter_before_and_sender() {
    let (_dir, path) = setup();
    let output = chatlens()
        .args(["search", "--before", "2024-01-15", "--from", "alice"])
        .arg(&path)
        .arg("релиз")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("Релиз готов"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_file() {
    chatlens()
        .args(["info", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_invalid_date() {
    let (_dir, path) = setup();
    chatlens()
        .args(["info", "--after", "15-01-2024"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_malformed_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"name": "no messages"}"#).unwrap();

    chatlens()
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field 'messages'"));
}

#[test]
fn test_unknown_subcommand() {
    chatlens().arg("summarize").assert().failure();
}
