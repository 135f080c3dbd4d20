//! Output format validation tests.
//!
//! Tests event log JSON shape and summary report field presence.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use serde_json::Value;
use vigil_test_support::TraceBuilder;

/// Write a scripted trace to a temp file.
fn write_trace(builder: &TraceBuilder) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    builder.write_jsonl(file.path()).unwrap();
    file
}

/// Replay the trace and capture output.
fn replay_output(trace: &tempfile::NamedTempFile, extra: &[&str]) -> std::process::Output {
    let mut cmd = Command::cargo_bin("vigil").unwrap();
    cmd.arg("replay").arg(trace.path());
    for arg in extra {
        cmd.arg(arg);
    }
    cmd.output().unwrap()
}

// === Event Line Shape ===

#[test]
fn test_event_lines_are_single_objects() {
    let trace = write_trace(&TraceBuilder::long_closure());
    let output = replay_output(&trace, &[]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut seen = 0;

    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: Result<Value, _> = serde_json::from_str(line);
        assert!(parsed.is_ok(), "Each event line should be valid JSON: {line}");

        let value = parsed.unwrap();
        assert!(value.is_object(), "Event line should be an object");
        assert!(value.get("event").is_some(), "Event should have 'event' field");
        assert!(value.get("t").is_some(), "Event should have 't' field");
        assert!(value.get("score").is_some(), "Event should have 'score' field");
        seen += 1;
    }

    assert!(seen > 0, "Long closure should emit at least one event");
}

#[test]
fn test_alert_event_field_values() {
    let trace = write_trace(&TraceBuilder::long_closure());
    let output = replay_output(&trace, &[]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().find(|l| !l.trim().is_empty()).unwrap();
    let event: Value = serde_json::from_str(line).unwrap();

    assert_eq!(event["event"], "alert_fired");
    assert!(event["t"].is_number(), "'t' should be seconds into the session");
    assert!(event["score"].as_u64().unwrap() >= 1);
}

#[test]
fn test_event_kind_values_are_snake_case() {
    let trace = write_trace(&TraceBuilder::new().closed_for(4.0).open_for(1.0));
    let output = replay_output(
        &trace,
        &["--min-closed", "1", "--cooldown", "1", "--fatigue-threshold", "2"],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let known = ["alert_fired", "fatigue_entered", "fatigue_cleared"];

    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let event: Value = serde_json::from_str(line).unwrap();
        let kind = event["event"].as_str().unwrap();
        assert!(known.contains(&kind), "Unexpected event kind: {kind}");
    }
}

#[test]
fn test_event_lines_are_compact() {
    let trace = write_trace(&TraceBuilder::long_closure());
    let output = replay_output(&trace, &[]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        assert!(
            !line.starts_with("  "),
            "Event lines should not have leading indentation"
        );
    }
}

// === Pretty Format ===

#[test]
fn test_pretty_format_is_indented_array() {
    let trace = write_trace(&TraceBuilder::long_closure());
    let output = replay_output(&trace, &["--pretty"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    // Pretty format should have newlines and indentation
    assert!(stdout.contains('\n'), "Pretty format should have newlines");
    assert!(stdout.contains("  "), "Pretty format should have indentation");

    // And still parse as one JSON document
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.is_array(), "Pretty format should be an array");
}

// === Summary Report ===

#[test]
fn test_summary_report_fields() {
    let trace = write_trace(&TraceBuilder::long_closure());
    let output = replay_output(&trace, &["--summary"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().filter(|l| !l.trim().is_empty()).last().unwrap();
    let report: Value = serde_json::from_str(line).unwrap();

    assert!(report["started_at"].is_string(), "'started_at' should be a string");
    let ts = report["started_at"].as_str().unwrap();
    assert!(
        ts.contains('T') || ts.contains('-'),
        "Timestamp should be ISO 8601 format: {ts}"
    );

    assert!(report["ticks"].is_number());
    assert!(report["absent_ticks"].is_number());
    assert!(report["skipped_samples"].is_number());
    assert!(report["alerts"].is_number());
    assert!(report["peak_score"].is_number());
    assert!(report["fatigued_ticks"].is_number());
    assert!(report["duration_secs"].is_number());
}

// === Event Log File ===

#[test]
fn test_file_events_match_stdout_events() {
    let trace = write_trace(&TraceBuilder::new().closed_for(9.0));

    let stdout_run = replay_output(&trace, &[]);
    let from_stdout = String::from_utf8_lossy(&stdout_run.stdout).into_owned();

    let events_file = tempfile::NamedTempFile::new().unwrap();
    let path = events_file.path().to_string_lossy().into_owned();
    let _ = replay_output(&trace, &["--events", &path]);
    let from_file = std::fs::read_to_string(events_file.path()).unwrap();

    assert_eq!(
        from_stdout, from_file,
        "The event log should be identical on stdout and in a file"
    );
}
