//! Integration tests for trace file reading.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;

use vigil_adapters::TraceSignalSource;
use vigil_core::{FrameSample, SignalSource};

fn write_trace(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create trace file");
    file.write_all(content.as_bytes()).expect("write trace file");
    path
}

fn drain(source: &mut TraceSignalSource) -> Vec<FrameSample> {
    let mut samples = Vec::new();
    loop {
        match source.next_sample() {
            Ok(Some(sample)) => samples.push(sample),
            Ok(None) => break,
            Err(_) => continue,
        }
    }
    samples
}

#[test]
fn test_full_session_trace() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace(
        &dir,
        "session.jsonl",
        concat!(
            "{\"t\": 0.0, \"ear\": 0.34}\n",
            "{\"t\": 0.5, \"ear\": 0.19}\n",
            "{\"t\": 1.0, \"ear\": 0.18}\n",
            "{\"t\": 1.5, \"ear\": null}\n",
            "{\"t\": 2.0, \"ear\": 0.33}\n",
        ),
    );

    let mut source = TraceSignalSource::open(&path).unwrap();
    let samples = drain(&mut source);

    assert_eq!(samples.len(), 5);
    assert_eq!(samples[0].ear, Some(0.34));
    assert_eq!(samples[3].ear, None);
    assert!((samples[4].timestamp.as_secs_f64() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_timestamps_are_taken_from_the_file() {
    let dir = tempfile::tempdir().unwrap();
    // Irregular spacing, as a real capture under load would produce.
    let path = write_trace(
        &dir,
        "irregular.jsonl",
        "{\"t\": 0.0, \"ear\": 0.3}\n{\"t\": 0.07, \"ear\": 0.3}\n{\"t\": 1.93, \"ear\": 0.3}\n",
    );

    let mut source = TraceSignalSource::open(&path).unwrap();
    let samples = drain(&mut source);

    let times: Vec<f64> = samples.iter().map(|s| s.timestamp.as_secs_f64()).collect();
    assert_eq!(times.len(), 3);
    assert!((times[1] - 0.07).abs() < 1e-9);
    assert!((times[2] - 1.93).abs() < 1e-9);
}

#[test]
fn test_corrupt_lines_are_isolated_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace(
        &dir,
        "corrupt.jsonl",
        "{\"t\": 0.0, \"ear\": 0.3}\ngarbage\n{\"t\": 1.0, \"ear\": 0.2}\n",
    );

    let mut source = TraceSignalSource::open(&path).unwrap();

    assert!(source.next_sample().unwrap().is_some());
    let err = source.next_sample().expect_err("corrupt line should error");
    assert!(format!("{err:#}").contains(":2:"));
    // The next pull resumes past the corrupt line.
    assert!(source.next_sample().unwrap().is_some());
    assert!(source.next_sample().unwrap().is_none());
}

#[test]
fn test_empty_file_is_an_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace(&dir, "empty.jsonl", "");

    let mut source = TraceSignalSource::open(&path).unwrap();
    assert!(source.next_sample().unwrap().is_none());
    // Exhaustion is stable across repeated pulls.
    assert!(source.next_sample().unwrap().is_none());
}

#[test]
fn test_paced_replay_waits_for_the_recorded_clock() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace(
        &dir,
        "paced.jsonl",
        "{\"t\": 0.0, \"ear\": 0.3}\n{\"t\": 0.1, \"ear\": 0.3}\n",
    );

    let mut source = TraceSignalSource::open(&path).unwrap().paced();
    let started = std::time::Instant::now();
    let samples = drain(&mut source);

    assert_eq!(samples.len(), 2);
    assert!(started.elapsed() >= std::time::Duration::from_millis(100));
}
