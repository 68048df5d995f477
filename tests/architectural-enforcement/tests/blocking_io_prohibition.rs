//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Production code MUST NOT block the event loop. Gateway calls
//! run on spawned tasks with the async `reqwest` client, and nothing waits
//! for a future synchronously.
//!
//! **Exception**: the config file is read with `std::fs` while loading
//! configuration, before the terminal UI starts.

use architectural_enforcement::{assert_no_violations, find_violations, production_lines};

/// Files allowed to read from disk synchronously
const STARTUP_FILES: &[&str] = &["chat/core/src/config.rs"];

#[test]
fn test_no_blocking_http_client() {
    let violations = find_violations(
        &production_lines(),
        &["reqwest::blocking"],
        "Blocking HTTP client",
    );

    assert_no_violations(
        &violations,
        "✅ REQUIRED: reqwest::Client with .await, run from a TaskRunner task",
    );
}

#[test]
fn test_no_synchronous_waits_on_futures() {
    let violations = find_violations(
        &production_lines(),
        &["block_on(", "block_in_place("],
        "Synchronous wait on a future",
    );

    assert_no_violations(
        &violations,
        "✅ REQUIRED: return a Task from the controller and handle its completion event",
    );
}

#[test]
fn test_no_blocking_file_io_outside_startup() {
    let lines: Vec<_> = production_lines()
        .into_iter()
        .filter(|line| !STARTUP_FILES.iter().any(|f| line.path.ends_with(f)))
        .collect();
    let violations = find_violations(
        &lines,
        &["std::fs::", "use std::fs", "std::net::", "use std::net"],
        "Blocking file or network I/O",
    );

    assert_no_violations(
        &violations,
        "✅ ACCEPTABLE blocking I/O: configuration loading before the UI starts",
    );
}
