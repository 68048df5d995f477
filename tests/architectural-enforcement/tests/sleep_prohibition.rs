//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT sleep. The event loop waits on
//! terminal input, task completions and `tokio::time::interval` ticks; it
//! never polls.

use architectural_enforcement::{assert_no_violations, find_violations, production_lines};

#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_violations(
        &production_lines(),
        &["::sleep(", ".sleep(", "thread::sleep"],
        "Sleep call",
    );

    assert_no_violations(
        &violations,
        "✅ ACCEPTABLE: tokio::time::interval() for the spinner tick, sleeps in test code",
    );
}
