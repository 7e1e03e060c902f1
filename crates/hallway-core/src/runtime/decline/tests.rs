// crates/hallway-core/src/runtime/decline/tests.rs
// ============================================================================
// Module: Decline Classification Unit Tests
// Description: Rule ordering and edge cases for decline signals.
// ============================================================================

//! ## Overview
//! Unit tests for decline-signal rule ordering.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]

use serde_json::json;

use super::DeclineSignal;
use super::classify_room_output;
use super::decline_signal;
use crate::core::StepStatus;

/// Tests error field declines even when null.
#[test]
fn error_field_declines_even_when_null() {
    assert_eq!(decline_signal(&json!({"error": null})), Some(DeclineSignal::ErrorField));
}

/// Tests error field wins over later rules.
#[test]
fn error_field_wins_over_later_rules() {
    let output = json!({"error": "boom", "status": "decline", "next_action": "hold"});
    assert_eq!(decline_signal(&output), Some(DeclineSignal::ErrorField));
}

/// Tests status decline is detected.
#[test]
fn status_decline_is_detected() {
    assert_eq!(decline_signal(&json!({"status": "decline"})), Some(DeclineSignal::StatusDecline));
}

/// Tests other status values are ok.
#[test]
fn other_status_values_are_ok() {
    assert_eq!(classify_room_output(&json!({"status": "ok"})), StepStatus::Ok);
    assert_eq!(classify_room_output(&json!({"status": "DECLINE"})), StepStatus::Ok);
}

/// Tests next action hold and later decline.
#[test]
fn next_action_hold_and_later_decline() {
    assert_eq!(
        decline_signal(&json!({"next_action": "hold"})),
        Some(DeclineSignal::NextActionHold)
    );
    assert_eq!(
        decline_signal(&json!({"next_action": "later"})),
        Some(DeclineSignal::NextActionLater)
    );
    assert_eq!(classify_room_output(&json!({"next_action": "continue"})), StepStatus::Ok);
}

/// Tests non object outputs are ok.
#[test]
fn non_object_outputs_are_ok() {
    assert_eq!(classify_room_output(&json!(["error"])), StepStatus::Ok);
    assert_eq!(classify_room_output(&json!("decline")), StepStatus::Ok);
    assert_eq!(classify_room_output(&json!(null)), StepStatus::Ok);
}

/// Tests nested error field is ignored.
#[test]
fn nested_error_field_is_ignored() {
    assert_eq!(classify_room_output(&json!({"result": {"error": "inner"}})), StepStatus::Ok);
}
