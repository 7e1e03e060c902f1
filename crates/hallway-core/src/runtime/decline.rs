// crates/hallway-core/src/runtime/decline.rs
// ============================================================================
// Module: Hallway Decline Classification
// Description: Ordered decline-signal rules over legacy room output.
// Purpose: Classify room output as ok or decline without running the hallway.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Room output is opaque to the hallway except for three recognized signals,
//! checked in order:
//! 1. an `error` field is present (any value),
//! 2. `status` equals `"decline"`,
//! 3. `next_action` equals `"hold"` or `"later"`.
//!
//! Non-object outputs carry no signals and classify as ok.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::core::StepStatus;

// ============================================================================
// SECTION: Decline Signals
// ============================================================================

/// Decline signal matched in room output.
///
/// # Invariants
/// - Variant order matches rule evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineSignal {
    /// Output carries an `error` field.
    ErrorField,
    /// Output carries `status: "decline"`.
    StatusDecline,
    /// Output carries `next_action: "hold"`.
    NextActionHold,
    /// Output carries `next_action: "later"`.
    NextActionLater,
}

/// Returns the first decline signal found in the output, if any.
#[must_use]
pub fn decline_signal(room_output: &Value) -> Option<DeclineSignal> {
    let fields = room_output.as_object()?;
    if fields.contains_key("error") {
        return Some(DeclineSignal::ErrorField);
    }
    if fields.get("status").and_then(Value::as_str) == Some("decline") {
        return Some(DeclineSignal::StatusDecline);
    }
    match fields.get("next_action").and_then(Value::as_str) {
        Some("hold") => Some(DeclineSignal::NextActionHold),
        Some("later") => Some(DeclineSignal::NextActionLater),
        _ => None,
    }
}

/// Classifies room output as [`StepStatus::Ok`] or [`StepStatus::Decline`].
#[must_use]
pub fn classify_room_output(room_output: &Value) -> StepStatus {
    if decline_signal(room_output).is_some() { StepStatus::Decline } else { StepStatus::Ok }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
