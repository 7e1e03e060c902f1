// crates/hallway-core/tests/upcaster.rs
// ============================================================================
// Module: Contract Upcaster Tests
// Description: Envelope construction, step hashing, and round-trip checks.
// ============================================================================
//! ## Overview
//! Checks that upcasting produces a complete v0.2 envelope whose step hash
//! depends only on the room output, and that downcasting recovers the output
//! unchanged for arbitrary JSON values.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use hallway_core::GateDecision;
use hallway_core::GateName;
use hallway_core::StepStatus;
use hallway_core::UpcastInput;
use hallway_core::core::envelope::ENVELOPE_DECLINE_MESSAGE;
use hallway_core::core::envelope::ENVELOPE_DECLINE_REASON;
use hallway_core::hashing::compute_step_hash;
use hallway_core::runtime::downcast;
use hallway_core::runtime::upcast;
use hallway_core::runtime::verify_roundtrip;
use proptest::prelude::*;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Envelope Shape
// ============================================================================

/// Tests upcast populates envelope fields.
#[test]
fn upcast_populates_envelope_fields() {
    let output = json!({"intent": "explore", "session_state_ref": "s-2"});
    let step = upcast(UpcastInput::new("entry_room", output.clone(), StepStatus::Ok)).unwrap();

    assert_eq!(step.contract_version, "0.2.0");
    assert_eq!(step.room_id.as_str(), "entry_room");
    assert_eq!(step.status, StepStatus::Ok);
    assert_eq!(step.data, output);
    assert!(step.invariants.deterministic);
    assert!(step.invariants.no_partial_write);
    assert!(step.gate_decisions.is_empty());
    assert_eq!(step.audit.prev_hash, None);
    assert_eq!(step.audit.room_contract_version, "0.1.0");
    assert_eq!(step.audit.step_hash, compute_step_hash(&output).unwrap());
    assert_eq!(step.diagnostics_digest, format!("sha256:{}", step.audit.step_hash));
    assert!(step.decline.is_none());
}

/// Tests decline status populates decline block.
#[test]
fn decline_status_populates_decline_block() {
    let step = upcast(UpcastInput::new("walk_room", json!({"status": "decline"}), StepStatus::Decline))
        .unwrap();
    let decline = step.decline.expect("decline block");
    assert_eq!(decline.reason, ENVELOPE_DECLINE_REASON);
    assert_eq!(decline.message, ENVELOPE_DECLINE_MESSAGE);
    assert_eq!(decline.details, json!({}));
}

/// Tests envelope serializes decline as null when ok.
#[test]
fn envelope_serializes_decline_as_null_when_ok() {
    let step = upcast(UpcastInput::new("exit_room", json!({}), StepStatus::Ok)).unwrap();
    let value = serde_json::to_value(&step).unwrap();
    assert_eq!(value["decline"], Value::Null);
    assert_eq!(value["status"], json!("ok"));
    assert_eq!(value["audit"]["prev_hash"], Value::Null);
}

/// Tests builder overrides are applied.
#[test]
fn builder_overrides_are_applied() {
    let decision = GateDecision::allow(GateName::from("coherence_gate"), "ok");
    let step = upcast(
        UpcastInput::new("memory_room", json!({"kept": true}), StepStatus::Ok)
            .gate_decisions(vec![decision.clone()])
            .prev_hash(Some("abc".to_string()))
            .diagnostics_digest("sha256:precomputed")
            .room_contract_version("0.1.3"),
    )
    .unwrap();

    assert_eq!(step.gate_decisions, vec![decision]);
    assert_eq!(step.audit.prev_hash.as_deref(), Some("abc"));
    assert_eq!(step.diagnostics_digest, "sha256:precomputed");
    assert_eq!(step.audit.room_contract_version, "0.1.3");
}

// ============================================================================
// SECTION: Step Hash Isolation
// ============================================================================

/// Tests step hash ignores status prev hash and decisions.
#[test]
fn step_hash_ignores_status_prev_hash_and_decisions() {
    let output = json!({"error": "boom", "room_id": "walk_room"});
    let plain = upcast(UpcastInput::new("walk_room", output.clone(), StepStatus::Ok)).unwrap();
    let decorated = upcast(
        UpcastInput::new("walk_room", output, StepStatus::Decline)
            .gate_decisions(vec![GateDecision::deny(GateName::from("g"), "no")])
            .prev_hash(Some("f".repeat(64))),
    )
    .unwrap();
    assert_eq!(plain.step_hash(), decorated.step_hash());
}

/// Tests step hash differs for different outputs.
#[test]
fn step_hash_differs_for_different_outputs() {
    let first = upcast(UpcastInput::new("a", json!({"n": 1}), StepStatus::Ok)).unwrap();
    let second = upcast(UpcastInput::new("a", json!({"n": 2}), StepStatus::Ok)).unwrap();
    assert_ne!(first.step_hash(), second.step_hash());
}

// ============================================================================
// SECTION: Round Trip
// ============================================================================

/// Tests downcast returns data verbatim.
#[test]
fn downcast_returns_data_verbatim() {
    let output = json!([1, "two", {"three": 3}]);
    let step = upcast(UpcastInput::new("walk_room", output.clone(), StepStatus::Ok)).unwrap();
    assert_eq!(downcast(&step), &output);
    assert!(verify_roundtrip(&output, &step));
}

/// Tests roundtrip ignores key insertion order.
#[test]
fn roundtrip_ignores_key_insertion_order() {
    let forward = json!({"a": 1, "b": {"c": 2, "d": 3}});
    let reordered = json!({"b": {"d": 3, "c": 2}, "a": 1});
    let step = upcast(UpcastInput::new("walk_room", forward, StepStatus::Ok)).unwrap();
    assert!(verify_roundtrip(&reordered, &step));
}

/// Tests roundtrip detects modified data.
#[test]
fn roundtrip_detects_modified_data() {
    let output = json!({"a": 1});
    let mut step = upcast(UpcastInput::new("walk_room", output.clone(), StepStatus::Ok)).unwrap();
    step.data = json!({"a": 2});
    assert!(!verify_roundtrip(&output, &step));
}

// ============================================================================
// SECTION: Property Tests
// ============================================================================

/// Strategy producing finite JSON values up to a modest depth.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 _-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z_]{1,6}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    /// Tests upcast then downcast is identity.
    #[test]
    fn upcast_then_downcast_is_identity(value in json_value()) {
        let step = upcast(UpcastInput::new("walk_room", value.clone(), StepStatus::Ok)).unwrap();
        prop_assert_eq!(downcast(&step), &value);
        prop_assert!(verify_roundtrip(&value, &step));
        prop_assert_eq!(step.step_hash(), compute_step_hash(&value).unwrap());
    }
}
