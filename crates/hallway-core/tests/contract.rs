// crates/hallway-core/tests/contract.rs
// ============================================================================
// Module: Hallway Contract Tests
// Description: Contract parsing, defaults, limits, and option decoding.
// ============================================================================
//! ## Overview
//! Validates contract document parsing with serde defaults, strict unknown
//! field rejection, size limits, identifier validation, and run option
//! defaults.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use hallway_core::ContractError;
use hallway_core::GateName;
use hallway_core::GateProfile;
use hallway_core::HallwayContract;
use hallway_core::RoomId;
use hallway_core::RunOptions;
use hallway_core::RunRequest;
use hallway_core::core::contract::MAX_CONTRACT_BYTES;
use serde_json::json;

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Tests minimal contract uses defaults.
#[test]
fn minimal_contract_uses_defaults() {
    let contract = HallwayContract::from_json_str(r#"{"sequence": ["a", "b"]}"#).unwrap();
    assert_eq!(contract.title, "Hallway");
    assert_eq!(contract.sequence, vec![RoomId::from("a"), RoomId::from("b")]);
    assert!(contract.gate_profile.chain.is_empty());
    assert!(contract.gate_profile.overrides.is_empty());
    assert!(contract.stone_alignment.is_empty());
    assert!(!contract.mini_walk_supported);
}

/// Tests full contract parses.
#[test]
fn full_contract_parses() {
    let text = json!({
        "title": "Hall",
        "purpose": "Walk",
        "stone_alignment": ["clarity", "pace"],
        "sequence": ["entry_room", "exit_room"],
        "mini_walk_supported": true,
        "gate_profile": {
            "chain": ["coherence_gate"],
            "overrides": {"coherence_gate": {"strict": true}}
        }
    })
    .to_string();
    let contract = HallwayContract::from_json_str(&text).unwrap();
    assert_eq!(contract.title, "Hall");
    assert_eq!(contract.stone_alignment, vec!["clarity", "pace"]);
    assert_eq!(contract.gate_profile.chain, vec![GateName::from("coherence_gate")]);
    assert_eq!(contract.gate_profile.overrides["coherence_gate"], json!({"strict": true}));
}

/// Tests unknown fields are rejected.
#[test]
fn unknown_fields_are_rejected() {
    let err = HallwayContract::from_json_str(r#"{"sequence": [], "extra": 1}"#).unwrap_err();
    assert!(matches!(err, ContractError::Parse(_)));

    let err =
        HallwayContract::from_json_str(r#"{"gate_profile": {"chain": [], "mode": "x"}}"#)
            .unwrap_err();
    assert!(matches!(err, ContractError::Parse(_)));
}

/// Tests malformed json is parse error.
#[test]
fn malformed_json_is_parse_error() {
    let err = HallwayContract::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ContractError::Parse(_)));
}

/// Tests oversized contract is rejected.
#[test]
fn oversized_contract_is_rejected() {
    let text = " ".repeat(MAX_CONTRACT_BYTES + 1);
    let err = HallwayContract::from_json_str(&text).unwrap_err();
    assert!(matches!(
        err,
        ContractError::TooLarge { limit: MAX_CONTRACT_BYTES, actual } if actual == MAX_CONTRACT_BYTES + 1
    ));
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Tests blank room is rejected.
#[test]
fn blank_room_is_rejected() {
    let err = HallwayContract::from_json_str(r#"{"sequence": ["a", "  "]}"#).unwrap_err();
    assert!(matches!(err, ContractError::BlankRoom { index: 1 }));
}

/// Tests blank gate is rejected.
#[test]
fn blank_gate_is_rejected() {
    let contract = HallwayContract::new(
        vec![RoomId::from("a")],
        GateProfile::with_chain(vec![GateName::from("")]),
    );
    assert!(matches!(contract.validate(), Err(ContractError::BlankGate { index: 0 })));
}

/// Tests default contract is five room hallway.
#[test]
fn default_contract_is_five_room_hallway() {
    let contract = HallwayContract::default_contract();
    let rooms: Vec<&str> = contract.sequence.iter().map(RoomId::as_str).collect();
    assert_eq!(rooms, vec![
        "entry_room",
        "walk_room",
        "memory_room",
        "integration_commit_room",
        "exit_room"
    ]);
    assert_eq!(contract.gate_profile.chain, vec![GateName::from("coherence_gate")]);
    assert!(contract.mini_walk_supported);
    assert!(contract.validate().is_ok());
    assert_eq!(HallwayContract::default(), contract);
}

/// Tests contains room is exact.
#[test]
fn contains_room_is_exact() {
    let contract = HallwayContract::default_contract();
    assert!(contract.contains_room(&RoomId::from("walk_room")));
    assert!(!contract.contains_room(&RoomId::from("Walk_Room")));
}

// ============================================================================
// SECTION: Run Options
// ============================================================================

/// Tests run options default to stop on decline.
#[test]
fn run_options_default_to_stop_on_decline() {
    let options = RunOptions::default();
    assert!(options.stop_on_decline);
    assert!(!options.dry_run);
    assert!(!options.mini_walk);
    assert!(options.rooms_subset.is_empty());
}

/// Tests run options fill missing fields from defaults.
#[test]
fn run_options_fill_missing_fields_from_defaults() {
    let options: RunOptions = serde_json::from_value(json!({"dry_run": true})).unwrap();
    assert!(options.dry_run);
    assert!(options.stop_on_decline);

    let err = serde_json::from_value::<RunOptions>(json!({"fast": true}));
    assert!(err.is_err());
}

/// Tests run request looks up payloads by room.
#[test]
fn run_request_looks_up_payloads_by_room() {
    let request = RunRequest::new("session-1")
        .with_payload("entry_room", json!({"intent": "explore"}))
        .with_options(RunOptions::default().dry_run(true));
    assert_eq!(request.payload_for(&RoomId::from("entry_room")), Some(&json!({"intent": "explore"})));
    assert_eq!(request.payload_for(&RoomId::from("exit_room")), None);
    assert!(request.options.dry_run);
}
