// crates/hallway-core/tests/audit_chain.rs
// ============================================================================
// Module: Audit Chain Tests
// Description: Projection and verification of step hash chains.
// ============================================================================
//! ## Overview
//! Builds small chains by hand with the upcaster and checks that the audit
//! projection is ordered and that verification catches broken links and
//! tampered data.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use hallway_core::AuditChainError;
use hallway_core::StepResult;
use hallway_core::StepStatus;
use hallway_core::UpcastInput;
use hallway_core::runtime::build_audit_chain;
use hallway_core::runtime::upcast;
use hallway_core::runtime::verify_audit_chain;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Links outputs into a chain the same way a run does.
fn chain_of(outputs: &[(&str, Value)]) -> Vec<StepResult> {
    let mut steps: Vec<StepResult> = Vec::new();
    for (room, output) in outputs {
        let prev = steps.last().map(|step| step.audit.step_hash.clone());
        let step =
            upcast(UpcastInput::new(*room, output.clone(), StepStatus::Ok).prev_hash(prev)).unwrap();
        steps.push(step);
    }
    steps
}

/// Three-room chain used by most checks.
fn three_rooms() -> Vec<StepResult> {
    chain_of(&[
        ("entry_room", json!({"intent": "explore"})),
        ("walk_room", json!({"pace": "slow"})),
        ("exit_room", json!({"summary": "done"})),
    ])
}

// ============================================================================
// SECTION: Projection
// ============================================================================

/// Tests audit chain lists step hashes in order.
#[test]
fn audit_chain_lists_step_hashes_in_order() {
    let steps = three_rooms();
    let chain = build_audit_chain(&steps);
    let expected: Vec<String> = steps.iter().map(|step| step.step_hash().to_string()).collect();
    assert_eq!(chain, expected);
}

/// Tests empty run has empty chain.
#[test]
fn empty_run_has_empty_chain() {
    assert!(build_audit_chain(&[]).is_empty());
    assert!(verify_audit_chain(&[]).is_ok());
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Tests intact chain verifies.
#[test]
fn intact_chain_verifies() {
    let steps = three_rooms();
    assert_eq!(steps[0].audit.prev_hash, None);
    assert_eq!(steps[1].audit.prev_hash.as_deref(), Some(steps[0].step_hash()));
    assert!(verify_audit_chain(&steps).is_ok());
}

/// Tests first step with prev hash is broken link.
#[test]
fn first_step_with_prev_hash_is_broken_link() {
    let mut steps = three_rooms();
    steps[0].audit.prev_hash = Some("0".repeat(64));
    let err = verify_audit_chain(&steps).unwrap_err();
    assert!(matches!(err, AuditChainError::BrokenLink { index: 0, expected: None, .. }));
}

/// Tests reordered steps are broken links.
#[test]
fn reordered_steps_are_broken_links() {
    let mut steps = three_rooms();
    steps.swap(1, 2);
    let err = verify_audit_chain(&steps).unwrap_err();
    assert!(matches!(err, AuditChainError::BrokenLink { index: 1, .. }));
}

/// Tests tampered data is hash mismatch.
#[test]
fn tampered_data_is_hash_mismatch() {
    let mut steps = three_rooms();
    steps[1].data = json!({"pace": "fast"});
    let err = verify_audit_chain(&steps).unwrap_err();
    match err {
        AuditChainError::HashMismatch {
            index,
            recorded,
            computed,
        } => {
            assert_eq!(index, 1);
            assert_ne!(recorded, computed);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
