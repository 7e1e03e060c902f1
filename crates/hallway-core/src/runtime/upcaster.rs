// crates/hallway-core/src/runtime/upcaster.rs
// ============================================================================
// Module: Hallway Contract Upcaster
// Description: v0.1 room output to v0.2 step envelope conversion and back.
// Purpose: Bridge legacy room payloads into auditable envelopes losslessly.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Upcasting wraps a legacy room output in a [`StepResult`] envelope without
//! touching the output itself. Downcasting projects `data` back out.
//! Upcast followed by downcast is the identity on canonical JSON for every
//! legacy value, independent of map key insertion order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::GateDecision;
use crate::core::RoomId;
use crate::core::StepAudit;
use crate::core::StepDecline;
use crate::core::StepInvariants;
use crate::core::StepResult;
use crate::core::StepStatus;
use crate::core::envelope::LEGACY_ROOM_CONTRACT_VERSION;
use crate::core::envelope::STEP_CONTRACT_VERSION;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashError;
use crate::core::hashing::canonical_json_bytes;
use crate::core::hashing::hash_bytes;

// ============================================================================
// SECTION: Upcast Input
// ============================================================================

/// Inputs for a single upcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcastInput {
    /// Room that produced the output.
    pub room_id: RoomId,
    /// Legacy v0.1 room output.
    pub room_output: Value,
    /// Status assigned by the hallway.
    pub status: StepStatus,
    /// Gate decisions recorded for the room.
    pub gate_decisions: Vec<GateDecision>,
    /// Step hash of the preceding envelope.
    pub prev_hash: Option<String>,
    /// Precomputed diagnostics digest; computed from the output when `None`.
    pub diagnostics_digest: Option<String>,
    /// Contract version of the producing room.
    pub room_contract_version: String,
}

impl UpcastInput {
    /// Creates an upcast input with no gate decisions and no previous hash.
    #[must_use]
    pub fn new(room_id: impl Into<RoomId>, room_output: Value, status: StepStatus) -> Self {
        Self {
            room_id: room_id.into(),
            room_output,
            status,
            gate_decisions: Vec::new(),
            prev_hash: None,
            diagnostics_digest: None,
            room_contract_version: LEGACY_ROOM_CONTRACT_VERSION.to_string(),
        }
    }

    /// Sets the gate decisions.
    #[must_use]
    pub fn gate_decisions(mut self, decisions: Vec<GateDecision>) -> Self {
        self.gate_decisions = decisions;
        self
    }

    /// Sets the previous step hash.
    #[must_use]
    pub fn prev_hash(mut self, prev_hash: Option<String>) -> Self {
        self.prev_hash = prev_hash;
        self
    }

    /// Overrides the diagnostics digest.
    #[must_use]
    pub fn diagnostics_digest(mut self, digest: impl Into<String>) -> Self {
        self.diagnostics_digest = Some(digest.into());
        self
    }

    /// Overrides the room contract version.
    #[must_use]
    pub fn room_contract_version(mut self, version: impl Into<String>) -> Self {
        self.room_contract_version = version.into();
        self
    }
}

// ============================================================================
// SECTION: Upcast / Downcast
// ============================================================================

/// Wraps a legacy room output in a v0.2 step envelope.
///
/// # Errors
///
/// Returns [`HashError`] when the room output cannot be canonicalized.
pub fn upcast(input: UpcastInput) -> Result<StepResult, HashError> {
    let canonical = canonical_json_bytes(&input.room_output)?;
    let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, &canonical);
    let diagnostics_digest = input.diagnostics_digest.unwrap_or_else(|| digest.tagged());
    let step_hash = digest.into_hex();
    let decline = input.status.is_decline().then(StepDecline::default);

    Ok(StepResult {
        contract_version: STEP_CONTRACT_VERSION.to_string(),
        room_id: input.room_id,
        status: input.status,
        data: input.room_output,
        invariants: StepInvariants::default(),
        gate_decisions: input.gate_decisions,
        diagnostics_digest,
        audit: StepAudit {
            step_hash,
            prev_hash: input.prev_hash,
            room_contract_version: input.room_contract_version,
        },
        decline,
    })
}

/// Projects the legacy room output out of an envelope.
#[must_use]
pub const fn downcast(step: &StepResult) -> &Value {
    &step.data
}

/// Returns true when `original` and the envelope's data are canonically equal.
///
/// A value that cannot be canonicalized never round-trips.
#[must_use]
pub fn verify_roundtrip(original: &Value, step: &StepResult) -> bool {
    match (canonical_json_bytes(original), canonical_json_bytes(downcast(step))) {
        (Ok(original_bytes), Ok(extracted_bytes)) => original_bytes == extracted_bytes,
        _ => false,
    }
}
