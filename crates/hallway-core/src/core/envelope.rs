// crates/hallway-core/src/core/envelope.rs
// ============================================================================
// Module: Hallway Step Result Envelope
// Description: v0.2 step result envelope wrapping legacy v0.1 room output.
// Purpose: Carry provenance, invariants, and audit metadata per room.
// Dependencies: crate::core::{gate, identifiers}, serde, serde_json
// ============================================================================

//! ## Overview
//! The step result envelope is the canonical output unit of a hallway run.
//! `data` holds the legacy room output verbatim; everything else is metadata
//! the hallway derives around it. Envelopes are created once per room attempt
//! and never mutated afterward.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::gate::GateDecision;
use crate::core::identifiers::RoomId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Contract version stamped on every v0.2 envelope and run report.
pub const STEP_CONTRACT_VERSION: &str = "0.2.0";

/// Default contract version recorded for legacy rooms.
pub const LEGACY_ROOM_CONTRACT_VERSION: &str = "0.1.0";

/// Generic decline reason recorded inside envelopes.
pub const ENVELOPE_DECLINE_REASON: &str = "gate_denied_or_room_decline";

/// Generic decline message recorded inside envelopes.
pub const ENVELOPE_DECLINE_MESSAGE: &str = "See gate_decisions and data for details";

// ============================================================================
// SECTION: Step Status
// ============================================================================

/// Step status assigned by the hallway.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Room completed and may be followed by the next room.
    Ok,
    /// Gate chain denied the room or the room declined.
    Decline,
}

impl StepStatus {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Decline => "decline",
        }
    }

    /// Returns true for [`StepStatus::Decline`].
    #[must_use]
    pub const fn is_decline(self) -> bool {
        matches!(self, Self::Decline)
    }
}

// ============================================================================
// SECTION: Envelope Blocks
// ============================================================================

/// Fixed invariants asserted by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInvariants {
    /// Run is deterministic for identical inputs.
    pub deterministic: bool,
    /// No partial writes are left behind by a declined room.
    pub no_partial_write: bool,
}

impl Default for StepInvariants {
    fn default() -> Self {
        Self {
            deterministic: true,
            no_partial_write: true,
        }
    }
}

/// Audit block linking an envelope into the run's hash chain.
///
/// # Invariants
/// - `step_hash` is a pure function of the envelope's `data`.
/// - `prev_hash` is `None` only for the first step in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepAudit {
    /// Lowercase hex SHA-256 of the canonical legacy output.
    pub step_hash: String,
    /// Step hash of the preceding envelope.
    pub prev_hash: Option<String>,
    /// Contract version of the room that produced `data`.
    pub room_contract_version: String,
}

/// Decline block populated only when status is decline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDecline {
    /// Decline reason code.
    pub reason: String,
    /// Human-readable message.
    pub message: String,
    /// Structured decline details.
    pub details: Value,
}

impl Default for StepDecline {
    fn default() -> Self {
        Self {
            reason: ENVELOPE_DECLINE_REASON.to_string(),
            message: ENVELOPE_DECLINE_MESSAGE.to_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }
}

// ============================================================================
// SECTION: Step Result
// ============================================================================

/// v0.2 step result envelope.
///
/// # Invariants
/// - `data` is the legacy room output, never mutated.
/// - `decline` is `Some` iff `status` is [`StepStatus::Decline`].
/// - `diagnostics_digest` is prefixed with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Envelope contract version (`0.2.0`).
    pub contract_version: String,
    /// Room that produced this step.
    pub room_id: RoomId,
    /// Step status.
    pub status: StepStatus,
    /// Legacy room output, verbatim.
    pub data: Value,
    /// Fixed run invariants.
    pub invariants: StepInvariants,
    /// Gate decisions recorded before the room ran.
    pub gate_decisions: Vec<GateDecision>,
    /// Tagged digest of the canonical `data`.
    pub diagnostics_digest: String,
    /// Hash-chain audit block.
    pub audit: StepAudit,
    /// Decline block (null unless declined).
    pub decline: Option<StepDecline>,
}

impl StepResult {
    /// Returns the step hash recorded in the audit block.
    #[must_use]
    pub fn step_hash(&self) -> &str {
        &self.audit.step_hash
    }

    /// Returns true when the step was declined.
    #[must_use]
    pub const fn is_decline(&self) -> bool {
        self.status.is_decline()
    }
}
