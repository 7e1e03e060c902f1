// crates/hallway-core/src/core/report.rs
// ============================================================================
// Module: Hallway Run Report
// Description: Final run report with steps, exit summary, and audit chain.
// Purpose: Provide the stable v0.2 output shape of a hallway run.
// Dependencies: crate::core::{contract, envelope, identifiers, options}, serde
// ============================================================================

//! ## Overview
//! The run report is assembled exactly once, at the single return point of a
//! run: either the early exit on a terminal decline or full completion.
//! Field names are part of the persisted contract and must stay stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::contract::GateProfile;
use crate::core::envelope::StepResult;
use crate::core::identifiers::RoomId;
use crate::core::identifiers::SessionRef;
use crate::core::options::RunOptions;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Room identifier reported for the hallway itself.
pub const HALLWAY_ROOM_ID: &str = "hallway";

// ============================================================================
// SECTION: Exit Summary
// ============================================================================

/// Reason a run stopped before completing.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunDeclineReason {
    /// Gate chain denied a room.
    GateChainFailed,
    /// Room output classified as a decline.
    RoomDeclined,
}

impl RunDeclineReason {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GateChainFailed => "gate_chain_failed",
            Self::RoomDeclined => "room_declined",
        }
    }
}

/// Terminal decline recorded in the exit summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDecline {
    /// Decline reason.
    pub reason: RunDeclineReason,
    /// Human-readable message.
    pub message: String,
    /// Structured details (room id plus gate decisions or room output).
    pub details: Value,
}

/// Exit summary for a run.
///
/// # Invariants
/// - `completed` is true iff `decline` is `None`.
/// - `auditable_hash_chain` lists step hashes in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSummary {
    /// True when every selected room ran without a terminal decline.
    pub completed: bool,
    /// Terminal decline, if the run stopped early.
    pub decline: Option<RunDecline>,
    /// Ordered step hashes.
    pub auditable_hash_chain: Vec<String>,
}

// ============================================================================
// SECTION: Run Report
// ============================================================================

/// Echoed run inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInputs {
    /// Session reference the run started from.
    pub session_state_ref: SessionRef,
    /// Per-room payloads supplied by the caller.
    pub payloads: BTreeMap<RoomId, Value>,
    /// Options the run was executed with.
    pub options: RunOptions,
}

/// Run outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutputs {
    /// Output contract version (`0.2.0`).
    pub contract_version: String,
    /// Step envelopes in execution order.
    pub steps: Vec<StepResult>,
    /// Session reference at the end of the run.
    pub final_state_ref: SessionRef,
    /// Exit summary.
    pub exit_summary: ExitSummary,
}

/// Hallway run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Report contract version (`0.2.0`).
    pub contract_version: String,
    /// Always [`HALLWAY_ROOM_ID`].
    pub room_id: String,
    /// Contract title.
    pub title: String,
    /// Contract purpose.
    pub purpose: String,
    /// Contract stone alignment labels.
    pub stone_alignment: Vec<String>,
    /// Canonical sequence.
    pub sequence: Vec<RoomId>,
    /// Whether the contract advertises mini walks.
    pub mini_walk_supported: bool,
    /// Gate profile in effect.
    pub gate_profile: GateProfile,
    /// Echoed inputs.
    pub inputs: RunInputs,
    /// Run outputs.
    pub outputs: RunOutputs,
}

impl RunReport {
    /// Returns the step envelopes.
    #[must_use]
    pub fn steps(&self) -> &[StepResult] {
        &self.outputs.steps
    }

    /// Returns the exit summary.
    #[must_use]
    pub const fn exit_summary(&self) -> &ExitSummary {
        &self.outputs.exit_summary
    }

    /// Returns true when the run completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.outputs.exit_summary.completed
    }
}
