// crates/hallway-core/src/core/gate.rs
// ============================================================================
// Module: Hallway Gate Decisions
// Description: Per-gate verdict records produced during gate chain evaluation.
// Purpose: Capture immutable admission decisions for envelopes and audit.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! A gate decision is produced once per gate per room evaluation and is never
//! recomputed within a run. Decisions are copied verbatim into the step
//! envelope so auditors can see exactly why a room was admitted or declined.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::GateName;

// ============================================================================
// SECTION: Gate Verdict
// ============================================================================

/// Gate verdict.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    /// Room may proceed.
    Allow,
    /// Room must not proceed.
    Deny,
}

impl GateVerdict {
    /// Returns true for [`GateVerdict::Allow`].
    #[must_use]
    pub const fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

// ============================================================================
// SECTION: Gate Decision
// ============================================================================

/// Decision recorded for one gate against one room.
///
/// # Invariants
/// - `details` is gate-supplied and not interpreted by the hallway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    /// Gate that produced the decision.
    pub gate_name: GateName,
    /// Allow or deny verdict.
    pub verdict: GateVerdict,
    /// Human-readable rationale.
    pub rationale: String,
    /// Optional structured detail supplied by the gate.
    #[serde(default)]
    pub details: Option<Value>,
}

impl GateDecision {
    /// Creates an allow decision.
    #[must_use]
    pub fn allow(gate_name: GateName, rationale: impl Into<String>) -> Self {
        Self {
            gate_name,
            verdict: GateVerdict::Allow,
            rationale: rationale.into(),
            details: None,
        }
    }

    /// Creates a deny decision.
    #[must_use]
    pub fn deny(gate_name: GateName, rationale: impl Into<String>) -> Self {
        Self {
            gate_name,
            verdict: GateVerdict::Deny,
            rationale: rationale.into(),
            details: None,
        }
    }

    /// Attaches structured detail to the decision.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns true when the gate allowed the room.
    #[must_use]
    pub const fn is_allow(&self) -> bool {
        self.verdict.is_allow()
    }
}
