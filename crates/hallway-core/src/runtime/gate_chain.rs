// crates/hallway-core/src/runtime/gate_chain.rs
// ============================================================================
// Module: Hallway Gate Chain Evaluation
// Description: Gate registry, default coherence gate, and chain evaluator.
// Purpose: Derive a single pass/fail verdict plus per-gate decision records.
// Dependencies: crate::{core, interfaces}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A gate chain is an ordered list of gate names resolved against a
//! [`GateRegistry`]. Every gate in the chain is consulted and recorded, even
//! after a deny; only the aggregate verdict drives the walk. A chain passes iff
//! every gate allows, so an empty chain always passes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::core::GateDecision;
use crate::core::GateName;
use crate::core::RoomId;
use crate::core::SessionRef;
use crate::core::contract::COHERENCE_GATE;
use crate::interfaces::Gate;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gate chain configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum GateChainError {
    /// Chain names a gate that is not registered.
    #[error("gate not registered: {0}")]
    UnknownGate(GateName),
    /// Gate name is registered twice.
    #[error("gate already registered: {0}")]
    DuplicateGate(GateName),
}

// ============================================================================
// SECTION: Coherence Gate
// ============================================================================

/// Default gate used when the caller supplies no gate registry.
///
/// # Invariants
/// - Denies only when the session reference is blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoherenceGate;

impl Gate for CoherenceGate {
    fn evaluate(
        &self,
        room_id: &RoomId,
        session_ref: &SessionRef,
        _payload: Option<&Value>,
    ) -> GateDecision {
        let name = GateName::from(COHERENCE_GATE);
        if session_ref.is_blank() {
            return GateDecision::deny(name, "session reference is blank")
                .with_details(json!({ "room_id": room_id }));
        }
        GateDecision::allow(name, "session reference is coherent")
    }
}

// ============================================================================
// SECTION: Gate Registry
// ============================================================================

/// Registry resolving gate names to implementations.
///
/// # Invariants
/// - Gate names are unique within the registry.
/// - Lookups are exact-key; absence is reported, never skipped.
pub struct GateRegistry {
    /// Gate implementations keyed by name.
    gates: BTreeMap<GateName, Box<dyn Gate>>,
}

impl GateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            gates: BTreeMap::new(),
        }
    }

    /// Registers a gate under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`GateChainError::DuplicateGate`] when the name is already registered.
    pub fn register(
        &mut self,
        name: impl Into<GateName>,
        gate: impl Gate + 'static,
    ) -> Result<(), GateChainError> {
        let name = name.into();
        if self.gates.contains_key(&name) {
            return Err(GateChainError::DuplicateGate(name));
        }
        self.gates.insert(name, Box::new(gate));
        Ok(())
    }

    /// Registers a gate, consuming and returning the registry.
    ///
    /// # Errors
    ///
    /// Returns [`GateChainError::DuplicateGate`] when the name is already registered.
    pub fn with_gate(
        mut self,
        name: impl Into<GateName>,
        gate: impl Gate + 'static,
    ) -> Result<Self, GateChainError> {
        self.register(name, gate)?;
        Ok(self)
    }

    /// Returns the gate registered under `name`.
    #[must_use]
    pub fn get(&self, name: &GateName) -> Option<&dyn Gate> {
        self.gates.get(name).map(|gate| &**gate)
    }

    /// Returns true when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &GateName) -> bool {
        self.gates.contains_key(name)
    }

    /// Checks that every gate in `chain` is registered.
    ///
    /// # Errors
    ///
    /// Returns [`GateChainError::UnknownGate`] for the first missing gate.
    pub fn ensure_chain(&self, chain: &[GateName]) -> Result<(), GateChainError> {
        match chain.iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(GateChainError::UnknownGate(missing.clone())),
            None => Ok(()),
        }
    }
}

impl Default for GateRegistry {
    fn default() -> Self {
        let mut gates: BTreeMap<GateName, Box<dyn Gate>> = BTreeMap::new();
        gates.insert(GateName::from(COHERENCE_GATE), Box::new(CoherenceGate));
        Self {
            gates,
        }
    }
}

// ============================================================================
// SECTION: Chain Evaluation
// ============================================================================

/// Result of evaluating a gate chain against one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateChainOutcome {
    /// Decisions in chain order, one per gate.
    pub decisions: Vec<GateDecision>,
    /// True iff every gate allowed.
    pub passed: bool,
}

/// Evaluates every gate in `chain` against a room.
///
/// # Errors
///
/// Returns [`GateChainError::UnknownGate`] when a chain entry is not registered;
/// no gate is consulted in that case.
pub fn evaluate_gate_chain(
    chain: &[GateName],
    room_id: &RoomId,
    session_ref: &SessionRef,
    payload: Option<&Value>,
    registry: &GateRegistry,
) -> Result<GateChainOutcome, GateChainError> {
    let gates = chain
        .iter()
        .map(|name| registry.get(name).ok_or_else(|| GateChainError::UnknownGate(name.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    let decisions: Vec<GateDecision> =
        gates.into_iter().map(|gate| gate.evaluate(room_id, session_ref, payload)).collect();
    let passed = decisions.iter().all(GateDecision::is_allow);
    Ok(GateChainOutcome {
        decisions,
        passed,
    })
}
