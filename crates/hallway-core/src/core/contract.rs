// crates/hallway-core/src/core/contract.rs
// ============================================================================
// Module: Hallway Contract Configuration
// Description: Canonical room sequence, gate profile, and descriptive metadata.
// Purpose: Parse and validate the hallway contract document.
// Dependencies: crate::core::identifiers, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The hallway contract supplies the canonical room sequence, the gate
//! profile applied to every room, and descriptive metadata echoed verbatim
//! into the run report. Loading the document from disk is the caller's
//! concern; this module parses JSON text and validates the result.
//!
//! Security posture: contract text is untrusted input and is size-capped
//! before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::GateName;
use crate::core::identifiers::RoomId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted contract document size in bytes.
pub const MAX_CONTRACT_BYTES: usize = 1_048_576;

/// Default hallway title.
pub const DEFAULT_TITLE: &str = "Hallway";

/// Default hallway purpose.
pub const DEFAULT_PURPOSE: &str = "Deterministic multi-room session orchestrator";

/// Name of the built-in coherence gate.
pub const COHERENCE_GATE: &str = "coherence_gate";

/// Room sequence of the built-in contract.
const DEFAULT_SEQUENCE: [&str; 5] =
    ["entry_room", "walk_room", "memory_room", "integration_commit_room", "exit_room"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract parsing and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Contract text exceeds [`MAX_CONTRACT_BYTES`].
    #[error("contract document exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge {
        /// Maximum allowed bytes.
        limit: usize,
        /// Actual document size in bytes.
        actual: usize,
    },
    /// Contract text is not a valid contract document.
    #[error("contract parse error: {0}")]
    Parse(String),
    /// Canonical sequence contains a blank room identifier.
    #[error("sequence entry {index} is blank")]
    BlankRoom {
        /// Position in the sequence.
        index: usize,
    },
    /// Gate chain contains a blank gate name.
    #[error("gate chain entry {index} is blank")]
    BlankGate {
        /// Position in the gate chain.
        index: usize,
    },
}

// ============================================================================
// SECTION: Gate Profile
// ============================================================================

/// Gate profile applied to every room in the hallway.
///
/// # Invariants
/// - `chain` is evaluated in order for each room.
/// - `overrides` is echoed verbatim and not interpreted by the hallway.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateProfile {
    /// Ordered gate names.
    #[serde(default)]
    pub chain: Vec<GateName>,
    /// Opaque per-gate overrides.
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
}

impl GateProfile {
    /// Creates a profile with the given chain and no overrides.
    #[must_use]
    pub fn with_chain(chain: Vec<GateName>) -> Self {
        Self {
            chain,
            overrides: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: Hallway Contract
// ============================================================================

/// Hallway contract document.
///
/// # Invariants
/// - Room identifiers in `sequence` are assumed unique; duplicates are not rejected.
/// - Descriptive fields are echoed verbatim into the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HallwayContract {
    /// Display title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Purpose statement.
    #[serde(default = "default_purpose")]
    pub purpose: String,
    /// Stone alignment labels.
    #[serde(default)]
    pub stone_alignment: Vec<String>,
    /// Canonical room sequence.
    #[serde(default)]
    pub sequence: Vec<RoomId>,
    /// Whether mini walks are advertised.
    #[serde(default)]
    pub mini_walk_supported: bool,
    /// Gate profile applied to each room.
    #[serde(default)]
    pub gate_profile: GateProfile,
}

impl HallwayContract {
    /// Creates a contract with the given sequence and gate profile.
    #[must_use]
    pub fn new(sequence: Vec<RoomId>, gate_profile: GateProfile) -> Self {
        Self {
            title: default_title(),
            purpose: default_purpose(),
            stone_alignment: Vec::new(),
            sequence,
            mini_walk_supported: false,
            gate_profile,
        }
    }

    /// Returns the built-in five-room contract guarded by the coherence gate.
    #[must_use]
    pub fn default_contract() -> Self {
        let sequence = DEFAULT_SEQUENCE.iter().copied().map(RoomId::from).collect();
        let mut contract =
            Self::new(sequence, GateProfile::with_chain(vec![GateName::from(COHERENCE_GATE)]));
        contract.mini_walk_supported = true;
        contract
    }

    /// Parses and validates a contract from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the text is oversized, malformed, or invalid.
    pub fn from_json_str(text: &str) -> Result<Self, ContractError> {
        if text.len() > MAX_CONTRACT_BYTES {
            return Err(ContractError::TooLarge {
                limit: MAX_CONTRACT_BYTES,
                actual: text.len(),
            });
        }
        let contract: Self =
            serde_json::from_str(text).map_err(|err| ContractError::Parse(err.to_string()))?;
        contract.validate()?;
        Ok(contract)
    }

    /// Validates identifier well-formedness.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when a room or gate identifier is blank.
    pub fn validate(&self) -> Result<(), ContractError> {
        if let Some(index) = self.sequence.iter().position(|room| room.as_str().trim().is_empty())
        {
            return Err(ContractError::BlankRoom {
                index,
            });
        }
        if let Some(index) =
            self.gate_profile.chain.iter().position(|gate| gate.as_str().trim().is_empty())
        {
            return Err(ContractError::BlankGate {
                index,
            });
        }
        Ok(())
    }

    /// Returns true when the room is part of the canonical sequence.
    #[must_use]
    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.sequence.contains(room_id)
    }
}

impl Default for HallwayContract {
    fn default() -> Self {
        Self::default_contract()
    }
}

/// Serde default for [`HallwayContract::title`].
fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// Serde default for [`HallwayContract::purpose`].
fn default_purpose() -> String {
    DEFAULT_PURPOSE.to_string()
}
