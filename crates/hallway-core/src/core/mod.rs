// crates/hallway-core/src/core/mod.rs
// ============================================================================
// Module: Hallway Core Types
// Description: Canonical hallway contract, envelope, and report structures.
// Purpose: Provide stable, serializable types for hallway runs and audit.
// Dependencies: serde, serde_json, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Hallway core types define the contract document, run options, gate
//! decisions, v0.2 step envelopes, and the final run report. These types are
//! the canonical source of truth for the persisted JSON shape.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod contract;
pub mod envelope;
pub mod gate;
pub mod hashing;
pub mod identifiers;
pub mod options;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use contract::ContractError;
pub use contract::GateProfile;
pub use contract::HallwayContract;
pub use envelope::STEP_CONTRACT_VERSION;
pub use envelope::StepAudit;
pub use envelope::StepDecline;
pub use envelope::StepInvariants;
pub use envelope::StepResult;
pub use envelope::StepStatus;
pub use gate::GateDecision;
pub use gate::GateVerdict;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::GateName;
pub use identifiers::INVALID_SESSION_REF;
pub use identifiers::RoomId;
pub use identifiers::SessionRef;
pub use options::RunOptions;
pub use options::RunRequest;
pub use report::ExitSummary;
pub use report::HALLWAY_ROOM_ID;
pub use report::RunDecline;
pub use report::RunDeclineReason;
pub use report::RunInputs;
pub use report::RunOutputs;
pub use report::RunReport;
