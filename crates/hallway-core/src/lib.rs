// crates/hallway-core/src/lib.rs
// ============================================================================
// Module: Hallway Core Library
// Description: Public API surface for the hallway orchestrator.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Hallway core walks a fixed, ordered sequence of rooms against a shared
//! session reference. Each room is admitted by a gate chain, its output is
//! wrapped in a v0.2 step envelope, and every envelope is linked into a
//! hash chain so the walk can be audited after the fact.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interfaces::Gate;
pub use interfaces::GateVerdictSummary;
pub use interfaces::HallwayEvent;
pub use interfaces::HallwayEventSink;
pub use interfaces::NoopEventSink;
pub use interfaces::StageError;
pub use interfaces::StageExecutor;
pub use runtime::AuditChainError;
pub use runtime::CoherenceGate;
pub use runtime::GateChainError;
pub use runtime::GateChainOutcome;
pub use runtime::GateRegistry;
pub use runtime::HallwayError;
pub use runtime::HallwayOrchestrator;
pub use runtime::HallwayOrchestratorBuilder;
pub use runtime::StageRegistry;
pub use runtime::StageRegistryError;
pub use runtime::StderrEventSink;
pub use runtime::SyncStage;
pub use runtime::UpcastInput;
