// crates/hallway-core/src/runtime/mod.rs
// ============================================================================
// Module: Hallway Runtime
// Description: Orchestrator, gate chain evaluator, upcaster, and audit chain.
// Purpose: Execute hallway walks against registered gates and rooms.
// Dependencies: crate::{core, interfaces}, futures-util
// ============================================================================

//! ## Overview
//! Runtime modules implement the hallway walk and the helpers it is built
//! from. Each helper is usable on its own so contracts and audit chains can be
//! checked outside a run.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod decline;
pub mod events;
pub mod gate_chain;
pub mod orchestrator;
pub mod stages;
pub mod upcaster;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditChainError;
pub use audit::build_audit_chain;
pub use audit::verify_audit_chain;
pub use decline::DeclineSignal;
pub use decline::classify_room_output;
pub use decline::decline_signal;
pub use events::StderrEventSink;
pub use gate_chain::CoherenceGate;
pub use gate_chain::GateChainError;
pub use gate_chain::GateChainOutcome;
pub use gate_chain::GateRegistry;
pub use gate_chain::evaluate_gate_chain;
pub use orchestrator::HallwayError;
pub use orchestrator::HallwayOrchestrator;
pub use orchestrator::HallwayOrchestratorBuilder;
pub use stages::StageRegistry;
pub use stages::StageRegistryError;
pub use stages::SyncStage;
pub use upcaster::UpcastInput;
pub use upcaster::downcast;
pub use upcaster::upcast;
pub use upcaster::verify_roundtrip;
