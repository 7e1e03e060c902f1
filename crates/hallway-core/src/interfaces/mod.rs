// crates/hallway-core/src/interfaces/mod.rs
// ============================================================================
// Module: Hallway Interfaces
// Description: Capability interfaces for gates, room executors, and event sinks.
// Purpose: Define the contract surfaces the hallway orchestrator consumes.
// Dependencies: crate::core, async-trait, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Room business logic and concrete gate decisions live outside the hallway.
//! They plug in through the traits defined here and are resolved by exact
//! name from explicit registries built at startup.
//!
//! ## Invariants
//! - Gates must be deterministic for identical inputs.
//! - Room executors report failures as [`StageError`]; the orchestrator turns
//!   them into decline data and never lets them escape a run.
//! - Event sinks must not fail the run; write errors are swallowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::GateDecision;
use crate::core::GateVerdict;
use crate::core::RoomId;
use crate::core::RunDeclineReason;
use crate::core::RunOptions;
use crate::core::SessionRef;
use crate::core::StepStatus;
use crate::core::identifiers::GateName;

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Admission check consulted before a room runs.
pub trait Gate: Send + Sync {
    /// Evaluates the gate for a room.
    fn evaluate(
        &self,
        room_id: &RoomId,
        session_ref: &SessionRef,
        payload: Option<&Value>,
    ) -> GateDecision;
}

// ============================================================================
// SECTION: Stage Executor
// ============================================================================

/// Room execution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StageError {
    /// Room logic failed.
    #[error("{0}")]
    Failed(String),
    /// Room rejected its input payload.
    #[error("invalid room input: {0}")]
    InvalidInput(String),
}

/// Room business logic executor.
#[async_trait]
pub trait StageExecutor: Send + Sync {
    /// Runs the room and returns its legacy v0.1 output.
    ///
    /// # Errors
    ///
    /// Returns [`StageError`] when the room fails.
    async fn execute(
        &self,
        room_id: &RoomId,
        session_ref: &SessionRef,
        payload: Option<&Value>,
    ) -> Result<Value, StageError>;
}

// ============================================================================
// SECTION: Event Sink
// ============================================================================

/// Per-gate verdict summary carried in events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateVerdictSummary {
    /// Gate name.
    pub gate_name: GateName,
    /// Gate verdict.
    pub verdict: GateVerdict,
}

/// Structured hallway event.
///
/// # Invariants
/// - Events never carry room payloads or room output data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HallwayEvent {
    /// Run accepted and rooms selected.
    RunStarted {
        /// Session reference at start.
        session_state_ref: SessionRef,
        /// Rooms selected for the walk, in order.
        rooms: Vec<RoomId>,
        /// Run options.
        options: RunOptions,
    },
    /// Gate chain evaluated for a room.
    GateChainEvaluated {
        /// Room identifier.
        room_id: RoomId,
        /// Aggregate verdict.
        passed: bool,
        /// Per-gate verdicts in chain order.
        verdicts: Vec<GateVerdictSummary>,
    },
    /// Room executor failed or panicked.
    StageFailed {
        /// Room identifier.
        room_id: RoomId,
        /// Failure message.
        message: String,
    },
    /// Step envelope appended to the run.
    StepRecorded {
        /// Room identifier.
        room_id: RoomId,
        /// Step status.
        status: StepStatus,
        /// Step hash.
        step_hash: String,
        /// Previous step hash.
        prev_hash: Option<String>,
    },
    /// Run finished.
    RunFinished {
        /// True when the run completed.
        completed: bool,
        /// Number of step envelopes produced.
        steps: usize,
        /// Terminal decline reason, if any.
        decline_reason: Option<RunDeclineReason>,
    },
}

/// Sink receiving hallway events.
pub trait HallwayEventSink: Send + Sync {
    /// Records an event.
    fn record(&self, event: &HallwayEvent);
}

/// Event sink that discards all events.
pub struct NoopEventSink;

impl HallwayEventSink for NoopEventSink {
    fn record(&self, _event: &HallwayEvent) {}
}
