// crates/hallway-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Hallway Orchestrator
// Description: Room selection, gate enforcement, and hash-chained step logging.
// Purpose: Walk the canonical room sequence and certify the walk.
// Dependencies: crate::{core, interfaces, runtime}, futures-util, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The orchestrator is the single execution path for a hallway walk. For each
//! selected room it evaluates the gate chain, runs the room (or records a
//! dry-run marker), classifies the output, upcasts it into a v0.2 envelope
//! linked to the previous step hash, and decides whether to continue.
//!
//! ## Invariants
//! - Rooms run strictly one at a time; a room's hash is chained before the
//!   next room starts.
//! - Only configuration and serialization errors escape [`HallwayOrchestrator::run`];
//!   gate denials and room failures become decline envelopes.
//! - Every envelope produced is hashed, including declines.
//! - Gates and rooms always see the caller's session reference; a reference
//!   handed back by a room only becomes the report's `final_state_ref`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::core::ContractError;
use crate::core::ExitSummary;
use crate::core::GateDecision;
use crate::core::HALLWAY_ROOM_ID;
use crate::core::HallwayContract;
use crate::core::RoomId;
use crate::core::RunDecline;
use crate::core::RunDeclineReason;
use crate::core::RunInputs;
use crate::core::RunOptions;
use crate::core::RunOutputs;
use crate::core::RunReport;
use crate::core::RunRequest;
use crate::core::STEP_CONTRACT_VERSION;
use crate::core::SessionRef;
use crate::core::StepResult;
use crate::core::StepStatus;
use crate::core::hashing::HashError;
use crate::interfaces::GateVerdictSummary;
use crate::interfaces::HallwayEvent;
use crate::interfaces::HallwayEventSink;
use crate::interfaces::NoopEventSink;
use crate::interfaces::StageExecutor;
use crate::runtime::audit::build_audit_chain;
use crate::runtime::decline::classify_room_output;
use crate::runtime::gate_chain::GateChainError;
use crate::runtime::gate_chain::GateChainOutcome;
use crate::runtime::gate_chain::GateRegistry;
use crate::runtime::gate_chain::evaluate_gate_chain;
use crate::runtime::stages::StageRegistry;
use crate::runtime::upcaster::UpcastInput;
use crate::runtime::upcaster::upcast;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Error text recorded as room data when the gate chain denies a room.
pub const GATE_CHAIN_FAILED_ERROR: &str = "Gate chain evaluation failed";

/// Output key through which a room hands back a new session reference.
pub const SESSION_STATE_REF_KEY: &str = "session_state_ref";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a hallway run.
///
/// # Invariants
/// - Raised before any room runs, except [`HallwayError::Hash`].
#[derive(Debug, Error)]
pub enum HallwayError {
    /// Requested subset names a room outside the canonical sequence.
    #[error("room '{0}' not found in canonical sequence")]
    UnknownRoom(RoomId),
    /// Room must execute but has no registered executor.
    #[error("no executor registered for room '{0}'")]
    MissingExecutor(RoomId),
    /// Gate profile does not resolve against the gate registry.
    #[error(transparent)]
    GateChain(#[from] GateChainError),
    /// Contract failed validation.
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Room output could not be canonicalized.
    #[error(transparent)]
    Hash(#[from] HashError),
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for a [`HallwayOrchestrator`].
///
/// # Invariants
/// - Gates default to [`GateRegistry::default`] (coherence gate only).
/// - Events default to [`NoopEventSink`].
pub struct HallwayOrchestratorBuilder {
    /// Hallway contract.
    contract: HallwayContract,
    /// Gate registry.
    gates: GateRegistry,
    /// Room executors.
    stages: StageRegistry,
    /// Event sink.
    events: Arc<dyn HallwayEventSink>,
}

impl HallwayOrchestratorBuilder {
    /// Replaces the gate registry.
    #[must_use]
    pub fn gates(mut self, gates: GateRegistry) -> Self {
        self.gates = gates;
        self
    }

    /// Replaces the room executor registry.
    #[must_use]
    pub fn stages(mut self, stages: StageRegistry) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn events(mut self, events: impl HallwayEventSink + 'static) -> Self {
        self.events = Arc::new(events);
        self
    }

    /// Sets a shared event sink.
    #[must_use]
    pub fn shared_events(mut self, events: Arc<dyn HallwayEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Validates the configuration and builds the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`HallwayError`] when the contract is invalid or the gate chain
    /// names an unregistered gate.
    pub fn build(self) -> Result<HallwayOrchestrator, HallwayError> {
        self.contract.validate()?;
        self.gates.ensure_chain(&self.contract.gate_profile.chain)?;
        Ok(HallwayOrchestrator {
            contract: self.contract,
            gates: self.gates,
            stages: self.stages,
            events: self.events,
        })
    }
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Hallway orchestrator.
pub struct HallwayOrchestrator {
    /// Hallway contract.
    contract: HallwayContract,
    /// Gate registry.
    gates: GateRegistry,
    /// Room executors.
    stages: StageRegistry,
    /// Event sink.
    events: Arc<dyn HallwayEventSink>,
}

impl HallwayOrchestrator {
    /// Returns a builder for the given contract.
    #[must_use]
    pub fn builder(contract: HallwayContract) -> HallwayOrchestratorBuilder {
        HallwayOrchestratorBuilder {
            contract,
            gates: GateRegistry::default(),
            stages: StageRegistry::new(),
            events: Arc::new(NoopEventSink),
        }
    }

    /// Returns the hallway contract.
    #[must_use]
    pub const fn contract(&self) -> &HallwayContract {
        &self.contract
    }

    /// Selects the rooms a run will visit, in order.
    ///
    /// # Errors
    ///
    /// Returns [`HallwayError::UnknownRoom`] when the subset names a room
    /// outside the canonical sequence.
    pub fn select_rooms(&self, options: &RunOptions) -> Result<Vec<RoomId>, HallwayError> {
        if !options.rooms_subset.is_empty() {
            if let Some(unknown) =
                options.rooms_subset.iter().find(|room| !self.contract.contains_room(room))
            {
                return Err(HallwayError::UnknownRoom(unknown.clone()));
            }
            return Ok(options.rooms_subset.clone());
        }
        if options.mini_walk
            && let [first, .., last] = self.contract.sequence.as_slice()
        {
            return Ok(vec![first.clone(), last.clone()]);
        }
        Ok(self.contract.sequence.clone())
    }

    /// Walks the selected rooms and returns the run report.
    ///
    /// # Errors
    ///
    /// Returns [`HallwayError`] for configuration errors (raised before any
    /// gate is evaluated) and for room output that cannot be canonicalized.
    pub async fn run(&self, request: RunRequest) -> Result<RunReport, HallwayError> {
        let rooms = self.select_rooms(&request.options)?;
        let plan = self.plan_rooms(rooms, request.options.dry_run)?;

        self.events.record(&HallwayEvent::RunStarted {
            session_state_ref: request.session_state_ref.clone(),
            rooms: plan.iter().map(|room| room.room_id.clone()).collect(),
            options: request.options.clone(),
        });

        let mut walk = Walk::new(request.session_state_ref.clone());
        let mut decline = None;
        for room in &plan {
            if let RoomOutcome::Stop(run_decline) =
                self.visit_room(room, &request, &mut walk).await?
            {
                decline = Some(run_decline);
                break;
            }
        }
        Ok(self.finish(request, walk, decline))
    }

    /// Resolves an executor for every selected room.
    ///
    /// Dry runs resolve nothing; otherwise a room without an executor is a
    /// configuration error raised before any gate runs.
    fn plan_rooms(
        &self,
        rooms: Vec<RoomId>,
        dry_run: bool,
    ) -> Result<Vec<PlannedRoom>, HallwayError> {
        rooms
            .into_iter()
            .map(|room_id| -> Result<PlannedRoom, HallwayError> {
                let executor = if dry_run {
                    None
                } else {
                    let executor = self
                        .stages
                        .get(&room_id)
                        .ok_or_else(|| HallwayError::MissingExecutor(room_id.clone()))?;
                    Some(executor)
                };
                Ok(PlannedRoom {
                    room_id,
                    executor,
                })
            })
            .collect()
    }

    /// Runs one room through gates, execution, and hashing.
    async fn visit_room(
        &self,
        room: &PlannedRoom,
        request: &RunRequest,
        walk: &mut Walk,
    ) -> Result<RoomOutcome, HallwayError> {
        let room_id = &room.room_id;
        let session_ref = &request.session_state_ref;
        let payload = request.payload_for(room_id);
        let stop_on_decline = request.options.stop_on_decline;

        let chain = evaluate_gate_chain(
            &self.contract.gate_profile.chain,
            room_id,
            session_ref,
            payload,
            &self.gates,
        )?;
        self.record_chain(room_id, &chain);

        if !chain.passed {
            let decisions = decisions_value(&chain.decisions)?;
            let data = json!({
                "error": GATE_CHAIN_FAILED_ERROR,
                "gate_decisions": decisions.clone(),
            });
            self.append_step(walk, room_id, data, StepStatus::Decline, chain.decisions)?;
            if stop_on_decline {
                return Ok(RoomOutcome::Stop(RunDecline {
                    reason: RunDeclineReason::GateChainFailed,
                    message: format!("Gate chain evaluation failed for room {room_id}"),
                    details: json!({
                        "room_id": room_id.as_str(),
                        "gate_decisions": decisions,
                    }),
                }));
            }
            return Ok(RoomOutcome::Continue);
        }

        let Some(executor) = room.executor.as_deref() else {
            let data = json!({ "dry_run": true, "room_id": room_id.as_str() });
            self.append_step(walk, room_id, data, StepStatus::Ok, chain.decisions)?;
            return Ok(RoomOutcome::Continue);
        };

        let output = self.execute_room(executor, room_id, session_ref, payload).await;
        let status = classify_room_output(&output);
        self.append_step(walk, room_id, output.clone(), status, chain.decisions)?;

        if let Some(next_ref) = output.get(SESSION_STATE_REF_KEY).and_then(Value::as_str) {
            walk.session_ref = SessionRef::new(next_ref);
        }

        if status.is_decline() && stop_on_decline {
            return Ok(RoomOutcome::Stop(RunDecline {
                reason: RunDeclineReason::RoomDeclined,
                message: format!("Room {room_id} declined to proceed"),
                details: json!({
                    "room_id": room_id.as_str(),
                    "room_output": output,
                }),
            }));
        }
        Ok(RoomOutcome::Continue)
    }

    /// Runs the room executor, converting errors and panics into decline data.
    async fn execute_room(
        &self,
        executor: &dyn StageExecutor,
        room_id: &RoomId,
        session_ref: &SessionRef,
        payload: Option<&Value>,
    ) -> Value {
        let result =
            AssertUnwindSafe(executor.execute(room_id, session_ref, payload)).catch_unwind().await;
        let message = match result {
            Ok(Ok(output)) => return output,
            Ok(Err(err)) => err.to_string(),
            Err(panic) => panic_message(&*panic),
        };
        self.events.record(&HallwayEvent::StageFailed {
            room_id: room_id.clone(),
            message: message.clone(),
        });
        json!({
            "error": format!("Room execution failed: {message}"),
            "room_id": room_id.as_str(),
        })
    }

    /// Upcasts room data onto the walk and advances the chain pointer.
    fn append_step(
        &self,
        walk: &mut Walk,
        room_id: &RoomId,
        data: Value,
        status: StepStatus,
        decisions: Vec<GateDecision>,
    ) -> Result<(), HallwayError> {
        let step = upcast(
            UpcastInput::new(room_id.clone(), data, status)
                .gate_decisions(decisions)
                .prev_hash(walk.last_hash.clone()),
        )?;
        self.events.record(&HallwayEvent::StepRecorded {
            room_id: room_id.clone(),
            status,
            step_hash: step.audit.step_hash.clone(),
            prev_hash: step.audit.prev_hash.clone(),
        });
        walk.last_hash = Some(step.audit.step_hash.clone());
        walk.steps.push(step);
        Ok(())
    }

    /// Records the gate chain outcome for a room.
    fn record_chain(&self, room_id: &RoomId, chain: &GateChainOutcome) {
        self.events.record(&HallwayEvent::GateChainEvaluated {
            room_id: room_id.clone(),
            passed: chain.passed,
            verdicts: chain
                .decisions
                .iter()
                .map(|decision| GateVerdictSummary {
                    gate_name: decision.gate_name.clone(),
                    verdict: decision.verdict,
                })
                .collect(),
        });
    }

    /// Assembles the run report at the single return point of a run.
    fn finish(&self, request: RunRequest, walk: Walk, decline: Option<RunDecline>) -> RunReport {
        let exit_summary = ExitSummary {
            completed: decline.is_none(),
            auditable_hash_chain: build_audit_chain(&walk.steps),
            decline,
        };
        self.events.record(&HallwayEvent::RunFinished {
            completed: exit_summary.completed,
            steps: walk.steps.len(),
            decline_reason: exit_summary.decline.as_ref().map(|decline| decline.reason),
        });

        RunReport {
            contract_version: STEP_CONTRACT_VERSION.to_string(),
            room_id: HALLWAY_ROOM_ID.to_string(),
            title: self.contract.title.clone(),
            purpose: self.contract.purpose.clone(),
            stone_alignment: self.contract.stone_alignment.clone(),
            sequence: self.contract.sequence.clone(),
            mini_walk_supported: self.contract.mini_walk_supported,
            gate_profile: self.contract.gate_profile.clone(),
            inputs: RunInputs {
                session_state_ref: request.session_state_ref.or_invalid(),
                payloads: request.payloads,
                options: request.options,
            },
            outputs: RunOutputs {
                contract_version: STEP_CONTRACT_VERSION.to_string(),
                steps: walk.steps,
                final_state_ref: walk.session_ref.or_invalid(),
                exit_summary,
            },
        }
    }
}

// ============================================================================
// SECTION: Walk State
// ============================================================================

/// Mutable state owned by a single run.
struct Walk {
    /// Envelopes produced so far.
    steps: Vec<StepResult>,
    /// Step hash of the last envelope.
    last_hash: Option<String>,
    /// Latest session reference handed back by a room.
    session_ref: SessionRef,
}

impl Walk {
    /// Starts a walk from the caller's session reference.
    const fn new(session_ref: SessionRef) -> Self {
        Self {
            steps: Vec::new(),
            last_hash: None,
            session_ref,
        }
    }
}

/// Selected room paired with its resolved executor.
struct PlannedRoom {
    /// Room identifier.
    room_id: RoomId,
    /// Executor for the room; `None` in dry runs.
    executor: Option<Arc<dyn StageExecutor>>,
}

/// Whether the walk continues after a room.
enum RoomOutcome {
    /// Proceed to the next room.
    Continue,
    /// Stop with a terminal decline.
    Stop(RunDecline),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes gate decisions for embedding in decline data.
fn decisions_value(decisions: &[GateDecision]) -> Result<Value, HashError> {
    serde_json::to_value(decisions).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Extracts a readable message from a panic payload.
fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = panic.downcast_ref::<String>() {
        return message.clone();
    }
    "room panicked".to_string()
}
