// crates/hallway-core/src/runtime/stages.rs
// ============================================================================
// Module: Hallway Stage Registry
// Description: Registry of room executors and a synchronous executor adapter.
// Purpose: Resolve room identifiers to business logic by exact key.
// Dependencies: crate::{core, interfaces}, async-trait, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Rooms are registered once at startup. The orchestrator looks them up by
//! exact room identifier; a room that must execute but has no registered
//! executor is a configuration error, not a silent skip.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::core::RoomId;
use crate::core::SessionRef;
use crate::interfaces::StageError;
use crate::interfaces::StageExecutor;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Stage registry errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StageRegistryError {
    /// Room identifier is registered twice.
    #[error("room already registered: {0}")]
    DuplicateRoom(RoomId),
}

// ============================================================================
// SECTION: Stage Registry
// ============================================================================

/// Registry resolving room identifiers to executors.
///
/// # Invariants
/// - Room identifiers are unique within the registry.
#[derive(Default, Clone)]
pub struct StageRegistry {
    /// Executors keyed by room identifier.
    stages: BTreeMap<RoomId, Arc<dyn StageExecutor>>,
}

impl StageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an executor for a room.
    ///
    /// # Errors
    ///
    /// Returns [`StageRegistryError::DuplicateRoom`] when the room is already registered.
    pub fn register(
        &mut self,
        room_id: impl Into<RoomId>,
        executor: impl StageExecutor + 'static,
    ) -> Result<(), StageRegistryError> {
        let room_id = room_id.into();
        if self.stages.contains_key(&room_id) {
            return Err(StageRegistryError::DuplicateRoom(room_id));
        }
        self.stages.insert(room_id, Arc::new(executor));
        Ok(())
    }

    /// Registers an executor, consuming and returning the registry.
    ///
    /// # Errors
    ///
    /// Returns [`StageRegistryError::DuplicateRoom`] when the room is already registered.
    pub fn with_stage(
        mut self,
        room_id: impl Into<RoomId>,
        executor: impl StageExecutor + 'static,
    ) -> Result<Self, StageRegistryError> {
        self.register(room_id, executor)?;
        Ok(self)
    }

    /// Returns the executor registered for a room.
    #[must_use]
    pub fn get(&self, room_id: &RoomId) -> Option<Arc<dyn StageExecutor>> {
        self.stages.get(room_id).map(Arc::clone)
    }

    /// Returns true when the room has an executor.
    #[must_use]
    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.stages.contains_key(room_id)
    }
}

// ============================================================================
// SECTION: Synchronous Adapter
// ============================================================================

/// Adapts a synchronous closure into a [`StageExecutor`].
pub struct SyncStage<F> {
    /// Wrapped room logic.
    run: F,
}

impl<F> SyncStage<F>
where
    F: Fn(&RoomId, &SessionRef, Option<&Value>) -> Result<Value, StageError> + Send + Sync,
{
    /// Wraps a synchronous room function.
    #[must_use]
    pub const fn new(run: F) -> Self {
        Self {
            run,
        }
    }
}

#[async_trait]
impl<F> StageExecutor for SyncStage<F>
where
    F: Fn(&RoomId, &SessionRef, Option<&Value>) -> Result<Value, StageError> + Send + Sync,
{
    async fn execute(
        &self,
        room_id: &RoomId,
        session_ref: &SessionRef,
        payload: Option<&Value>,
    ) -> Result<Value, StageError> {
        (self.run)(room_id, session_ref, payload)
    }
}
