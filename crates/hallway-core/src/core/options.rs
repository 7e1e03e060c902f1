// crates/hallway-core/src/core/options.rs
// ============================================================================
// Module: Hallway Run Options
// Description: Per-run options and the run request container.
// Purpose: Select rooms and decline policy for a single hallway walk.
// Dependencies: crate::core::identifiers, serde, serde_json
// ============================================================================

//! ## Overview
//! Run options control which rooms a walk visits and how declines are
//! handled. Room selection precedence is: explicit `rooms_subset`, then
//! `mini_walk`, then the full canonical sequence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::RoomId;
use crate::core::identifiers::SessionRef;

// ============================================================================
// SECTION: Run Options
// ============================================================================

/// Options for a single hallway run.
///
/// # Invariants
/// - Every `rooms_subset` entry must belong to the canonical sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunOptions {
    /// Halt at the first declined step.
    pub stop_on_decline: bool,
    /// Skip room execution and record a dry-run marker output instead.
    pub dry_run: bool,
    /// Visit only the first and last room of the sequence.
    pub mini_walk: bool,
    /// Explicit ordered room selection; empty means no subset.
    pub rooms_subset: Vec<RoomId>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            stop_on_decline: true,
            dry_run: false,
            mini_walk: false,
            rooms_subset: Vec::new(),
        }
    }
}

impl RunOptions {
    /// Sets the stop-on-decline policy.
    #[must_use]
    pub const fn stop_on_decline(mut self, stop: bool) -> Self {
        self.stop_on_decline = stop;
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables the mini walk.
    #[must_use]
    pub const fn mini_walk(mut self, mini_walk: bool) -> Self {
        self.mini_walk = mini_walk;
        self
    }

    /// Restricts the walk to an explicit ordered room subset.
    #[must_use]
    pub fn rooms_subset(mut self, rooms: Vec<RoomId>) -> Self {
        self.rooms_subset = rooms;
        self
    }
}

// ============================================================================
// SECTION: Run Request
// ============================================================================

/// Inputs for a single hallway run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Session reference at the start of the walk.
    pub session_state_ref: SessionRef,
    /// Optional per-room payloads keyed by room identifier.
    #[serde(default)]
    pub payloads: BTreeMap<RoomId, Value>,
    /// Run options.
    #[serde(default)]
    pub options: RunOptions,
}

impl RunRequest {
    /// Creates a request with default options and no payloads.
    #[must_use]
    pub fn new(session_state_ref: impl Into<SessionRef>) -> Self {
        Self {
            session_state_ref: session_state_ref.into(),
            payloads: BTreeMap::new(),
            options: RunOptions::default(),
        }
    }

    /// Attaches a payload for one room.
    #[must_use]
    pub fn with_payload(mut self, room_id: impl Into<RoomId>, payload: Value) -> Self {
        self.payloads.insert(room_id.into(), payload);
        self
    }

    /// Replaces the run options.
    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the payload for a room, if any.
    #[must_use]
    pub fn payload_for(&self, room_id: &RoomId) -> Option<&Value> {
        self.payloads.get(room_id)
    }
}
