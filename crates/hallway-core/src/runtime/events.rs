// crates/hallway-core/src/runtime/events.rs
// ============================================================================
// Module: Hallway Event Sinks
// Description: JSON-lines event sink for hallway runs.
// Purpose: Emit structured run events without binding to a logging backend.
// Dependencies: crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! [`StderrEventSink`] writes one JSON object per event to stderr. Deployments
//! that need a different backend implement
//! [`HallwayEventSink`](crate::interfaces::HallwayEventSink) directly.

use std::io::Write;

use crate::interfaces::HallwayEvent;
use crate::interfaces::HallwayEventSink;

/// Event sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl HallwayEventSink for StderrEventSink {
    fn record(&self, event: &HallwayEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}
