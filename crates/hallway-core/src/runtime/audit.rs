// crates/hallway-core/src/runtime/audit.rs
// ============================================================================
// Module: Hallway Audit Chain
// Description: Hash-chain projection and consumer-side verification.
// Purpose: Expose the run's tamper-evident trail of step hashes.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The audit chain is derived, never stored: it is the ordered list of
//! `audit.step_hash` values across a run's envelopes. Building it performs no
//! verification; the orchestrator guarantees linkage by always threading the
//! running previous hash. Consumers that receive a report from elsewhere can
//! call [`verify_audit_chain`] to check linkage and recompute each hash.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::StepResult;
use crate::core::hashing::HashError;
use crate::core::hashing::compute_step_hash;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Audit chain verification failures.
///
/// # Invariants
/// - `index` is the zero-based position of the offending step.
#[derive(Debug, Error)]
pub enum AuditChainError {
    /// `prev_hash` does not match the preceding step hash.
    #[error("broken link at step {index}: expected prev_hash {expected:?}, found {actual:?}")]
    BrokenLink {
        /// Step position.
        index: usize,
        /// Expected previous hash.
        expected: Option<String>,
        /// Recorded previous hash.
        actual: Option<String>,
    },
    /// Recorded step hash does not match the recomputed hash of `data`.
    #[error("step hash mismatch at step {index}: recorded {recorded}, computed {computed}")]
    HashMismatch {
        /// Step position.
        index: usize,
        /// Hash recorded in the envelope.
        recorded: String,
        /// Hash recomputed from `data`.
        computed: String,
    },
    /// Step data could not be canonicalized.
    #[error(transparent)]
    Hash(#[from] HashError),
}

// ============================================================================
// SECTION: Chain Helpers
// ============================================================================

/// Collects step hashes in run order.
#[must_use]
pub fn build_audit_chain(steps: &[StepResult]) -> Vec<String> {
    steps.iter().map(|step| step.audit.step_hash.clone()).collect()
}

/// Verifies linkage and step hashes for a sequence of envelopes.
///
/// # Errors
///
/// Returns [`AuditChainError`] describing the first inconsistency found.
pub fn verify_audit_chain(steps: &[StepResult]) -> Result<(), AuditChainError> {
    let mut expected_prev: Option<&str> = None;
    for (index, step) in steps.iter().enumerate() {
        if step.audit.prev_hash.as_deref() != expected_prev {
            return Err(AuditChainError::BrokenLink {
                index,
                expected: expected_prev.map(str::to_string),
                actual: step.audit.prev_hash.clone(),
            });
        }
        let computed = compute_step_hash(&step.data)?;
        if computed != step.audit.step_hash {
            return Err(AuditChainError::HashMismatch {
                index,
                recorded: step.audit.step_hash.clone(),
                computed,
            });
        }
        expected_prev = Some(step.audit.step_hash.as_str());
    }
    Ok(())
}
