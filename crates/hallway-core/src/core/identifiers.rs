// crates/hallway-core/src/core/identifiers.rs
// ============================================================================
// Module: Hallway Identifiers
// Description: Opaque identifiers for rooms, gates, and session references.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque strings that serialize transparently. Room and gate
//! identifiers are looked up by exact key; session references are passed
//! through the hallway untouched and only checked for emptiness when the run
//! report is assembled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Sentinel reported in place of an empty or whitespace-only session reference.
pub const INVALID_SESSION_REF: &str = "invalid-session-ref";

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Room (stage) identifier within the canonical sequence.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a new room identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Gate name used in gate profiles and registries.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateName(String);

impl GateName {
    /// Creates a new gate name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for GateName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GateName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Reference to the caller-owned session state.
///
/// # Invariants
/// - Never mutated by the hallway; only replaced when a room reports a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRef(String);

impl SessionRef {
    /// Creates a new session reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the reference is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns this reference, or the invalid sentinel when it is blank.
    #[must_use]
    pub fn or_invalid(&self) -> Self {
        if self.is_blank() { Self::new(INVALID_SESSION_REF) } else { self.clone() }
    }
}

impl fmt::Display for SessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SessionRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SessionRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
