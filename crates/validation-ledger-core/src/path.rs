// crates/validation-ledger-core/src/path.rs
// ============================================================================
// Module: Validation Ledger Document Paths
// Description: Hierarchical document keys for registries, devices, and validations.
// Purpose: Derive store paths deterministically from typed identifiers.
// Dependencies: crate::identifiers, serde
// ============================================================================

//! ## Overview
//! Documents live at three levels of one hierarchy:
//! `registries/{registry}`, `registries/{registry}/devices/{device}`, and
//! `registries/{registry}/devices/{device}/validations/{schema}`. This module
//! derives those keys from typed identifiers so callers cannot mix levels.
//! Invariants:
//! - Collection names are fixed constants; the hierarchy shape never varies.
//! - Paths are pure functions of their identifiers, with no I/O.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::DeviceId;
use crate::identifiers::RegistryId;
use crate::identifiers::SchemaId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Top-level collection holding one document per registry.
pub const REGISTRIES_COLLECTION: &str = "registries";
/// Per-registry collection holding one document per device.
pub const DEVICES_COLLECTION: &str = "devices";
/// Per-device collection holding one result document per schema.
pub const VALIDATIONS_COLLECTION: &str = "validations";

// ============================================================================
// SECTION: Document Path
// ============================================================================

/// Slash-joined hierarchical key addressing one document in the store.
///
/// # Invariants
/// - Always alternates collection and document segments, starting at
///   [`REGISTRIES_COLLECTION`].
/// - Constructed only through the level-specific constructors below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Returns the path of the registry document.
    #[must_use]
    pub fn registry(registry_id: &RegistryId) -> Self {
        Self(format!("{REGISTRIES_COLLECTION}/{registry_id}"))
    }

    /// Returns the path of the device document nested under its registry.
    #[must_use]
    pub fn device(registry_id: &RegistryId, device_id: &DeviceId) -> Self {
        Self(format!(
            "{REGISTRIES_COLLECTION}/{registry_id}/{DEVICES_COLLECTION}/{device_id}"
        ))
    }

    /// Returns the path of the validation result document for one schema.
    #[must_use]
    pub fn validation(
        registry_id: &RegistryId,
        device_id: &DeviceId,
        schema_id: &SchemaId,
    ) -> Self {
        Self(format!(
            "{REGISTRIES_COLLECTION}/{registry_id}/{DEVICES_COLLECTION}/{device_id}/{VALIDATIONS_COLLECTION}/{schema_id}"
        ))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
