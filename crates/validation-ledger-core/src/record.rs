// crates/validation-ledger-core/src/record.rs
// ============================================================================
// Module: Validation Result Record
// Description: Wire shape of the validation result document.
// Purpose: Serialize validation outcomes with stable field names.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The result document written at the validation leaf carries four fields:
//! `validated` (freshness timestamp string), `errorTree` (the validator's
//! hierarchical error report), `attributes` (the message's routing metadata),
//! and `message` (the validated payload). The sink treats `errorTree` and
//! `message` as opaque JSON values and stores them as-is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field name carrying the freshness timestamp on every hierarchy level.
pub const VALIDATED_FIELD: &str = "validated";
/// Attribute key carrying the registry identifier in message metadata.
pub const DEVICE_REGISTRY_ID_ATTRIBUTE: &str = "deviceRegistryId";

// ============================================================================
// SECTION: Record Types
// ============================================================================

/// Routing metadata attached to a validated message.
pub type AttributeMap = BTreeMap<String, String>;

/// Full contents of a validation result document.
///
/// # Invariants
/// - `validated` is a canonical timestamp string (see `crate::time`).
/// - `error_tree` and `message` are stored verbatim; the ledger never
///   interprets them.
/// - Written with full-replace semantics; prior leaf contents do not survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Freshness timestamp for this validation event.
    pub validated: String,
    /// Hierarchical error report produced by validation, opaque to the ledger.
    #[serde(rename = "errorTree")]
    pub error_tree: Value,
    /// Routing metadata from the validated message.
    pub attributes: AttributeMap,
    /// The validated payload, opaque to the ledger.
    pub message: Value,
}
