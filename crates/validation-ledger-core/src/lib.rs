// crates/validation-ledger-core/src/lib.rs
// ============================================================================
// Module: Validation Ledger Core Library
// Description: Identifiers, document paths, record shapes, and store contracts.
// Purpose: Define the backend-agnostic model shared by ledger sinks and stores.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Validation Ledger Core defines the data model for recording telemetry
//! validation outcomes in a hierarchical document store
//! (`registries/{registry}/devices/{device}/validations/{schema}`) together
//! with the [`DocumentStore`] contract that concrete backends implement.
//! Invariants:
//! - Identifiers are opaque strings; emptiness is rejected at the sink
//!   boundary, not by these types.
//! - `validated` timestamps are UTC ISO-8601 with millisecond precision and a
//!   trailing `Z` designator.
//! - Store implementations must fail closed: no partial success is reported
//!   as success.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod path;
pub mod record;
pub mod store;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::DeviceId;
pub use identifiers::ProjectId;
pub use identifiers::RegistryId;
pub use identifiers::SchemaId;
pub use path::DEVICES_COLLECTION;
pub use path::DocumentPath;
pub use path::REGISTRIES_COLLECTION;
pub use path::VALIDATIONS_COLLECTION;
pub use record::AttributeMap;
pub use record::DEVICE_REGISTRY_ID_ATTRIBUTE;
pub use record::VALIDATED_FIELD;
pub use record::ValidationRecord;
pub use store::DocumentStore;
pub use store::StoreError;
pub use self::time::TimestampError;
pub use self::time::format_validated;
