// crates/validation-ledger-core/src/store.rs
// ============================================================================
// Module: Document Store Interface
// Description: Backend-agnostic contract for hierarchical document stores.
// Purpose: Define the three operations the ledger sink needs from any backend.
// Dependencies: crate::path, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The ledger consumes its document store through three operations:
//! single-field update (merge), full document replace, and read-back. Each
//! document operation is atomic on its own; nothing here spans documents, and
//! the sink's multi-document write sequence is explicitly non-transactional.
//! Implementations must be fail-closed: an error return means the operation
//! may or may not have been applied, never that it silently succeeded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::path::DocumentPath;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Document store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O or network error.
    #[error("document store io error: {0}")]
    Io(String),
    /// The authenticated identity may not perform the operation.
    #[error("document store permission denied: {0}")]
    PermissionDenied(String),
    /// The operation conflicted with concurrent document state.
    #[error("document store conflict: {0}")]
    Conflict(String),
    /// The request or payload is invalid for the store.
    #[error("document store invalid data: {0}")]
    Invalid(String),
    /// The store is unreachable or not ready.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// SECTION: Document Store
// ============================================================================

/// Hierarchical key-addressed document store.
///
/// One connection per sink instance; implementations are used sequentially by
/// a single caller and need not provide internal ordering across calls.
pub trait DocumentStore {
    /// Updates a single named field on the document at `path`, preserving all
    /// other fields. Creates the document when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails; the field may or may not
    /// have been applied.
    fn update_field(
        &self,
        path: &DocumentPath,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError>;

    /// Replaces the full contents of the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails or `document` is not a
    /// JSON object.
    fn set_document(&self, path: &DocumentPath, document: Value) -> Result<(), StoreError>;

    /// Reads the document at `path`, returning `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the read fails.
    fn get_document(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError>;
}
