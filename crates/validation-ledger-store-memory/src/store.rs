// crates/validation-ledger-store-memory/src/store.rs
// ============================================================================
// Module: In-Memory Document Store
// Description: BTreeMap-backed DocumentStore with write log and fault injection.
// Purpose: Make sink write sequences deterministic and observable in tests.
// Dependencies: validation-ledger-core, serde_json, std
// ============================================================================

//! ## Overview
//! Documents are JSON objects keyed by their slash-joined path. All state
//! lives behind one mutex shared by cloned handles, so a test can keep a
//! handle to the store it hands to a sink and inspect documents and the write
//! log afterward. A fault can be armed to fail exactly one write after a
//! chosen number of successful writes; earlier writes remain applied, which
//! is exactly the partial-failure shape the sink's contract documents.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use serde_json::Map;
use serde_json::Value;
use validation_ledger_core::DocumentPath;
use validation_ledger_core::DocumentStore;
use validation_ledger_core::StoreError;

// ============================================================================
// SECTION: Write Log
// ============================================================================

/// One mutation applied to the store, in application order.
///
/// # Invariants
/// - Logged only for writes that were actually applied; failed writes do not
///   appear.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// A single-field merge on the document at `path`.
    UpdateField {
        /// Document path the field was merged into.
        path: String,
        /// Field name that was written.
        field: String,
        /// Field value that was written.
        value: Value,
    },
    /// A full replace of the document at `path`.
    SetDocument {
        /// Document path that was replaced.
        path: String,
        /// Full document contents that were written.
        document: Value,
    },
}

// ============================================================================
// SECTION: Store State
// ============================================================================

/// Armed fault failing one write after a number of successful writes.
#[derive(Debug)]
struct Fault {
    /// Number of successful writes to allow before failing.
    after: u64,
    /// Error returned by the failing write.
    error: StoreError,
}

/// Mutable store state shared by cloned handles.
#[derive(Debug, Default)]
struct MemoryInner {
    /// Documents keyed by slash-joined path.
    documents: BTreeMap<String, Map<String, Value>>,
    /// Applied mutations in order.
    writes: Vec<WriteOp>,
    /// Count of successful writes, used to trigger armed faults.
    write_count: u64,
    /// Fault to inject on an upcoming write, if armed.
    fault: Option<Fault>,
}

/// In-memory [`DocumentStore`] with observable writes.
///
/// # Invariants
/// - Clones share one underlying state; there is no copy-on-clone.
/// - Field updates merge into existing documents; `set_document` replaces.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Shared store state.
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a fault: the write after `after` further successful writes fails
    /// with `error`. Arming again replaces any pending fault.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the store mutex is poisoned.
    pub fn fail_after(&self, after: u64, error: StoreError) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.fault = Some(Fault {
            after: inner.write_count.saturating_add(after),
            error,
        });
        Ok(())
    }

    /// Returns the applied mutations in order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the store mutex is poisoned.
    pub fn writes(&self) -> Result<Vec<WriteOp>, StoreError> {
        Ok(self.lock()?.writes.clone())
    }

    /// Locks the shared state, failing closed on poisoning.
    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store mutex poisoned".to_string()))
    }
}

impl MemoryInner {
    /// Consumes an armed fault when its trigger point is reached.
    fn take_due_fault(&mut self) -> Option<StoreError> {
        if self.fault.as_ref().is_some_and(|fault| self.write_count >= fault.after) {
            return self.fault.take().map(|fault| fault.error);
        }
        None
    }
}

// ============================================================================
// SECTION: DocumentStore Implementation
// ============================================================================

impl DocumentStore for MemoryStore {
    fn update_field(
        &self,
        path: &DocumentPath,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if let Some(error) = inner.take_due_fault() {
            return Err(error);
        }
        inner
            .documents
            .entry(path.as_str().to_string())
            .or_default()
            .insert(field.to_string(), value.clone());
        inner.writes.push(WriteOp::UpdateField {
            path: path.as_str().to_string(),
            field: field.to_string(),
            value,
        });
        inner.write_count += 1;
        Ok(())
    }

    fn set_document(&self, path: &DocumentPath, document: Value) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if let Some(error) = inner.take_due_fault() {
            return Err(error);
        }
        let Value::Object(fields) = document.clone() else {
            return Err(StoreError::Invalid(format!(
                "document at {path} must be a JSON object"
            )));
        };
        inner.documents.insert(path.as_str().to_string(), fields);
        inner.writes.push(WriteOp::SetDocument {
            path: path.as_str().to_string(),
            document,
        });
        inner.write_count += 1;
        Ok(())
    }

    fn get_document(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.documents.get(path.as_str()).cloned().map(Value::Object))
    }
}
