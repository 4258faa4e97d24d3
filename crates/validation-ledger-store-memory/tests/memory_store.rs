// crates/validation-ledger-store-memory/tests/memory_store.rs
// ============================================================================
// Module: Memory Store Tests
// Description: Tests for merge/replace semantics, write log, and faults.
// Purpose: Ensure the test backend models the store contract faithfully.
// Dependencies: validation-ledger-core, validation-ledger-store-memory, serde_json
// ============================================================================

//! ## Overview
//! Exercises the in-memory backend's merge-versus-replace semantics, its
//! ordered write log, and single-shot fault injection.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use serde_json::json;
use validation_ledger_core::DeviceId;
use validation_ledger_core::DocumentPath;
use validation_ledger_core::DocumentStore;
use validation_ledger_core::RegistryId;
use validation_ledger_core::StoreError;
use validation_ledger_store_memory::MemoryStore;
use validation_ledger_store_memory::WriteOp;

/// Test result alias for fallible assertions.
type TestResult = Result<(), String>;

/// Returns the registry document path used across tests.
fn registry_path() -> DocumentPath {
    DocumentPath::registry(&RegistryId::new("reg1"))
}

// ============================================================================
// SECTION: Merge vs Replace
// ============================================================================

#[test]
fn update_field_preserves_other_fields() -> TestResult {
    let store = MemoryStore::new();
    let path = registry_path();
    store
        .update_field(&path, "displayName", json!("Building A"))
        .map_err(|err| err.to_string())?;
    store
        .update_field(&path, "validated", json!("2026-08-27T14:03:07.251Z"))
        .map_err(|err| err.to_string())?;
    let document = store
        .get_document(&path)
        .map_err(|err| err.to_string())?
        .ok_or("registry document missing")?;
    assert_eq!(document["displayName"], json!("Building A"));
    assert_eq!(document["validated"], json!("2026-08-27T14:03:07.251Z"));
    Ok(())
}

#[test]
fn update_field_creates_missing_document() -> TestResult {
    let store = MemoryStore::new();
    let path = registry_path();
    store.update_field(&path, "validated", json!("T")).map_err(|err| err.to_string())?;
    let document = store
        .get_document(&path)
        .map_err(|err| err.to_string())?
        .ok_or("registry document missing")?;
    assert_eq!(document, json!({"validated": "T"}));
    Ok(())
}

#[test]
fn set_document_replaces_all_fields() -> TestResult {
    let store = MemoryStore::new();
    let path = DocumentPath::device(&RegistryId::new("reg1"), &DeviceId::new("dev1"));
    store.update_field(&path, "stale", json!(true)).map_err(|err| err.to_string())?;
    store
        .set_document(&path, json!({"validated": "T"}))
        .map_err(|err| err.to_string())?;
    let document = store
        .get_document(&path)
        .map_err(|err| err.to_string())?
        .ok_or("device document missing")?;
    assert_eq!(document, json!({"validated": "T"}));
    Ok(())
}

#[test]
fn set_document_rejects_non_object_payloads() {
    let store = MemoryStore::new();
    let result = store.set_document(&registry_path(), json!([1, 2, 3]));
    assert!(matches!(result, Err(StoreError::Invalid(_))));
}

#[test]
fn get_document_returns_none_when_absent() -> TestResult {
    let store = MemoryStore::new();
    let document = store.get_document(&registry_path()).map_err(|err| err.to_string())?;
    assert!(document.is_none());
    Ok(())
}

// ============================================================================
// SECTION: Write Log
// ============================================================================

#[test]
fn writes_are_logged_in_application_order() -> TestResult {
    let store = MemoryStore::new();
    let path = registry_path();
    store.update_field(&path, "validated", json!("T1")).map_err(|err| err.to_string())?;
    store
        .set_document(&path, json!({"validated": "T2"}))
        .map_err(|err| err.to_string())?;
    let writes = store.writes().map_err(|err| err.to_string())?;
    assert_eq!(
        writes,
        vec![
            WriteOp::UpdateField {
                path: "registries/reg1".to_string(),
                field: "validated".to_string(),
                value: json!("T1"),
            },
            WriteOp::SetDocument {
                path: "registries/reg1".to_string(),
                document: json!({"validated": "T2"}),
            },
        ],
    );
    Ok(())
}

#[test]
fn clones_share_state() -> TestResult {
    let store = MemoryStore::new();
    let handle = store.clone();
    store
        .update_field(&registry_path(), "validated", json!("T"))
        .map_err(|err| err.to_string())?;
    let writes = handle.writes().map_err(|err| err.to_string())?;
    assert_eq!(writes.len(), 1);
    Ok(())
}

// ============================================================================
// SECTION: Fault Injection
// ============================================================================

#[test]
fn armed_fault_fails_one_write_and_keeps_prior_writes() -> TestResult {
    let store = MemoryStore::new();
    let path = registry_path();
    store
        .fail_after(1, StoreError::Unavailable("injected".to_string()))
        .map_err(|err| err.to_string())?;
    store.update_field(&path, "validated", json!("T1")).map_err(|err| err.to_string())?;
    let failed = store.update_field(&path, "validated", json!("T2"));
    assert!(matches!(failed, Err(StoreError::Unavailable(_))));
    // The fault is single-shot: the next write goes through.
    store.update_field(&path, "validated", json!("T3")).map_err(|err| err.to_string())?;
    let writes = store.writes().map_err(|err| err.to_string())?;
    assert_eq!(writes.len(), 2);
    let document = store
        .get_document(&path)
        .map_err(|err| err.to_string())?
        .ok_or("registry document missing")?;
    assert_eq!(document["validated"], json!("T3"));
    Ok(())
}

#[test]
fn fault_with_zero_delay_fails_next_write() {
    let store = MemoryStore::new();
    let armed = store.fail_after(0, StoreError::Io("injected".to_string()));
    assert!(armed.is_ok());
    let result = store.update_field(&registry_path(), "validated", json!("T"));
    assert!(matches!(result, Err(StoreError::Io(_))));
}
