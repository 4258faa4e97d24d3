// crates/validation-ledger-store-memory/src/lib.rs
// ============================================================================
// Module: Validation Ledger Memory Store Library
// Description: In-memory DocumentStore for tests and local development.
// Purpose: Provide a deterministic backend with observable writes and faults.
// Dependencies: validation-ledger-core, serde_json
// ============================================================================

//! ## Overview
//! This crate implements [`validation_ledger_core::DocumentStore`] entirely in
//! memory. Every mutation is appended to an ordered write log, and faults can
//! be injected at a chosen write index, so the sink's non-transactional
//! multi-document sequence is directly observable in tests.
//! Invariants:
//! - Single-field updates merge; full writes replace.
//! - An injected fault fails exactly one write and leaves prior writes applied.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MemoryStore;
pub use store::WriteOp;
