// crates/validation-ledger-sink/src/lib.rs
// ============================================================================
// Module: Validation Ledger Sink Library
// Description: Result-publishing sink for telemetry validation outcomes.
// Purpose: Record validation results and freshness timestamps in a document store.
// Dependencies: validation-ledger-core, serde, serde_json, thiserror, time, tracing
// ============================================================================

//! ## Overview
//! The sink is the boundary between a validation pipeline and the persisted
//! record of validation history. Constructing a [`ValidationSink`] loads a
//! credential, resolves the ambient project, and opens one store connection;
//! each [`ValidationSink::publish`] call then touches two freshness
//! timestamps and writes one full result document.
//! Invariants:
//! - Construction is atomic: no partially-initialized sink escapes.
//! - Publish performs three sequential writes with no spanning transaction;
//!   an error means "result state unknown, possibly partially applied."
//! - At most one deferred error is held; the next publish call returns it
//!   before doing any other work.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod credentials;
pub mod sink;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CREDENTIALS_ENV_VAR;
pub use config::PROJECT_ENV_VAR;
pub use config::SinkConfig;
pub use credentials::Credential;
pub use credentials::CredentialError;
pub use credentials::load_credential;
pub use sink::ConnectError;
pub use sink::PublishError;
pub use sink::StoreConnector;
pub use sink::ValidationSink;
