// crates/validation-ledger-sink/src/config.rs
// ============================================================================
// Module: Sink Configuration
// Description: Environment-style configuration for credential and project lookup.
// Purpose: Resolve ambient configuration deterministically, including in tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The sink takes no constructor arguments beyond ambient configuration: one
//! variable names the credential file, another optionally names the project.
//! An explicit `overrides` map takes the place of the process environment
//! entirely when present, so tests resolve configuration deterministically
//! without mutating process state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Variable naming the credential file path.
pub const CREDENTIALS_ENV_VAR: &str = "VALIDATION_LEDGER_CREDENTIALS";
/// Variable naming the target project, overriding the credential's own.
pub const PROJECT_ENV_VAR: &str = "VALIDATION_LEDGER_PROJECT";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Ambient configuration consulted at sink construction.
///
/// # Invariants
/// - When `overrides` is present, lookups never read the process environment.
/// - Variable names are fixed for the config's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Variable naming the credential file path.
    pub credentials_var: String,
    /// Variable naming the target project.
    pub project_var: String,
    /// Optional override map used for deterministic lookups.
    pub overrides: Option<BTreeMap<String, String>>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            credentials_var: CREDENTIALS_ENV_VAR.to_string(),
            project_var: PROJECT_ENV_VAR.to_string(),
            overrides: None,
        }
    }
}

impl SinkConfig {
    /// Creates a configuration resolving only from the given override map.
    #[must_use]
    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self {
            overrides: Some(overrides),
            ..Self::default()
        }
    }

    /// Resolves a configuration variable, preferring overrides when present.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides
            .as_ref()
            .map_or_else(|| env::var(key).ok(), |overrides| overrides.get(key).cloned())
    }
}
