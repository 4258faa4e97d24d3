// crates/validation-ledger-sink/src/credentials.rs
// ============================================================================
// Module: Credential Loader
// Description: Loads and validates the service-account credential file.
// Purpose: Produce an authenticated identity for opening a store connection.
// Dependencies: serde, serde_json, thiserror, std
// ============================================================================

//! ## Overview
//! The credential loader resolves the file path named by a configuration
//! variable, reads the file within a single scoped operation, and parses it
//! as a JSON service-account document. It fails fast: an unset variable or a
//! missing file is a configuration error naming both the resolved absolute
//! path and the variable; an unreadable or malformed file is a parse error.
//! Security posture: the private key is never rendered by `Debug` or errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::config::SinkConfig;

// ============================================================================
// SECTION: Credential Errors
// ============================================================================

/// Credential loading errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `Configuration` covers both an unset variable and a missing file; when
///   the variable is unset the rendered path resolves from the empty string.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The configuration variable is unset or names a missing file.
    #[error("Credential file {path} defined by {var} not found.")]
    Configuration {
        /// Resolved absolute path of the credential file.
        path: String,
        /// Name of the configuration variable consulted.
        var: String,
    },
    /// The credential file exists but is unreadable or malformed.
    #[error("credential file {path} is not a valid credential: {reason}")]
    Parse {
        /// Resolved absolute path of the credential file.
        path: String,
        /// Why the contents were rejected.
        reason: String,
    },
}

// ============================================================================
// SECTION: Credential
// ============================================================================

/// Authenticated identity parsed from a service-account credential file.
///
/// # Invariants
/// - `kind`, `client_email`, and `private_key` are non-empty after loading.
/// - `project_id` is advisory; ambient project resolution may override it.
#[derive(Clone, Deserialize)]
pub struct Credential {
    /// Credential type discriminator from the file's `type` field.
    #[serde(rename = "type")]
    kind: String,
    /// Owning project recorded in the credential, when present.
    #[serde(default)]
    project_id: Option<String>,
    /// Service account email.
    client_email: String,
    /// Private key material. Never rendered.
    private_key: String,
}

impl Credential {
    /// Returns the credential type discriminator.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the project recorded in the credential, when present and
    /// non-empty.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Returns the service account email.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Returns the private key material for opening a connection.
    #[must_use]
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Loads the credential named by the configured credential variable.
///
/// The file handle is scoped to the read and released on every exit path,
/// success or failure, before parsing begins.
///
/// # Errors
///
/// Returns [`CredentialError::Configuration`] when the variable is unset or
/// the file does not exist, and [`CredentialError::Parse`] when the file is
/// unreadable or its contents are not a valid credential.
pub fn load_credential(config: &SinkConfig) -> Result<Credential, CredentialError> {
    let raw = config.lookup(&config.credentials_var).unwrap_or_default();
    let resolved = absolute_display(&raw);
    let path = Path::new(&raw);
    if raw.is_empty() || !path.exists() {
        return Err(CredentialError::Configuration {
            path: resolved,
            var: config.credentials_var.clone(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|err| CredentialError::Parse {
        path: resolved.clone(),
        reason: err.to_string(),
    })?;
    parse_credential(&contents, &resolved)
}

/// Parses and validates credential file contents.
fn parse_credential(contents: &str, resolved: &str) -> Result<Credential, CredentialError> {
    let credential: Credential =
        serde_json::from_str(contents).map_err(|err| CredentialError::Parse {
            path: resolved.to_string(),
            reason: err.to_string(),
        })?;
    if credential.kind.is_empty()
        || credential.client_email.is_empty()
        || credential.private_key.is_empty()
    {
        return Err(CredentialError::Parse {
            path: resolved.to_string(),
            reason: "required credential fields are empty".to_string(),
        });
    }
    Ok(credential)
}

/// Renders the absolute form of a raw path value for error messages.
fn absolute_display(raw: &str) -> String {
    std::path::absolute(Path::new(raw))
        .unwrap_or_else(|_| PathBuf::from(raw))
        .display()
        .to_string()
}
