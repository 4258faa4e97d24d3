// crates/validation-ledger-sink/src/sink.rs
// ============================================================================
// Module: Validation Result Sink
// Description: Publishes validation results and freshness timestamps.
// Purpose: Own one store connection and the publish write sequence.
// Dependencies: validation-ledger-core, serde_json, thiserror, time, tracing
// ============================================================================

//! ## Overview
//! The sink owns a single authenticated store connection and exposes one
//! operation: publish a validation result. Each call updates the `validated`
//! field on the registry document, then on the device document, then fully
//! replaces the result document under the schema leaf. The three writes are
//! strictly sequential with no spanning transaction, so a failed call leaves
//! the store possibly partially applied; callers may retry the whole call.
//! A single-slot deferred error, set out-of-band, preempts the next publish.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use validation_ledger_core::AttributeMap;
use validation_ledger_core::DEVICE_REGISTRY_ID_ATTRIBUTE;
use validation_ledger_core::DeviceId;
use validation_ledger_core::DocumentPath;
use validation_ledger_core::DocumentStore;
use validation_ledger_core::ProjectId;
use validation_ledger_core::RegistryId;
use validation_ledger_core::SchemaId;
use validation_ledger_core::StoreError;
use validation_ledger_core::VALIDATED_FIELD;
use validation_ledger_core::ValidationRecord;
use validation_ledger_core::format_validated;

use crate::config::SinkConfig;
use crate::credentials::Credential;
use crate::credentials::CredentialError;
use crate::credentials::load_credential;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Console URL prefix for browsing the ledger hierarchy; the project
/// identifier is appended.
const VIEW_URL_BASE: &str = "https://console.cloud.google.com/firestore/data/registries/?project=";

/// Project name used in construction error context when no identifier
/// resolved before the failure.
const UNRESOLVED_PROJECT: &str = "default";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Sink construction errors, wrapped with project context.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `project` is the best-known identifier at the point of failure.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Credential loading failed.
    #[error("While creating connection to {project}: {source}")]
    Credential {
        /// Project context for the failure.
        project: String,
        /// Underlying credential error.
        #[source]
        source: CredentialError,
    },
    /// No project identifier could be resolved.
    #[error(
        "While creating connection to {project}: no project identifier from {var} or the credential file"
    )]
    Project {
        /// Project context for the failure.
        project: String,
        /// Project variable that was consulted.
        var: String,
    },
    /// Opening the store connection failed.
    #[error("While creating connection to {project}: {source}")]
    Store {
        /// Project context for the failure.
        project: String,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

/// Publish operation errors.
///
/// # Invariants
/// - `Precondition` is returned before any write is attempted.
/// - `StoreWrite` means "result state unknown, possibly partially applied";
///   the whole call is retryable by the caller.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required identifying field is missing or empty.
    #[error("precondition failed: {0}")]
    Precondition(String),
    /// An underlying store write failed mid-sequence.
    #[error("While writing result for {device_id}: {source}")]
    StoreWrite {
        /// Device the result was being written for.
        device_id: String,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

impl PublishError {
    /// Wraps a store error with device context.
    fn store_write(device_id: &DeviceId, source: StoreError) -> Self {
        Self::StoreWrite {
            device_id: device_id.as_str().to_string(),
            source,
        }
    }
}

// ============================================================================
// SECTION: Store Connector
// ============================================================================

/// Opens authenticated connections to a concrete document store backend.
pub trait StoreConnector {
    /// Store type produced by this connector.
    type Store: DocumentStore;

    /// Opens one connection for the given credential and project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the connection cannot be established.
    fn connect(
        &self,
        credential: &Credential,
        project: &ProjectId,
    ) -> Result<Self::Store, StoreError>;
}

// ============================================================================
// SECTION: Validation Sink
// ============================================================================

/// Result-publishing sink owning one store connection.
///
/// # Invariants
/// - The connection and project identifier are fixed for the sink's lifetime.
/// - The deferred slot holds at most one error; deferring while occupied
///   overwrites, and the earlier error is lost.
/// - Intended for sequential use by one caller; concurrent `publish` calls
///   need an external mutual-exclusion boundary or one sink per worker.
#[derive(Debug)]
pub struct ValidationSink<S: DocumentStore> {
    /// Authenticated store connection.
    store: S,
    /// Owning project of the target store.
    project: ProjectId,
    /// Single-slot holder for a deferred fatal error.
    deferred: Mutex<Option<PublishError>>,
}

impl<S: DocumentStore> ValidationSink<S> {
    /// Creates a sink from a pre-opened connection.
    #[must_use]
    pub fn new(store: S, project: ProjectId) -> Self {
        Self {
            store,
            project,
            deferred: Mutex::new(None),
        }
    }

    /// Loads the credential, resolves the ambient project, and opens one
    /// store connection through `connector`.
    ///
    /// Construction is atomic: any failure is wrapped with
    /// `While creating connection to <project>` and no sink is produced.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] when credential loading, project resolution,
    /// or the store connection fails.
    pub fn connect<C>(config: &SinkConfig, connector: &C) -> Result<Self, ConnectError>
    where
        C: StoreConnector<Store = S>,
    {
        let explicit = config
            .lookup(&config.project_var)
            .filter(|project| !project.is_empty());
        let hint = explicit.clone().unwrap_or_else(|| UNRESOLVED_PROJECT.to_string());
        let credential = load_credential(config).map_err(|source| ConnectError::Credential {
            project: hint.clone(),
            source,
        })?;
        let project = resolve_project(explicit, &credential).ok_or_else(|| {
            ConnectError::Project {
                project: hint.clone(),
                var: config.project_var.clone(),
            }
        })?;
        let store =
            connector
                .connect(&credential, &project)
                .map_err(|source| ConnectError::Store {
                    project: project.as_str().to_string(),
                    source,
                })?;
        tracing::debug!(project = %project, "opened validation ledger store connection");
        Ok(Self::new(store, project))
    }

    /// Returns the owning project of the target store.
    #[must_use]
    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    /// Returns a console URL for browsing the ledger hierarchy.
    ///
    /// Pure string computation from the project identifier; no side effects.
    #[must_use]
    pub fn view_url(&self) -> String {
        format!("{VIEW_URL_BASE}{}", self.project)
    }

    /// Stores an error for delivery on the next `publish` call.
    ///
    /// At most one error is held: deferring while the slot is occupied
    /// overwrites it and the earlier error is lost (logged, not hidden).
    pub fn defer_error(&self, error: PublishError) {
        match self.deferred.lock() {
            Ok(mut slot) => {
                if let Some(dropped) = slot.replace(error) {
                    tracing::warn!(dropped = %dropped, "deferred error overwritten before delivery");
                }
            }
            Err(mut poisoned) => {
                if let Some(dropped) = poisoned.get_mut().replace(error) {
                    tracing::warn!(dropped = %dropped, "deferred error overwritten before delivery");
                }
            }
        }
    }

    /// Publishes one validation result.
    ///
    /// Sequence: deferred-error check, preconditions, timestamp, `validated`
    /// touch on the registry document, `validated` touch on the device
    /// document, full replace of the result document. The three writes are
    /// sequential and non-transactional: on error the caller must treat the
    /// result state as unknown, possibly partially applied, and may retry
    /// the whole call.
    ///
    /// # Errors
    ///
    /// Returns the deferred error verbatim when one is owed (consuming the
    /// slot, regardless of this call's arguments), [`PublishError::Precondition`]
    /// when `device_id`, `schema_id`, or the `deviceRegistryId` attribute is
    /// missing or empty, and [`PublishError::StoreWrite`] when a store write
    /// fails.
    pub fn publish(
        &self,
        device_id: &DeviceId,
        schema_id: &SchemaId,
        attributes: &AttributeMap,
        message: Value,
        error_tree: Value,
    ) -> Result<(), PublishError> {
        if let Some(owed) = self.take_deferred() {
            return Err(owed);
        }

        let registry = attributes
            .get(DEVICE_REGISTRY_ID_ATTRIBUTE)
            .filter(|id| !id.is_empty());
        if device_id.as_str().is_empty() {
            return Err(PublishError::Precondition(
                "deviceId attribute not defined".to_string(),
            ));
        }
        if schema_id.as_str().is_empty() {
            return Err(PublishError::Precondition(
                "schemaId not properly defined".to_string(),
            ));
        }
        let Some(registry) = registry else {
            return Err(PublishError::Precondition(
                "deviceRegistryId attribute not defined".to_string(),
            ));
        };
        let registry_id = RegistryId::new(registry.clone());

        let validated = format_validated(OffsetDateTime::now_utc())
            .map_err(|err| PublishError::store_write(device_id, StoreError::Invalid(err.to_string())))?;

        self.store
            .update_field(
                &DocumentPath::registry(&registry_id),
                VALIDATED_FIELD,
                Value::String(validated.clone()),
            )
            .map_err(|source| PublishError::store_write(device_id, source))?;
        self.store
            .update_field(
                &DocumentPath::device(&registry_id, device_id),
                VALIDATED_FIELD,
                Value::String(validated.clone()),
            )
            .map_err(|source| PublishError::store_write(device_id, source))?;

        let record = ValidationRecord {
            validated,
            error_tree,
            attributes: attributes.clone(),
            message,
        };
        let document = serde_json::to_value(&record)
            .map_err(|err| PublishError::store_write(device_id, StoreError::Invalid(err.to_string())))?;
        self.store
            .set_document(
                &DocumentPath::validation(&registry_id, device_id, schema_id),
                document,
            )
            .map_err(|source| PublishError::store_write(device_id, source))?;

        tracing::debug!(
            registry = %registry_id,
            device = %device_id,
            schema = %schema_id,
            "validation result recorded"
        );
        Ok(())
    }

    /// Takes and clears the deferred error slot.
    fn take_deferred(&self) -> Option<PublishError> {
        match self.deferred.lock() {
            Ok(mut slot) => slot.take(),
            Err(mut poisoned) => poisoned.get_mut().take(),
        }
    }
}

// ============================================================================
// SECTION: Project Resolution
// ============================================================================

/// Resolves the target project: explicit variable first, then the
/// credential's own `project_id`.
fn resolve_project(explicit: Option<String>, credential: &Credential) -> Option<ProjectId> {
    explicit
        .map(ProjectId::new)
        .or_else(|| credential.project_id().map(ProjectId::new))
}
