// crates/validation-ledger-core/src/time.rs
// ============================================================================
// Module: Validation Ledger Time Model
// Description: Canonical freshness timestamp formatting.
// Purpose: Render "validated" timestamps as UTC ISO-8601 with millisecond precision.
// Dependencies: thiserror, time
// ============================================================================

//! ## Overview
//! Every write the sink performs carries one `validated` timestamp string:
//! UTC, ISO-8601, millisecond precision, trailing `Z` designator
//! (for example `2026-08-27T14:03:07.251Z`). The core never reads wall-clock
//! time itself; callers supply the instant and this module only formats it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Format
// ============================================================================

/// Format description for `validated` timestamps.
const VALIDATED_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Timestamp formatting errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The instant could not be rendered in the canonical format.
    #[error("timestamp format error: {0}")]
    Format(#[from] time::error::Format),
}

/// Formats an instant as a canonical `validated` timestamp string.
///
/// The instant is converted to UTC before formatting, so the rendered value
/// always carries the `Z` designator truthfully.
///
/// # Errors
///
/// Returns [`TimestampError`] when the underlying formatter fails.
pub fn format_validated(instant: OffsetDateTime) -> Result<String, TimestampError> {
    Ok(instant.to_offset(time::UtcOffset::UTC).format(VALIDATED_FORMAT)?)
}
