// crates/validation-ledger-core/tests/path_and_record.rs
// ============================================================================
// Module: Core Model Tests
// Description: Tests for document paths, record wire shape, and timestamps.
// Purpose: Pin the hierarchy shape and wire field names the store depends on.
// Dependencies: validation-ledger-core, proptest, serde_json, time
// ============================================================================

//! ## Overview
//! Pins the three-level document hierarchy, the result document's wire field
//! names, and the canonical `validated` timestamp rendering.

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

use std::collections::BTreeMap;

use proptest::proptest;
use serde_json::json;
use time::macros::datetime;
use validation_ledger_core::DeviceId;
use validation_ledger_core::DocumentPath;
use validation_ledger_core::RegistryId;
use validation_ledger_core::SchemaId;
use validation_ledger_core::ValidationRecord;
use validation_ledger_core::format_validated;

/// Test result alias for fallible assertions.
type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Document Paths
// ============================================================================

#[test]
fn registry_path_has_one_level() {
    let path = DocumentPath::registry(&RegistryId::new("reg1"));
    assert_eq!(path.as_str(), "registries/reg1");
}

#[test]
fn device_path_nests_under_registry() {
    let path = DocumentPath::device(&RegistryId::new("reg1"), &DeviceId::new("dev1"));
    assert_eq!(path.as_str(), "registries/reg1/devices/dev1");
}

#[test]
fn validation_path_nests_under_device() {
    let path = DocumentPath::validation(
        &RegistryId::new("reg1"),
        &DeviceId::new("dev1"),
        &SchemaId::new("schema1"),
    );
    assert_eq!(path.as_str(), "registries/reg1/devices/dev1/validations/schema1");
}

proptest! {
    #[test]
    fn validation_path_keeps_segment_order(
        registry in "[a-z0-9_-]{1,32}",
        device in "[a-z0-9_-]{1,32}",
        schema in "[a-z0-9_-]{1,32}",
    ) {
        let path = DocumentPath::validation(
            &RegistryId::new(registry.clone()),
            &DeviceId::new(device.clone()),
            &SchemaId::new(schema.clone()),
        );
        let segments: Vec<&str> = path.as_str().split('/').collect();
        assert_eq!(
            segments,
            vec!["registries", registry.as_str(), "devices", device.as_str(), "validations", schema.as_str()],
        );
    }
}

// ============================================================================
// SECTION: Record Wire Shape
// ============================================================================

#[test]
fn record_serializes_with_stable_field_names() -> TestResult {
    let mut attributes = BTreeMap::new();
    attributes.insert("deviceRegistryId".to_string(), "reg1".to_string());
    let record = ValidationRecord {
        validated: "2026-08-27T14:03:07.251Z".to_string(),
        error_tree: json!({"pointset": "missing field"}),
        attributes,
        message: json!({"points": {}}),
    };
    let value = serde_json::to_value(&record).map_err(|err| err.to_string())?;
    let object = value.as_object().ok_or("record did not serialize as an object")?;
    assert!(object.contains_key("validated"));
    assert!(object.contains_key("errorTree"));
    assert!(object.contains_key("attributes"));
    assert!(object.contains_key("message"));
    assert_eq!(object.len(), 4);
    Ok(())
}

#[test]
fn record_round_trips_opaque_payloads() -> TestResult {
    let record = ValidationRecord {
        validated: "2026-08-27T14:03:07.251Z".to_string(),
        error_tree: json!(null),
        attributes: BTreeMap::new(),
        message: json!([1, 2, 3]),
    };
    let value = serde_json::to_value(&record).map_err(|err| err.to_string())?;
    let back: ValidationRecord = serde_json::from_value(value).map_err(|err| err.to_string())?;
    assert_eq!(back, record);
    Ok(())
}

// ============================================================================
// SECTION: Timestamps
// ============================================================================

#[test]
fn validated_timestamp_is_utc_millis_with_zone_designator() -> TestResult {
    let instant = datetime!(2026-08-27 14:03:07.251 UTC);
    let rendered = format_validated(instant).map_err(|err| err.to_string())?;
    assert_eq!(rendered, "2026-08-27T14:03:07.251Z");
    Ok(())
}

#[test]
fn validated_timestamp_converts_offsets_to_utc() -> TestResult {
    let instant = datetime!(2026-08-27 16:03:07.251 +2);
    let rendered = format_validated(instant).map_err(|err| err.to_string())?;
    assert_eq!(rendered, "2026-08-27T14:03:07.251Z");
    Ok(())
}

#[test]
fn validated_timestamp_pads_subsecond_digits() -> TestResult {
    let instant = datetime!(2026-08-27 14:03:07.007 UTC);
    let rendered = format_validated(instant).map_err(|err| err.to_string())?;
    assert_eq!(rendered, "2026-08-27T14:03:07.007Z");
    Ok(())
}
