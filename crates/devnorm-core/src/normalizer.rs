//! Normalizer — classifies a raw telemetry record and converts it into a
//! [`CanonicalRecord`].
//!
//! Classification is attempted in order: object-valued `deviceID` → nested,
//! flat key trio → flat, otherwise the record is rejected. Detection looks at
//! shape only (which keys exist and whether `deviceID` is an object), never at
//! field values, so converters remain the single place where values are
//! validated. Everything here is a pure function of its argument: no I/O, no
//! shared state, and inputs are never mutated.

use crate::error::ValidationError;
use crate::types::{CanonicalRecord, Location, SourceFormat};
use chrono::NaiveDateTime;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Classify `record` by shape alone.
///
/// A record whose `deviceID` value is itself an object is always nested, even
/// when the flat key trio happens to be present as well.
pub fn detect(record: &Map<String, Value>) -> Result<SourceFormat, ValidationError> {
    if record.get("deviceID").is_some_and(Value::is_object) {
        return Ok(SourceFormat::Nested);
    }
    if ["deviceID", "deviceType", "timestamp"]
        .iter()
        .all(|key| record.contains_key(*key))
    {
        return Ok(SourceFormat::Flat);
    }
    Err(ValidationError::UnknownFormat)
}

/// Convert one raw record into the canonical shape.
///
/// Non-object input is rejected as unrecognizable. Validation failures from
/// the selected converter propagate unchanged.
pub fn normalize(record: &Value) -> Result<CanonicalRecord, ValidationError> {
    let record = record.as_object().ok_or(ValidationError::UnknownFormat)?;
    match detect(record)? {
        SourceFormat::Nested => convert_nested(record),
        SourceFormat::Flat => convert_flat(record),
    }
}

// ---------------------------------------------------------------------------
// Flat records
// ---------------------------------------------------------------------------

/// Number of `/`-delimited segments a flat `location` must carry.
const LOCATION_SEGMENTS: usize = 5;

/// Convert a flat record: `location` is exploded positionally into the five
/// canonical fields, and `{operationStatus, temp}` become `{status,
/// temperature}` under `data`.
///
/// Only `location` is mandatory. The identity fields and the two payload
/// fields map to `null` when absent. Segments past the fifth are ignored.
pub fn convert_flat(record: &Map<String, Value>) -> Result<CanonicalRecord, ValidationError> {
    let location = record
        .get("location")
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingOrInvalidLocation)?;

    let segments: Vec<&str> = location.split('/').collect();
    if segments.len() < LOCATION_SEGMENTS {
        return Err(ValidationError::MalformedLocation);
    }

    let data = serde_json::json!({
        "status": record.get("operationStatus").cloned().unwrap_or(Value::Null),
        "temperature": record.get("temp").cloned().unwrap_or(Value::Null),
    });

    Ok(CanonicalRecord {
        device_id: optional_string(record, "deviceID"),
        device_type: optional_string(record, "deviceType"),
        timestamp: record.get("timestamp").and_then(Value::as_i64),
        location: Location {
            country: segments[0].to_string(),
            city: segments[1].to_string(),
            area: segments[2].to_string(),
            factory: segments[3].to_string(),
            section: segments[4].to_string(),
        },
        data,
    })
}

fn optional_string(record: &Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_owned)
}

// ---------------------------------------------------------------------------
// Nested records
// ---------------------------------------------------------------------------

/// Keys a nested record must carry, in the order they are checked. The first
/// absentee is the one reported.
const REQUIRED_KEYS: [&str; 9] = [
    "timestamp",
    "deviceID",
    "deviceType",
    "country",
    "city",
    "area",
    "factory",
    "section",
    "data",
];

/// Convert a nested record: identity fields are lifted out of their wrapper
/// objects, the exploded location keys are gathered, the ISO-8601 timestamp
/// becomes epoch milliseconds, and `data` is carried over as a fresh copy.
pub fn convert_nested(record: &Map<String, Value>) -> Result<CanonicalRecord, ValidationError> {
    for key in REQUIRED_KEYS {
        if !record.contains_key(key) {
            return Err(ValidationError::MissingKey(key));
        }
    }

    let timestamp = record
        .get("timestamp")
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidTimestamp)
        .and_then(parse_timestamp)?;

    Ok(CanonicalRecord {
        device_id: Some(unwrap_reference(record, "deviceID", "id")?),
        device_type: Some(unwrap_reference(record, "deviceType", "type")?),
        timestamp: Some(timestamp),
        location: Location {
            country: required_string(record, "country")?,
            city: required_string(record, "city")?,
            area: required_string(record, "area")?,
            factory: required_string(record, "factory")?,
            section: required_string(record, "section")?,
        },
        // Cloned, so later mutation of the input can never show through.
        data: record["data"].clone(),
    })
}

/// Pull `record[key][sub_key]` as a string, e.g. `deviceID.id`.
fn unwrap_reference(
    record: &Map<String, Value>,
    key: &str,
    sub_key: &str,
) -> Result<String, ValidationError> {
    record
        .get(key)
        .and_then(Value::as_object)
        .and_then(|wrapper| wrapper.get(sub_key))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ValidationError::InvalidDeviceReference)
}

/// Pull a top-level string field. A present-but-non-string value is reported
/// the same way as an absent one.
fn required_string(
    record: &Map<String, Value>,
    key: &'static str,
) -> Result<String, ValidationError> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ValidationError::MissingKey(key))
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Wire pattern for nested timestamps: date, time, mandatory fractional
/// seconds, literal `Z`. Calendar validity (month 13, second 61, ...) is left
/// to chrono afterwards.
static TIMESTAMP_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,9}Z$")
        .expect("timestamp pattern must compile")
});

/// Parse a strict ISO-8601 UTC timestamp into milliseconds since the Unix
/// epoch, rounding half-up to the nearest millisecond.
fn parse_timestamp(raw: &str) -> Result<i64, ValidationError> {
    if !TIMESTAMP_SHAPE.is_match(raw) {
        return Err(ValidationError::InvalidTimestamp);
    }
    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.fZ")
        .map_err(|_| ValidationError::InvalidTimestamp)?
        .and_utc();
    let millis_in_second = (i64::from(parsed.timestamp_subsec_nanos()) + 500_000) / 1_000_000;
    Ok(parsed.timestamp() * 1000 + millis_in_second)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
