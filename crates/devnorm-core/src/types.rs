//! Core types for devnorm-core.
//!
//! This module defines the fundamental data structures shared across the
//! crate: the unified [`CanonicalRecord`], its nested [`Location`], and the
//! [`SourceFormat`] discriminant the dispatcher detects before converting.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A device-telemetry record in the unified shape.
///
/// Both converters produce this type, so the key set and nesting are the same
/// regardless of which raw shape a record arrived in; only the provenance of
/// each field differs. The identity fields are optional because a flat source
/// may legitimately omit them, in which case they serialize as `null` rather
/// than being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Device identifier. For nested sources this is `deviceID.id`; for flat
    /// sources the top-level `deviceID`, if present.
    #[serde(rename = "deviceID")]
    pub device_id: Option<String>,
    /// Device type. For nested sources this is `deviceType.type`; for flat
    /// sources the top-level `deviceType`, if present.
    #[serde(rename = "deviceType")]
    pub device_type: Option<String>,
    /// Milliseconds since the Unix epoch. Nested sources carry an ISO-8601
    /// string that is parsed and converted; flat sources carry the integer
    /// directly.
    pub timestamp: Option<i64>,
    /// Where the device sits, always fully qualified.
    pub location: Location,
    /// Reading payload. Synthesized as `{status, temperature}` for flat
    /// sources; copied verbatim for nested sources.
    pub data: Value,
}

/// Fully qualified device location, from country down to factory section.
///
/// Exactly these five fields, in this order, on every canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub area: String,
    pub factory: String,
    pub section: String,
}

/// Which raw shape a record arrived in.
///
/// Produced by [`detect`](crate::normalizer::detect) from shape alone and
/// pattern-matched by the dispatcher to pick a converter, so the set of
/// recognized formats is closed and exhaustively handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Flat mapping with a `/`-delimited `location` string and an epoch-ms
    /// integer timestamp.
    Flat,
    /// Nested mapping with object-valued `deviceID`/`deviceType`, exploded
    /// location keys, and an ISO-8601 timestamp string.
    Nested,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Flat => write!(f, "flat"),
            SourceFormat::Nested => write!(f, "nested"),
        }
    }
}
