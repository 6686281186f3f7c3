//! Validation failures raised while normalizing a raw record.

use thiserror::Error;

/// Everything that can go wrong while classifying or converting one record.
///
/// The `Display` form of each variant is a stable reason code. Conversion
/// either fully succeeds or fails with exactly one of these; nothing is
/// retried or defaulted, and converter failures pass through the dispatcher
/// unchanged so callers always see the precise precondition that broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Flat record: `location` is absent or not a string.
    #[error("missing_or_invalid_location")]
    MissingOrInvalidLocation,
    /// Flat record: `location` splits into fewer than five `/` segments.
    #[error("malformed_location")]
    MalformedLocation,
    /// Nested record: a required top-level key is absent. Carries the first
    /// offender in canonical check order, even when several are missing.
    #[error("missing_key:{0}")]
    MissingKey(&'static str),
    /// Nested record: `timestamp` does not match the strict wire pattern or
    /// names an impossible calendar date.
    #[error("invalid_timestamp")]
    InvalidTimestamp,
    /// Nested record: `deviceID`/`deviceType` is not an object carrying the
    /// expected string sub-key.
    #[error("invalid_device_reference")]
    InvalidDeviceReference,
    /// Neither shape signature matched the record.
    #[error("unknown_format")]
    UnknownFormat,
}
