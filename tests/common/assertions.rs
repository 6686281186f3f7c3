//! Domain-specific assertion macros for devnorm harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* normalization contract was violated.

use devnorm_core::CanonicalRecord;

// ---------------------------------------------------------------------------
// Error assertions
// ---------------------------------------------------------------------------

/// Assert that a normalization result failed with the given reason code.
///
/// ```rust
/// assert_reason!(devnorm_core::normalize(&record), "missing_key:country");
/// ```
#[macro_export]
macro_rules! assert_reason {
    ($result:expr, $code:expr) => {{
        let result: Result<devnorm_core::CanonicalRecord, devnorm_core::ValidationError> = $result;
        let code: &str = $code;
        match result {
            Err(err) if err.to_string() == code => {}
            Err(err) => panic!(
                "assert_reason! failed:\n  expected reason: {:?}\n  actual reason:   {:?}",
                code,
                err.to_string()
            ),
            Ok(record) => panic!(
                "assert_reason! failed: expected {:?} but conversion succeeded:\n  {:?}",
                code, record
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Location assertions
// ---------------------------------------------------------------------------

/// Assert a canonical record's five location fields in one shot.
///
/// ```rust
/// assert_location!(record, "USA", "NewYork", "Manhattan", "Factory1", "SectionA");
/// ```
#[macro_export]
macro_rules! assert_location {
    ($record:expr, $country:expr, $city:expr, $area:expr, $factory:expr, $section:expr) => {{
        let record: &devnorm_core::CanonicalRecord = &$record;
        let expected = devnorm_core::Location {
            country: $country.to_string(),
            city: $city.to_string(),
            area: $area.to_string(),
            factory: $factory.to_string(),
            section: $section.to_string(),
        };
        if record.location != expected {
            panic!(
                "assert_location! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, record.location
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Shape invariant helpers
// ---------------------------------------------------------------------------

/// Assert that a canonical record serializes with exactly the unified key set
/// and a fully qualified five-field location, regardless of source format.
pub fn assert_canonical_shape(record: &CanonicalRecord) {
    let value = serde_json::to_value(record).expect("canonical record must serialize");
    let object = value.as_object().expect("canonical record must be an object");

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["data", "deviceID", "deviceType", "location", "timestamp"],
        "canonical record must expose exactly the unified key set"
    );

    let location = object["location"]
        .as_object()
        .expect("canonical location must be an object");
    let mut location_keys: Vec<&str> = location.keys().map(String::as_str).collect();
    location_keys.sort_unstable();
    assert_eq!(
        location_keys,
        ["area", "city", "country", "factory", "section"],
        "canonical location must carry exactly five fields"
    );
}
