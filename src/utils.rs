use crate::error::{LedgerError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Parses an upstream timestamp into the entry's local wall-clock time.
///
/// The APIs are inconsistent about the format: most records carry RFC 3339
/// strings, some older ones carry epoch milliseconds, and a few forms send
/// a bare calendar date. All three are accepted.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap());
    }

    if let Ok(millis) = trimmed.parse::<i64>() {
        if let Some(dt) = DateTime::from_timestamp_millis(millis) {
            return Ok(dt.naive_utc());
        }
    }

    Err(LedgerError::UnparseableTimestamp(raw.to_string()))
}

/// Canonical key-sorted JSON for a specification map. Two maps produce the
/// same string exactly when every field matches, regardless of field order
/// in the upstream payload.
pub fn canonical_specs_json(specs: &BTreeMap<String, serde_json::Value>) -> Result<String> {
    Ok(serde_json::to_string(specs)?)
}
