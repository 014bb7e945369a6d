//! Character record requirements and candidate validation.
//!
//! A character is a plain JSON object. The store does not constrain field
//! types; it only requires that the fields below are present at insert
//! time. Extra fields pass through untouched.

use serde_json::Value;

use super::errors::{StoreError, StoreResult};

/// Fields every inserted character must carry, in the order violations
/// are reported.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "id", "name", "house", "animal", "symbol", "nickname", "role", "age", "death", "strength",
];

/// Validate an insert candidate.
///
/// The candidate must be a JSON object containing every required field.
/// The first missing field is reported in requirement-list order, not in
/// the order the input happens to enumerate its keys.
pub fn validate_candidate(candidate: &Value) -> StoreResult<()> {
    let obj = candidate.as_object().ok_or(StoreError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(StoreError::MissingRequirement(field));
        }
    }

    Ok(())
}

/// Returns true when the record's `id` field equals `id`.
///
/// Ids are compared as integers; a record whose `id` is a string or null
/// never matches.
pub fn id_matches(record: &Value, id: i64) -> bool {
    record.get("id").and_then(Value::as_i64) == Some(id)
}
