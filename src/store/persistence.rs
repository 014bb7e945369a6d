//! Roster document persistence.
//!
//! The roster lives in a single JSON file holding one array of record
//! objects. Every successful mutation rewrites the whole document
//! (write-through). Writes go to a sibling temp file which is synced and
//! renamed into place, so an interrupted write never leaves a truncated
//! document behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};

/// Outcome of loading the roster document at startup.
pub enum LoadOutcome {
    /// Document read and parsed
    Loaded(Vec<Value>),
    /// Document does not exist yet
    Missing,
    /// Document exists but could not be read or parsed
    Malformed(StoreError),
}

/// Load the roster document.
///
/// Never returns an error: the caller decides how to degrade. A document
/// whose top level is not an array counts as malformed.
pub fn load_roster(path: &Path) -> LoadOutcome {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LoadOutcome::Missing,
        Err(e) => return LoadOutcome::Malformed(StoreError::Malformed(e.to_string())),
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(records)) => LoadOutcome::Loaded(records),
        Ok(other) => LoadOutcome::Malformed(StoreError::Malformed(format!(
            "expected a top-level array, found {}",
            json_type_name(&other)
        ))),
        Err(e) => LoadOutcome::Malformed(StoreError::Malformed(e.to_string())),
    }
}

/// Rewrite the roster document with the full record sequence.
///
/// Pretty-printed output is cosmetic, not a contract. The temp file is
/// synced before the rename so the rename publishes complete bytes.
pub fn save_roster(path: &Path, records: &[Value]) -> StoreResult<()> {
    let serialized = serde_json::to_vec_pretty(records)
        .map_err(|e| StoreError::Persistence(format!("serialization failed: {}", e)))?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp = File::create(&tmp_path).map_err(|e| {
        StoreError::Persistence(format!("failed to create {}: {}", tmp_path.display(), e))
    })?;
    tmp.write_all(&serialized)
        .and_then(|_| tmp.sync_all())
        .map_err(|e| {
            StoreError::Persistence(format!("failed to write {}: {}", tmp_path.display(), e))
        })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        StoreError::Persistence(format!("failed to replace {}: {}", path.display(), e))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
