//! The character store.
//!
//! Owns the ordered collection of character records and performs the four
//! canonical operations: list, get-by-id, insert, update. Collection order
//! is insertion order and doubles as pagination order; nothing re-sorts it
//! and nothing deletes from it.
//!
//! One `RwLock` guards the collection. Mutations hold the write lock
//! across mutate-then-persist, so at most one mutation is in flight and
//! the on-disk snapshot is consistent after every successful call. When
//! the persistence write fails, the in-memory change is rolled back before
//! the error is returned; memory and disk never diverge.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;

use crate::observability::Logger;

use super::character::{id_matches, validate_candidate};
use super::errors::{StoreError, StoreResult};
use super::persistence::{self, LoadOutcome};

/// File-backed store for the character roster.
pub struct CharacterStore {
    records: RwLock<Vec<Value>>,
    /// Backing document path; `None` keeps the store memory-only
    path: Option<PathBuf>,
}

impl CharacterStore {
    /// Open the store backed by the roster document at `path`.
    ///
    /// A missing or malformed document degrades to an empty collection
    /// with a WARN diagnostic; it never fails the process.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match persistence::load_roster(&path) {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::Missing => {
                Logger::warn(
                    "ROSTER_MISSING",
                    &[("path", &path.display().to_string())],
                );
                Vec::new()
            }
            LoadOutcome::Malformed(err) => {
                Logger::warn(
                    "ROSTER_MALFORMED",
                    &[
                        ("path", &path.display().to_string()),
                        ("reason", &err.to_string()),
                    ],
                );
                Vec::new()
            }
        };

        Self {
            records: RwLock::new(records),
            path: Some(path),
        }
    }

    /// Memory-only store, starting empty.
    pub fn in_memory() -> Self {
        Self::with_records(Vec::new())
    }

    /// Memory-only store seeded with `records`.
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: RwLock::new(records),
            path: None,
        }
    }

    /// Backing document path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// True when the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the page `[skip, min(skip + limit, len))` in collection
    /// order.
    ///
    /// Out-of-range values degrade to fewer or zero items; this never
    /// errors for any `skip`/`limit` combination. Saturating arithmetic
    /// keeps huge inputs from overflowing.
    pub fn list(&self, skip: usize, limit: usize) -> StoreResult<Vec<Value>> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        let end = skip.saturating_add(limit).min(records.len());
        if skip >= end {
            return Ok(Vec::new());
        }

        Ok(records[skip..end].to_vec())
    }

    /// Return the first record (in insertion order) whose `id` equals
    /// `id`, or `NotFound`.
    ///
    /// Duplicate ids are tolerated; the earliest insert wins.
    pub fn get_by_id(&self, id: i64) -> StoreResult<Value> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        records
            .iter()
            .find(|r| id_matches(r, id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Append `candidate` to the collection and rewrite the roster
    /// document.
    ///
    /// The candidate must carry every required field; the first missing
    /// field (in requirement-list order) fails the insert with no
    /// mutation. Extra fields are stored verbatim and ids are not checked
    /// for uniqueness.
    pub fn insert(&self, candidate: Value) -> StoreResult<Value> {
        validate_candidate(&candidate)?;

        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        records.push(candidate);

        if let Err(err) = self.persist(&records) {
            records.pop();
            return Err(err);
        }

        // push succeeded, the vec is non-empty
        Ok(records.last().cloned().unwrap_or(Value::Null))
    }

    /// Shallow-merge `patch` into the first record whose `id` equals
    /// `id`, then rewrite the roster document.
    ///
    /// Every key present in the patch overwrites or adds that key on the
    /// target; absent keys are untouched. A patch may overwrite `id`
    /// itself. A non-object patch merges nothing. `NotFound` leaves the
    /// collection untouched.
    pub fn update(&self, id: i64, patch: Value) -> StoreResult<Value> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        let index = records
            .iter()
            .position(|r| id_matches(r, id))
            .ok_or(StoreError::NotFound)?;

        let original = records[index].clone();

        if let (Some(target), Some(patch_obj)) = (records[index].as_object_mut(), patch.as_object())
        {
            for (key, value) in patch_obj {
                target.insert(key.clone(), value.clone());
            }
        }

        if let Err(err) = self.persist(&records) {
            records[index] = original;
            return Err(err);
        }

        Ok(records[index].clone())
    }

    /// Rewrite the backing document, if there is one.
    fn persist(&self, records: &[Value]) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        persistence::save_roster(path, records).inspect_err(|err| {
            Logger::error(
                "ROSTER_PERSIST_FAILED",
                &[
                    ("path", &path.display().to_string()),
                    ("reason", &err.to_string()),
                ],
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn character(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "house": "Stark",
            "animal": "Direwolf",
            "symbol": "Wolf",
            "nickname": "none",
            "role": "Lord",
            "age": 30,
            "death": null,
            "strength": "Honor"
        })
    }

    #[test]
    fn test_list_slices_in_insertion_order() {
        let store = CharacterStore::with_records(vec![
            character(1, "Ned"),
            character(2, "Catelyn"),
            character(3, "Robb"),
        ]);

        let page = store.list(1, 2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0]["name"], "Catelyn");
        assert_eq!(page[1]["name"], "Robb");
    }

    #[test]
    fn test_list_degrades_past_the_end() {
        let store = CharacterStore::with_records(vec![character(1, "Ned")]);
        assert!(store.list(5, 3).unwrap().is_empty());
        assert!(store.list(0, 0).unwrap().is_empty());
        assert_eq!(store.list(0, usize::MAX).unwrap().len(), 1);
        assert!(store.list(usize::MAX, usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_get_by_id_first_match_wins() {
        let store = CharacterStore::with_records(vec![
            character(7, "first seven"),
            character(7, "second seven"),
        ]);

        let found = store.get_by_id(7).unwrap();
        assert_eq!(found["name"], "first seven");
    }

    #[test]
    fn test_insert_rejects_missing_field_without_mutation() {
        let store = CharacterStore::in_memory();

        let mut candidate = character(1, "Ned");
        candidate.as_object_mut().unwrap().remove("strength");

        let err = store.insert(candidate).unwrap_err();
        assert!(matches!(err, StoreError::MissingRequirement("strength")));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_insert_preserves_extra_fields_and_duplicate_ids() {
        let store = CharacterStore::with_records(vec![character(1, "Ned")]);

        let mut dup = character(1, "Imposter");
        dup.as_object_mut()
            .unwrap()
            .insert("allegiance".to_string(), json!("Unknown"));

        let stored = store.insert(dup).unwrap();
        assert_eq!(stored["allegiance"], "Unknown");
        assert_eq!(store.len(), 2);
        // Lookup still resolves to the original insert.
        assert_eq!(store.get_by_id(1).unwrap()["name"], "Ned");
    }

    #[test]
    fn test_update_shallow_merge() {
        let store = CharacterStore::with_records(vec![character(1, "Ned")]);

        let updated = store.update(1, json!({"age": 99, "title": "Hand"})).unwrap();
        assert_eq!(updated["age"], 99);
        assert_eq!(updated["title"], "Hand");
        assert_eq!(updated["name"], "Ned");
        assert_eq!(updated["house"], "Stark");
    }

    #[test]
    fn test_update_can_overwrite_id() {
        let store = CharacterStore::with_records(vec![character(1, "Ned")]);

        store.update(1, json!({"id": 42})).unwrap();
        assert!(matches!(store.get_by_id(1), Err(StoreError::NotFound)));
        assert_eq!(store.get_by_id(42).unwrap()["name"], "Ned");
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let store = CharacterStore::with_records(vec![character(1, "Ned")]);
        assert!(matches!(
            store.update(999, json!({"age": 1})),
            Err(StoreError::NotFound)
        ));
        assert_eq!(store.get_by_id(1).unwrap()["age"], 30);
    }
}
