//! Character store subsystem for rosterdb
//!
//! The store holds the canonical roster: an ordered collection of
//! character records loaded once from a single JSON document.
//!
//! # Design Principles
//!
//! - Insertion order is collection order (also pagination order)
//! - No deletes; the collection only grows or is patched in place
//! - Write-through: every successful mutation rewrites the document
//! - Rollback on persistence failure; memory never diverges from disk
//! - Duplicate ids tolerated; first match by insertion order wins

mod character;
mod errors;
mod persistence;
mod store;

pub use character::{id_matches, validate_candidate, REQUIRED_FIELDS};
pub use errors::{StoreError, StoreResult};
pub use persistence::{load_roster, save_roster, LoadOutcome};
pub use store::CharacterStore;
