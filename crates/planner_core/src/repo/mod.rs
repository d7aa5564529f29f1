//! Collection persistence over the key-value store.
//!
//! # Responsibility
//! - Round-trip whole task/goal collections under their namespace keys.
//! - Turn absent or corrupt payloads into an explicit, non-fatal outcome.
//!
//! # Invariants
//! - Saves are full overwrites of one namespace key.
//! - Loads never fail on payload content; only backend errors propagate.

pub mod collection_repo;
