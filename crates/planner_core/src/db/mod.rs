//! SQLite bootstrap for the durable key-value store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the planner.
//! - Bring the schema up to date before any key is read or written.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A database written by a newer binary is refused, never downgraded.
//! - Failures are reported as `StoreError`, the same type store reads and
//!   writes use.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
