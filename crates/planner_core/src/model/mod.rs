//! Domain model for planner tasks and goals.
//!
//! # Responsibility
//! - Define the canonical record shapes persisted by the planner.
//! - Own the fixed subject/priority enumerations used for validation and
//!   rendering.
//!
//! # Invariants
//! - Every record is identified by an opaque, non-empty `RecordId`.
//! - Records reject unknown fields on decode; there are no extension points.
//! - `0 <= Goal::current <= Goal::target` after any mutation.

pub mod calendar;
pub mod goal;
pub mod task;
mod validation;
mod wire;

pub use validation::ValidationError;

/// Opaque identifier shared by task and goal records.
///
/// Stored as a plain string so ids written by older clients (for example
/// millisecond timestamps) load unchanged.
pub type RecordId = String;

/// Generates a fresh record id.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::new_v4().to_string()
}
