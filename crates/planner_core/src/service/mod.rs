//! Per-screen view-state controllers.
//!
//! # Responsibility
//! - Hold the authoritative in-memory collection for one screen.
//! - Apply mutate-then-persist operations and expose derived views.
//!
//! # Invariants
//! - Every mutation writes the whole collection exactly once.
//! - In-memory state only changes after the write succeeds.

pub mod board_error;
pub mod goal_board;
pub mod screen;
pub mod task_board;
