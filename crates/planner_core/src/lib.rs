//! Core persistence and view-state logic for the study planner.
//! Front ends call the boards; they never touch the store directly.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::PlannerConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::calendar::{format_iso_date, parse_iso_date, today_local};
pub use model::goal::Goal;
pub use model::task::{Priority, Subject, Task};
pub use model::{RecordId, ValidationError};
pub use repo::collection_repo::{
    CollectionRepository, LoadOutcome, Namespace, StoredRecord, GOALS_KEY, TODOS_KEY,
};
pub use service::board_error::{BoardError, BoardResult};
pub use service::goal_board::GoalBoard;
pub use service::screen::Screen;
pub use service::task_board::{DaySummary, TaskBoard};
pub use store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
