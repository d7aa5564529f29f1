use chrono::NaiveDate;
use planner_core::{
    BoardError, Goal, GoalBoard, KeyValueStore, MemoryKeyValueStore, StoreError, StoreResult,
    ValidationError, GOALS_KEY,
};
use std::cell::Cell;
use std::collections::HashSet;

/// Memory store whose writes can be switched to fail like a locked database.
#[derive(Default)]
struct FailingWrites {
    inner: MemoryKeyValueStore,
    failing: Cell<bool>,
}

impl KeyValueStore for FailingWrites {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if self.failing.get() {
            return Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        self.inner.set(key, value)
    }
}

fn stored_goals(store: &MemoryKeyValueStore) -> Vec<Goal> {
    let bytes = store.get(GOALS_KEY).unwrap().unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn add_goal_starts_at_zero_and_persists() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();
    let deadline = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

    let goal = board
        .add_goal(" Read 20 chapters ", " novels ", 20, Some(deadline))
        .unwrap();

    assert_eq!(goal.title, "Read 20 chapters");
    assert_eq!(goal.description.as_deref(), Some("novels"));
    assert_eq!(goal.current, 0);
    assert_eq!(goal.deadline, Some(deadline));
    assert_eq!(stored_goals(&store), vec![goal]);
}

#[test]
fn add_goal_validation_failure_changes_nothing() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();

    let err = board.add_goal("", "", 10, None).unwrap_err();
    assert!(matches!(err, BoardError::Validation(ValidationError::EmptyTitle)));
    let err = board.add_goal("Read", "", 0, None).unwrap_err();
    assert!(matches!(
        err,
        BoardError::Validation(ValidationError::NonPositiveTarget(0))
    ));
    let err = board.add_goal("Read", "", -3, None).unwrap_err();
    assert!(err.is_validation());

    assert!(board.goals().is_empty());
    assert_eq!(store.write_count(), 0);
}

#[test]
fn progress_past_target_clamps_to_target() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();
    let goal = board.add_goal("Read 20 chapters", "", 20, None).unwrap();

    let updated = board.adjust_progress(&goal.id, 25).unwrap().unwrap();

    assert_eq!(updated.current, 20);
    assert!(updated.is_achieved());
    assert_eq!(stored_goals(&store)[0].current, 20);
}

#[test]
fn progress_below_zero_clamps_to_zero() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();
    let goal = board.add_goal("Read 20 chapters", "", 20, None).unwrap();
    board.adjust_progress(&goal.id, 3).unwrap();

    let updated = board.adjust_progress(&goal.id, -5).unwrap().unwrap();

    assert_eq!(updated.current, 0);
}

#[test]
fn clamp_invariant_holds_after_every_adjustment() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();
    let small = board.add_goal("small", "", 3, None).unwrap();
    let large = board.add_goal("large", "", 100, None).unwrap();
    let deltas = [1, 5, -2, -10, 7, 1, -1, 250, -99, 0, i64::MAX, i64::MIN];

    for delta in deltas {
        for id in [&small.id, &large.id] {
            board.adjust_progress(id, delta).unwrap();
            for goal in board.goals() {
                assert!(
                    (0..=goal.target).contains(&goal.current),
                    "goal {} out of range after delta {delta}",
                    goal.id
                );
            }
        }
    }
}

#[test]
fn saturated_adjustment_still_rewrites_collection() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();
    let goal = board.add_goal("Read", "", 2, None).unwrap();
    let writes = store.write_count();

    let updated = board.adjust_progress(&goal.id, -1).unwrap().unwrap();

    assert_eq!(updated.current, 0);
    assert_eq!(store.write_count(), writes + 1);
}

#[test]
fn misses_leave_goals_unchanged() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();
    board.add_goal("a", "", 5, None).unwrap();
    board.add_goal("b", "", 6, None).unwrap();
    let before = board.goals().to_vec();
    let writes = store.write_count();

    assert!(board.adjust_progress("missing", 3).unwrap().is_none());
    assert!(!board.delete_goal("missing").unwrap());

    assert_eq!(board.goals(), before.as_slice());
    assert_eq!(stored_goals(&store), before);
    assert_eq!(store.write_count(), writes + 2);
}

#[test]
fn failed_writes_keep_last_persisted_goals() {
    let store = FailingWrites::default();
    let mut board = GoalBoard::open(&store).unwrap();
    let goal = board.add_goal("Read 20 chapters", "", 20, None).unwrap();
    board.adjust_progress(&goal.id, 4).unwrap();
    let before = board.goals().to_vec();
    store.failing.set(true);

    let err = board.add_goal("Vocab", "daily", 500, None).unwrap_err();
    assert!(matches!(err, BoardError::Store(StoreError::Sqlite(_))));
    assert!(matches!(
        board.adjust_progress(&goal.id, 3).unwrap_err(),
        BoardError::Store(_)
    ));
    assert!(matches!(
        board.delete_goal(&goal.id).unwrap_err(),
        BoardError::Store(_)
    ));

    assert_eq!(board.goals(), before.as_slice());
    assert_eq!(board.get(&goal.id).unwrap().current, 4);
    assert_eq!(stored_goals(&store.inner), before);
    assert_eq!(store.inner.write_count(), 2);
}

#[test]
fn delete_goal_removes_by_id_and_ids_stay_unique() {
    let store = MemoryKeyValueStore::new();
    let mut board = GoalBoard::open(&store).unwrap();
    let ids: Vec<String> = (0..10)
        .map(|index| board.add_goal(&format!("goal {index}"), "", 10, None).unwrap().id)
        .collect();
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 10);

    assert!(board.delete_goal(&ids[4]).unwrap());
    assert!(board.get(&ids[4]).is_none());
    assert_eq!(board.goals().len(), 9);
    assert_eq!(stored_goals(&store).len(), 9);
}

#[test]
fn reinitialize_adopts_stored_state() {
    let store = MemoryKeyValueStore::new();
    {
        let mut board = GoalBoard::open(&store).unwrap();
        let goal = board.add_goal("Read", "", 10, None).unwrap();
        board.adjust_progress(&goal.id, 4).unwrap();
    }

    let board = GoalBoard::open(&store).unwrap();
    assert_eq!(board.goals().len(), 1);
    assert_eq!(board.goals()[0].current, 4);
    assert_eq!(board.goals()[0].progress_percent(), 40);
}
