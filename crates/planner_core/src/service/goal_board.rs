//! Goal controller for the Goals screen.
//!
//! # Responsibility
//! - Load the goal collection once per screen activation.
//! - Add/delete goals and adjust progress, persisting after each.
//!
//! # Invariants
//! - `adjust_progress` clamps to `[0, target]` and always rewrites the
//!   collection, even when the clamp leaves `current` unchanged.

use super::board_error::BoardResult;
use super::screen::Screen;
use crate::model::goal::Goal;
use crate::model::ValidationError;
use crate::repo::collection_repo::CollectionRepository;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use log::{debug, info};

/// In-memory goal collection bound to one store.
pub struct GoalBoard<S: KeyValueStore> {
    repo: CollectionRepository<S>,
    goals: Vec<Goal>,
}

impl<S: KeyValueStore> GoalBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            repo: CollectionRepository::new(store),
            goals: Vec::new(),
        }
    }

    /// Creates a board and runs `initialize`.
    pub fn open(store: S) -> BoardResult<Self> {
        let mut board = Self::new(store);
        board.initialize()?;
        Ok(board)
    }

    /// Replaces in-memory state with the stored collection.
    pub fn initialize(&mut self) -> BoardResult<()> {
        let outcome = self.repo.load_goals()?;
        let state = outcome.label();
        let rejected = outcome.rejected();
        self.goals = outcome.into_items();
        info!(
            "event=board_init module=goal_board status=ok screen={} outcome={} count={} rejected={}",
            Screen::Goals,
            state,
            self.goals.len(),
            rejected
        );
        Ok(())
    }

    /// All goals in insertion order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    /// Appends a goal with zero progress and persists the collection.
    ///
    /// Blank `description` is stored as absent.
    ///
    /// # Errors
    /// - `Validation(EmptyTitle)` for a blank title.
    /// - `Validation(NonPositiveTarget)` when `target <= 0`.
    pub fn add_goal(
        &mut self,
        title: &str,
        description: &str,
        target: i64,
        deadline: Option<NaiveDate>,
    ) -> BoardResult<Goal> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let goal = Goal::new(title, Some(description), target, deadline)?;

        let mut next = self.goals.clone();
        next.push(goal.clone());
        self.commit(next)?;

        info!(
            "event=goal_add module=goal_board status=ok goal_id={} target={} count={}",
            goal.id,
            goal.target,
            self.goals.len()
        );
        Ok(goal)
    }

    /// Removes the matching goal. Returns whether a goal was removed.
    pub fn delete_goal(&mut self, id: &str) -> BoardResult<bool> {
        let before = self.goals.len();
        let next: Vec<Goal> = self
            .goals
            .iter()
            .filter(|goal| goal.id != id)
            .cloned()
            .collect();
        let removed = next.len() != before;
        self.commit(next)?;

        if removed {
            info!(
                "event=goal_delete module=goal_board status=ok goal_id={} count={}",
                id,
                self.goals.len()
            );
        } else {
            debug!("event=goal_delete module=goal_board status=miss goal_id={id}");
        }
        Ok(removed)
    }

    /// Moves progress by `delta`, clamped to `[0, target]`.
    ///
    /// Returns the updated goal, or `None` when no goal has `id`.
    pub fn adjust_progress(&mut self, id: &str, delta: i64) -> BoardResult<Option<Goal>> {
        let mut adjusted = None;
        let next = self
            .goals
            .iter()
            .map(|goal| {
                if goal.id == id {
                    let updated = goal.with_progress(delta);
                    adjusted = Some(updated.clone());
                    updated
                } else {
                    goal.clone()
                }
            })
            .collect();
        self.commit(next)?;

        match &adjusted {
            Some(goal) => info!(
                "event=goal_progress module=goal_board status=ok goal_id={} delta={} current={} target={}",
                goal.id, delta, goal.current, goal.target
            ),
            None => debug!("event=goal_progress module=goal_board status=miss goal_id={id}"),
        }
        Ok(adjusted)
    }

    fn commit(&mut self, next: Vec<Goal>) -> BoardResult<()> {
        self.repo.save_goals(&next)?;
        self.goals = next;
        Ok(())
    }
}
