//! Task controller for the Today and Planner screens.
//!
//! # Responsibility
//! - Load the task collection once per screen activation.
//! - Filter tasks by date and derive per-day completion statistics.
//! - Add/toggle/delete tasks and persist the full collection after each.
//!
//! # Invariants
//! - Updates map the whole collection; no record is mutated in place.
//! - `filter_by_date` keeps insertion order and never mutates state.
//! - A miss on toggle/delete still rewrites the unchanged collection.

use super::board_error::BoardResult;
use super::screen::Screen;
use crate::model::calendar::today_local;
use crate::model::goal::percent_of;
use crate::model::task::{Priority, Subject, Task};
use crate::model::ValidationError;
use crate::repo::collection_repo::CollectionRepository;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use log::{debug, info};

/// Completion statistics for one day's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    /// `round(completed / total * 100)`, `0` for an empty day.
    pub percent: u8,
}

impl DaySummary {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let (total, completed) = tasks.into_iter().fold((0, 0), |(total, done), task| {
            (total + 1, done + usize::from(task.completed))
        });
        Self {
            total,
            completed,
            remaining: total - completed,
            percent: percent_of(completed as i64, total as i64),
        }
    }
}

/// In-memory task collection bound to one screen and one store.
pub struct TaskBoard<S: KeyValueStore> {
    repo: CollectionRepository<S>,
    screen: Screen,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskBoard<S> {
    /// Creates an empty, not yet initialized board.
    pub fn new(store: S, screen: Screen) -> Self {
        Self {
            repo: CollectionRepository::new(store),
            screen,
            tasks: Vec::new(),
        }
    }

    /// Creates a board and runs `initialize`.
    pub fn open(store: S, screen: Screen) -> BoardResult<Self> {
        let mut board = Self::new(store, screen);
        board.initialize()?;
        Ok(board)
    }

    /// Replaces in-memory state with the stored collection.
    ///
    /// Absent or corrupt data yields an empty collection.
    pub fn initialize(&mut self) -> BoardResult<()> {
        let outcome = self.repo.load_tasks()?;
        let state = outcome.label();
        let rejected = outcome.rejected();
        self.tasks = outcome.into_items();
        info!(
            "event=board_init module=task_board status=ok screen={} outcome={} count={} rejected={}",
            self.screen,
            state,
            self.tasks.len(),
            rejected
        );
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Full collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks scheduled for `date`, in insertion order.
    pub fn filter_by_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.date == date).collect()
    }

    /// Tasks scheduled for the local current date.
    pub fn today(&self) -> Vec<&Task> {
        self.filter_by_date(today_local())
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        DaySummary::from_tasks(self.filter_by_date(date))
    }

    /// Appends a new open task and persists the collection.
    ///
    /// # Errors
    /// - `Validation(EmptyTitle)` for a blank title.
    /// - `Validation(MissingSubject | UnknownSubject)` for a bad subject.
    /// - `Store` when the write fails.
    pub fn add_task(
        &mut self,
        title: &str,
        subject: &str,
        priority: Priority,
        date: NaiveDate,
    ) -> BoardResult<Task> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let subject = Subject::parse(subject)?;
        let task = Task::new(title, subject, priority, date)?;

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;

        info!(
            "event=task_add module=task_board status=ok screen={} task_id={} date={} count={}",
            self.screen,
            task.id,
            task.date,
            self.tasks.len()
        );
        Ok(task)
    }

    /// Flips `completed` on the matching task.
    ///
    /// Returns the updated task, or `None` when no task has `id`.
    pub fn toggle_task(&mut self, id: &str) -> BoardResult<Option<Task>> {
        let mut toggled = None;
        let next = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    let updated = task.toggled();
                    toggled = Some(updated.clone());
                    updated
                } else {
                    task.clone()
                }
            })
            .collect();
        self.commit(next)?;

        match &toggled {
            Some(task) => info!(
                "event=task_toggle module=task_board status=ok screen={} task_id={} completed={}",
                self.screen, task.id, task.completed
            ),
            None => debug!(
                "event=task_toggle module=task_board status=miss screen={} task_id={}",
                self.screen, id
            ),
        }
        Ok(toggled)
    }

    /// Removes the matching task. Returns whether a task was removed.
    pub fn delete_task(&mut self, id: &str) -> BoardResult<bool> {
        let before = self.tasks.len();
        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        let removed = next.len() != before;
        self.commit(next)?;

        if removed {
            info!(
                "event=task_delete module=task_board status=ok screen={} task_id={} count={}",
                self.screen,
                id,
                self.tasks.len()
            );
        } else {
            debug!(
                "event=task_delete module=task_board status=miss screen={} task_id={}",
                self.screen, id
            );
        }
        Ok(removed)
    }

    fn commit(&mut self, next: Vec<Task>) -> BoardResult<()> {
        self.repo.save_tasks(&next)?;
        self.tasks = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DaySummary;
    use crate::model::task::{Priority, Subject, Task};
    use chrono::NaiveDate;

    fn task(id: &str, completed: bool) -> Task {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut task = Task::with_id(id, "t", Subject::Math, Priority::Low, date).unwrap();
        task.completed = completed;
        task
    }

    #[test]
    fn summary_of_empty_day_is_zero() {
        assert_eq!(DaySummary::from_tasks(&[]), DaySummary::default());
    }

    #[test]
    fn summary_counts_completed_and_remaining() {
        let tasks = [task("a", true), task("b", false), task("c", false)];
        let summary = DaySummary::from_tasks(&tasks);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.remaining, 2);
        assert_eq!(summary.percent, 33);
    }
}
