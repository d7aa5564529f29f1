//! Whole-collection load/save for tasks and goals.
//!
//! # Responsibility
//! - Encode collections as JSON arrays under fixed namespace keys.
//! - Decode stored arrays record by record, dropping records that do not
//!   match the expected shape.
//!
//! # Invariants
//! - A payload that is not a JSON array is `Corrupt`; callers see it as an
//!   empty collection.
//! - Loaded collections never contain two records with the same id.
//! - Loaded goals always satisfy `0 <= current <= target`.

use crate::model::goal::{clamp_progress, Goal};
use crate::model::task::Task;
use crate::model::ValidationError;
use crate::store::{KeyValueStore, StoreError, StoreResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

pub const TODOS_KEY: &str = "study-planner-todos";
pub const GOALS_KEY: &str = "study-planner-goals";

/// Independently addressable persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Todos,
    Goals,
}

impl Namespace {
    pub fn key(self) -> &'static str {
        match self {
            Self::Todos => TODOS_KEY,
            Self::Goals => GOALS_KEY,
        }
    }
}

/// Result of reading one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    /// Nothing has been stored under the key yet.
    Missing,
    /// Stored bytes are not a JSON array.
    Corrupt { reason: String },
    /// Array decoded; `rejected` counts records that were dropped.
    Loaded { items: Vec<T>, rejected: usize },
}

impl<T> LoadOutcome<T> {
    /// Collapses the outcome to the externally visible collection.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Loaded { items, .. } => items,
            Self::Missing | Self::Corrupt { .. } => Vec::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }

    /// Short name used in `outcome=` log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Corrupt { .. } => "corrupt",
            Self::Loaded { .. } => "loaded",
        }
    }

    pub fn rejected(&self) -> usize {
        match self {
            Self::Loaded { rejected, .. } => *rejected,
            Self::Missing | Self::Corrupt { .. } => 0,
        }
    }
}

/// Record type stored as one element of a namespace array.
pub trait StoredRecord: Serialize + DeserializeOwned {
    const NAMESPACE: Namespace;

    fn record_id(&self) -> &str;

    /// Accepts, repairs or rejects a decoded record.
    fn admit(self) -> Result<Self, ValidationError>;
}

impl StoredRecord for Task {
    const NAMESPACE: Namespace = Namespace::Todos;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn admit(self) -> Result<Self, ValidationError> {
        self.validate()?;
        Ok(self)
    }
}

impl StoredRecord for Goal {
    const NAMESPACE: Namespace = Namespace::Goals;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn admit(self) -> Result<Self, ValidationError> {
        let repaired = Self {
            current: clamp_progress(self.current, self.target),
            ..self
        };
        repaired.validate()?;
        Ok(repaired)
    }
}

/// Collection persistence over an injected key-value store.
pub struct CollectionRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CollectionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads and decodes the namespace for `T`.
    ///
    /// # Errors
    /// - Only backend read failures; payload problems become `Missing` or
    ///   `Corrupt`.
    pub fn load<T: StoredRecord>(&self) -> StoreResult<LoadOutcome<T>> {
        let namespace = T::NAMESPACE;
        let outcome = match self.store.get(namespace.key())? {
            None => LoadOutcome::Missing,
            Some(bytes) if bytes.is_empty() => LoadOutcome::Missing,
            Some(bytes) => decode_collection::<T>(&bytes),
        };

        match &outcome {
            LoadOutcome::Missing => {
                debug!("event=collection_load module=repo status=missing key={}", namespace.key());
            }
            LoadOutcome::Corrupt { reason } => {
                warn!(
                    "event=collection_load module=repo status=corrupt key={} reason={}",
                    namespace.key(),
                    reason
                );
            }
            LoadOutcome::Loaded { items, rejected } => {
                debug!(
                    "event=collection_load module=repo status=ok key={} count={} rejected={}",
                    namespace.key(),
                    items.len(),
                    rejected
                );
            }
        }

        Ok(outcome)
    }

    /// Encodes `items` and overwrites the namespace for `T`.
    pub fn save<T: StoredRecord>(&self, items: &[T]) -> StoreResult<()> {
        let namespace = T::NAMESPACE;
        let bytes = serde_json::to_vec(items).map_err(StoreError::Encode)?;
        self.store.set(namespace.key(), &bytes)?;
        debug!(
            "event=collection_save module=repo status=ok key={} count={} bytes={}",
            namespace.key(),
            items.len(),
            bytes.len()
        );
        Ok(())
    }

    pub fn load_tasks(&self) -> StoreResult<LoadOutcome<Task>> {
        self.load()
    }

    /// Stored tasks, or an empty collection when absent or corrupt.
    pub fn load_tasks_or_default(&self) -> StoreResult<Vec<Task>> {
        Ok(self.load_tasks()?.into_items())
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        self.save(tasks)
    }

    pub fn load_goals(&self) -> StoreResult<LoadOutcome<Goal>> {
        self.load()
    }

    pub fn load_goals_or_default(&self) -> StoreResult<Vec<Goal>> {
        Ok(self.load_goals()?.into_items())
    }

    pub fn save_goals(&self, goals: &[Goal]) -> StoreResult<()> {
        self.save(goals)
    }
}

fn decode_collection<T: StoredRecord>(bytes: &[u8]) -> LoadOutcome<T> {
    // Why: serde_json messages can quote stored text; only the category and
    // position go into logs and the outcome.
    let elements: Vec<serde_json::Value> = match serde_json::from_slice(bytes) {
        Ok(elements) => elements,
        Err(err) => {
            return LoadOutcome::Corrupt {
                reason: format!(
                    "{:?} error at line {} column {}",
                    err.classify(),
                    err.line(),
                    err.column()
                ),
            };
        }
    };

    let mut seen_ids = HashSet::new();
    let mut items = Vec::with_capacity(elements.len());
    let mut rejected = 0;

    for (index, element) in elements.into_iter().enumerate() {
        let admitted = serde_json::from_value::<T>(element)
            .map_err(|_| "shape")
            .and_then(|record| record.admit().map_err(|_| "invalid"));

        match admitted {
            Ok(record) if seen_ids.insert(record.record_id().to_string()) => items.push(record),
            Ok(_) => {
                rejected += 1;
                warn!(
                    "event=record_rejected module=repo key={} index={} reason=duplicate_id",
                    T::NAMESPACE.key(),
                    index
                );
            }
            Err(reason) => {
                rejected += 1;
                warn!(
                    "event=record_rejected module=repo key={} index={} reason={}",
                    T::NAMESPACE.key(),
                    index,
                    reason
                );
            }
        }
    }

    LoadOutcome::Loaded { items, rejected }
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, LoadOutcome};
    use crate::model::goal::Goal;
    use crate::model::task::Task;

    #[test]
    fn non_array_payload_is_corrupt() {
        let outcome = decode_collection::<Task>(br#"{"id":"1"}"#);
        assert!(outcome.is_corrupt());
        assert!(outcome.into_items().is_empty());
    }

    #[test]
    fn outcome_labels_name_each_variant() {
        assert_eq!(LoadOutcome::<Task>::Missing.label(), "missing");
        assert_eq!(decode_collection::<Task>(b"null").label(), "corrupt");
        assert_eq!(decode_collection::<Task>(b"[]").label(), "loaded");
    }

    #[test]
    fn truncated_payload_is_corrupt() {
        let outcome = decode_collection::<Task>(br#"[{"id":"1","title":"#);
        assert!(outcome.is_corrupt());
    }

    #[test]
    fn out_of_range_goal_progress_is_clamped_on_load() {
        let payload = br#"[{"id":"g1","title":"Read","description":"","target":10,"current":14,"deadline":""}]"#;
        let outcome = decode_collection::<Goal>(payload);
        let LoadOutcome::Loaded { items, rejected } = outcome else {
            panic!("expected loaded outcome");
        };
        assert_eq!(rejected, 0);
        assert_eq!(items[0].current, 10);
    }
}
