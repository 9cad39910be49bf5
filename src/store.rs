//! Progress store: the done set and point total.
//!
//! The store is the single writer for progress state. Every successful
//! mutation is persisted to the database immediately, on the same thread, so
//! in-memory state and storage cannot diverge by more than one mutation.
//!
//! `points` is an incrementally updated counter, not recomputed from the done
//! set on every toggle. It can therefore drift from
//! `sum(points(difficulty) for id in done)` after a dataset swap leaves stale
//! ids behind; `recompute_points` exists as a consistency check.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::models::{Problem, Snapshot};
use crate::storage::{ProgressDb, StorageError};

/// Result of a `set_done` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Transitioned todo -> done; the celebration effect should fire
    Marked,
    /// Transitioned done -> todo
    Unmarked,
    /// Desired state already matched; nothing was written
    NoChange,
}

pub struct ProgressStore {
    done: HashSet<String>,
    points: f64,
    db: ProgressDb,
}

impl ProgressStore {
    /// Restore progress from storage. Each key defaults independently when
    /// missing or corrupt.
    pub fn load(db: ProgressDb) -> Self {
        let done = db.load_done();
        let points = db.load_points();
        debug!(done = done.len(), points, "restored progress from storage");
        Self { done, points, db }
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.done.contains(id)
    }

    pub fn done(&self) -> &HashSet<String> {
        &self.done
    }

    pub fn done_count(&self) -> usize {
        self.done.len()
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    /// Set the done state of a problem. Idempotent: when the desired state
    /// already holds, nothing is mutated or persisted.
    pub fn set_done(
        &mut self,
        problem: &Problem,
        desired: bool,
    ) -> Result<ToggleOutcome, StorageError> {
        let already = self.done.contains(&problem.id);
        let outcome = if desired && !already {
            self.done.insert(problem.id.clone());
            self.points += problem.difficulty.points();
            ToggleOutcome::Marked
        } else if !desired && already {
            self.done.remove(&problem.id);
            self.points -= problem.difficulty.points();
            ToggleOutcome::Unmarked
        } else {
            return Ok(ToggleOutcome::NoChange);
        };

        self.persist()?;
        Ok(outcome)
    }

    /// Clear all progress. Callers gate this on user confirmation.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.done.clear();
        self.points = 0.0;
        self.persist()
    }

    /// Serializable copy of the current state; no mutation
    pub fn export_snapshot(&self) -> Snapshot {
        let mut done: Vec<String> = self.done.iter().cloned().collect();
        done.sort();
        Snapshot {
            done,
            points: self.points,
        }
    }

    /// Apply a progress snapshot parsed from an import file.
    ///
    /// Partial payloads are partially applied: `done` is replaced only when
    /// the field is an array (string elements kept), `points` only when the
    /// value is numeric. The result is persisted even when neither field
    /// applied, matching the original toggle/save path.
    pub fn import_snapshot(&mut self, raw: &Value) -> Result<(), StorageError> {
        if let Some(ids) = raw.get("done").and_then(Value::as_array) {
            self.done = ids
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
        if let Some(points) = raw.get("points").and_then(Value::as_f64) {
            self.points = points;
        }
        self.persist()
    }

    /// What `points` would be if recomputed from the done set against the
    /// currently loaded problems. Stale ids contribute nothing.
    pub fn recompute_points(&self, problems: &[Problem]) -> f64 {
        problems
            .iter()
            .filter(|p| self.done.contains(&p.id))
            .map(|p| p.difficulty.points())
            .sum()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let ProgressStore { done, points, db } = self;
        db.save(done, *points)
    }
}
