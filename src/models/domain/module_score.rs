use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum best score for a module to count as completed.
pub const PASS_THRESHOLD: f64 = 70.0;

/// Best-attempt summary for one (student, module) pair. Derived entirely
/// from the attempt history; `best_score` never decreases.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ModuleScoreEntry {
    pub module_id: String,
    pub best_score: f64,
    pub attempt_count: u32,
    pub is_completed: bool,
    pub last_attempt_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ModuleStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ModuleScoreEntry {
    pub fn new(module_id: &str, best_score: f64, attempt_count: u32, last_attempt_at: DateTime<Utc>) -> Self {
        ModuleScoreEntry {
            module_id: module_id.to_string(),
            best_score,
            attempt_count,
            is_completed: best_score >= PASS_THRESHOLD,
            last_attempt_at,
        }
    }

    pub fn status(&self) -> ModuleStatus {
        if self.is_completed {
            ModuleStatus::Completed
        } else {
            ModuleStatus::InProgress
        }
    }

    /// Folds a newer derivation of the same module into this entry.
    ///
    /// Best score is sticky: a later derivation with a lower best never
    /// lowers the stored one, and a completed module never reverts to
    /// in-progress. Attempt counts and timestamps only move forward, which
    /// keeps the merge safe to replay.
    pub fn absorb(&mut self, other: &ModuleScoreEntry) {
        if other.best_score > self.best_score {
            self.best_score = other.best_score;
        }
        self.attempt_count = self.attempt_count.max(other.attempt_count);
        if other.last_attempt_at > self.last_attempt_at {
            self.last_attempt_at = other.last_attempt_at;
        }
        self.is_completed = self.is_completed || self.best_score >= PASS_THRESHOLD;
    }
}
