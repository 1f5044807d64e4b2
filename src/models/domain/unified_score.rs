use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::module_score::{ModuleScoreEntry, ModuleStatus};

/// Denormalized per-student score record. One document per student, merged
/// on every update so concurrent writers cannot clobber unrelated modules.
///
/// Invariant: `total_score` always equals the sum of `best_score` across
/// `module_scores`; callers mutate through [`merge_entries`] which
/// recomputes the aggregates from the map.
///
/// [`merge_entries`]: UnifiedScoreRecord::merge_entries
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UnifiedScoreRecord {
    pub student_id: String,
    pub module_scores: BTreeMap<String, ModuleScoreEntry>,
    pub total_score: f64,
    pub normalized_score: f64,
    pub completed_module_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    /// Optimistic-concurrency counter bumped by the repository on every
    /// successful write.
    #[serde(default)]
    pub revision: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl UnifiedScoreRecord {
    pub fn new(student_id: &str) -> Self {
        UnifiedScoreRecord {
            student_id: student_id.to_string(),
            module_scores: BTreeMap::new(),
            total_score: 0.0,
            normalized_score: 0.0,
            completed_module_count: 0,
            last_activity: None,
            revision: 0,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Merges derived module entries into the record and recomputes the
    /// aggregates. Entries for modules not mentioned are left untouched;
    /// entries for known modules are absorbed with sticky-max semantics.
    pub fn merge_entries<I>(&mut self, entries: I, eligible_module_count: usize)
    where
        I: IntoIterator<Item = ModuleScoreEntry>,
    {
        for entry in entries {
            match self.module_scores.get_mut(&entry.module_id) {
                Some(existing) => existing.absorb(&entry),
                None => {
                    self.module_scores.insert(entry.module_id.clone(), entry);
                }
            }
        }
        self.recompute_aggregates(eligible_module_count);
        self.modified_at = Some(Utc::now());
    }

    fn recompute_aggregates(&mut self, eligible_module_count: usize) {
        self.total_score = self.module_scores.values().map(|e| e.best_score).sum();
        self.completed_module_count =
            self.module_scores.values().filter(|e| e.is_completed).count() as u32;
        self.normalized_score = if eligible_module_count == 0 {
            0.0
        } else {
            (self.total_score / (eligible_module_count as f64 * 100.0) * 100.0).min(100.0)
        };
        self.last_activity = self.module_scores.values().map(|e| e.last_attempt_at).max();
    }

    pub fn module_status(&self, module_id: &str) -> ModuleStatus {
        self.module_scores
            .get(module_id)
            .map(|entry| entry.status())
            .unwrap_or(ModuleStatus::NotStarted)
    }
}
