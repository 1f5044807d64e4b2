use std::collections::BTreeMap;

use crate::models::domain::{Attempt, ModuleScoreEntry, PASS_THRESHOLD};

/// Pure reduction of raw attempt history into per-module best-score
/// entries. Stateless; safe to re-run on the same input at any time.
pub struct ScoreReducer;

impl ScoreReducer {
    /// Groups attempts by module and keeps the best score per group.
    ///
    /// Malformed attempts (out-of-range or non-finite scores, missing ids)
    /// are skipped and logged so they cannot poison the aggregates.
    /// Modules with no attempts get no entry at all: not-started is
    /// distinct from scored-zero.
    pub fn reduce(attempts: &[Attempt]) -> BTreeMap<String, ModuleScoreEntry> {
        let mut entries: BTreeMap<String, ModuleScoreEntry> = BTreeMap::new();

        for attempt in attempts {
            if !attempt.is_well_formed() {
                log::warn!(
                    "Skipping malformed attempt '{}' (student '{}', module '{}', score {})",
                    attempt.id,
                    attempt.student_id,
                    attempt.module_id,
                    attempt.score
                );
                continue;
            }

            match entries.get_mut(&attempt.module_id) {
                Some(entry) => {
                    if attempt.score > entry.best_score {
                        entry.best_score = attempt.score;
                        entry.is_completed = entry.best_score >= PASS_THRESHOLD;
                    }
                    entry.attempt_count += 1;
                    if attempt.completed_at > entry.last_attempt_at {
                        entry.last_attempt_at = attempt.completed_at;
                    }
                }
                None => {
                    entries.insert(
                        attempt.module_id.clone(),
                        ModuleScoreEntry::new(
                            &attempt.module_id,
                            attempt.score,
                            1,
                            attempt.completed_at,
                        ),
                    );
                }
            }
        }

        entries
    }

    /// Reduction narrowed to a single module.
    pub fn reduce_module(module_id: &str, attempts: &[Attempt]) -> Option<ModuleScoreEntry> {
        let mut entries = Self::reduce(attempts);
        entries.remove(module_id)
    }
}
