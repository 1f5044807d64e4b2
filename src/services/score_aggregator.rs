use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Attempt, ClassConfig, ModuleScoreEntry, StudentProfile, UnifiedScoreRecord},
    models::dto::request::RecordAttemptRequest,
    repositories::{AttemptRepository, UnifiedScoreRepository},
    services::{
        module_access, score_reducer::ScoreReducer, score_sources::ScoreSourceChain,
    },
};

/// Outcome of one reconciliation run over a roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub students_processed: u32,
    pub records_written: u32,
    pub students_failed: u32,
}

/// Combines per-module best scores into the persisted per-student record.
pub struct UnifiedScoreService {
    attempts: Arc<dyn AttemptRepository>,
    unified_scores: Arc<dyn UnifiedScoreRepository>,
    score_sources: ScoreSourceChain,
}

impl UnifiedScoreService {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        unified_scores: Arc<dyn UnifiedScoreRepository>,
        score_sources: ScoreSourceChain,
    ) -> Self {
        Self {
            attempts,
            unified_scores,
            score_sources,
        }
    }

    /// Records one submission and folds it into the student's unified
    /// record. The raw attempt is appended first; losing the merge race
    /// never loses the attempt itself.
    ///
    /// Submissions for modules the class config has locked or never made
    /// eligible are rejected before anything is written.
    pub async fn record_attempt(
        &self,
        request: RecordAttemptRequest,
        class_config: &ClassConfig,
    ) -> AppResult<UnifiedScoreRecord> {
        request.validate()?;

        if !module_access::is_module_unlocked(class_config, &request.module_id) {
            return Err(AppError::ValidationError(format!(
                "Module '{}' is not open for attempts in class '{}'",
                request.module_id, class_config.class_id
            )));
        }

        let attempt = Attempt::from_request(request);
        let attempt = self.attempts.record(attempt).await?;

        let module_attempts = self
            .attempts
            .find_by_student_module(&attempt.student_id, &attempt.module_id)
            .await?;

        let entry = ScoreReducer::reduce_module(&attempt.module_id, &module_attempts)
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Attempt '{}' was recorded but reduced to no module entry",
                    attempt.id
                ))
            })?;

        self.unified_scores
            .merge_entries(
                &attempt.student_id,
                vec![entry],
                class_config.eligible_module_count(),
            )
            .await
    }

    /// Rebuilds a student's record from the raw stores and merges it in.
    ///
    /// The attempt feed is authoritative; the legacy snapshot sources are
    /// only consulted for eligible modules the feed knows nothing about.
    /// If the feed is unreachable the error propagates: treating it as an
    /// empty history would erase best scores downstream.
    pub async fn recompute_student(
        &self,
        student_id: &str,
        class_config: &ClassConfig,
    ) -> AppResult<UnifiedScoreRecord> {
        let attempts = self.attempts.find_by_student(student_id).await?;
        let mut entries = ScoreReducer::reduce(&attempts);

        for module_id in &class_config.eligible_modules {
            if entries.contains_key(module_id) {
                continue;
            }
            if let Some(hit) = self.score_sources.resolve(student_id, module_id).await? {
                log::info!(
                    "Backfilling module '{}' for student '{}' from legacy source '{}'",
                    module_id,
                    student_id,
                    hit.source
                );
                let recorded_at = hit.recorded_at.unwrap_or_else(chrono::Utc::now);
                entries.insert(
                    module_id.clone(),
                    ModuleScoreEntry::new(module_id, hit.score, 1, recorded_at),
                );
            }
        }

        if entries.is_empty() {
            // Never started: leave no record behind rather than writing an
            // all-zero one.
            if let Some(existing) = self.unified_scores.find_by_student(student_id).await? {
                return Ok(existing);
            }
            return Err(AppError::NotFound(format!(
                "Student '{}' has no recorded activity",
                student_id
            )));
        }

        self.unified_scores
            .merge_entries(
                student_id,
                entries.into_values().collect(),
                class_config.eligible_module_count(),
            )
            .await
    }

    /// The on-demand reconciliation job: recomputes every student on the
    /// roster. Idempotent; a second run over the same data changes
    /// nothing. Per-student failures are logged and counted, not
    /// swallowed into empty records.
    pub async fn reconcile_students(
        &self,
        students: &[StudentProfile],
        class_config: &ClassConfig,
    ) -> AppResult<ReconcileSummary> {
        let mut summary = ReconcileSummary::default();

        for student in students {
            summary.students_processed += 1;
            match self.recompute_student(&student.student_id, class_config).await {
                Ok(record) => {
                    summary.records_written += 1;
                    log::info!(
                        "Reconciled student '{}': total {:.1}, {} module(s) completed",
                        student.student_id,
                        record.total_score,
                        record.completed_module_count
                    );
                }
                Err(AppError::NotFound(_)) => {
                    log::info!(
                        "Student '{}' has no activity in any source, skipping",
                        student.student_id
                    );
                }
                Err(err) => {
                    summary.students_failed += 1;
                    log::error!(
                        "Failed to reconcile student '{}': {}",
                        student.student_id,
                        err
                    );
                }
            }
        }

        Ok(summary)
    }

    pub async fn get_student_record(&self, student_id: &str) -> AppResult<UnifiedScoreRecord> {
        self.unified_scores
            .find_by_student(student_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Unified score record for student '{}' not found",
                    student_id
                ))
            })
    }
}
