//! In-memory repository implementations shared by the integration tests.
#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use avalia_scores::{
    errors::{AppError, AppResult},
    models::domain::{
        Attempt, ClassConfig, ModuleScoreEntry, ProgressSnapshot, StudentProfile,
        UnifiedScoreRecord,
    },
    repositories::{
        AttemptRepository, ClassConfigRepository, ProgressSnapshotRepository, RosterRepository,
        UnifiedScoreRepository,
    },
};

pub struct InMemoryAttemptRepository {
    attempts: Arc<RwLock<Vec<Attempt>>>,
    unavailable: Arc<RwLock<bool>>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(Vec::new())),
            unavailable: Arc::new(RwLock::new(false)),
        }
    }

    /// Simulates the raw store going down.
    pub async fn set_unavailable(&self, down: bool) {
        *self.unavailable.write().await = down;
    }

    async fn find_filtered(
        &self,
        student_id: &str,
        module_id: Option<&str>,
    ) -> AppResult<Vec<Attempt>> {
        if *self.unavailable.read().await {
            return Err(AppError::SourceUnavailable(
                "attempt store is unreachable".to_string(),
            ));
        }

        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .iter()
            .filter(|a| {
                a.student_id == student_id
                    && module_id.map(|mid| a.module_id == mid).unwrap_or(true)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.completed_at.cmp(&b.completed_at));
        Ok(items)
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn record(&self, attempt: Attempt) -> AppResult<Attempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.iter().any(|a| a.id == attempt.id) {
            return Err(AppError::InternalError(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            )));
        }
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>> {
        self.find_filtered(student_id, None).await
    }

    async fn find_by_student_module(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> AppResult<Vec<Attempt>> {
        self.find_filtered(student_id, Some(module_id)).await
    }

    async fn count_for_student(&self, student_id: &str, module_id: &str) -> AppResult<u64> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.student_id == student_id && a.module_id == module_id)
            .count() as u64)
    }
}

pub struct InMemoryUnifiedScoreRepository {
    records: Arc<RwLock<HashMap<String, UnifiedScoreRecord>>>,
}

impl InMemoryUnifiedScoreRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UnifiedScoreRepository for InMemoryUnifiedScoreRepository {
    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<UnifiedScoreRecord>> {
        let records = self.records.read().await;
        Ok(records.get(student_id).cloned())
    }

    async fn find_for_students(
        &self,
        student_ids: &[String],
    ) -> AppResult<Vec<UnifiedScoreRecord>> {
        let records = self.records.read().await;
        Ok(student_ids
            .iter()
            .filter_map(|id| records.get(id).cloned())
            .collect())
    }

    async fn merge_entries(
        &self,
        student_id: &str,
        entries: Vec<ModuleScoreEntry>,
        eligible_module_count: usize,
    ) -> AppResult<UnifiedScoreRecord> {
        // Write lock held across read-merge-write: the per-student
        // serialization the contract requires.
        let mut records = self.records.write().await;
        let mut record = records
            .get(student_id)
            .cloned()
            .unwrap_or_else(|| UnifiedScoreRecord::new(student_id));
        record.merge_entries(entries, eligible_module_count);
        record.revision += 1;
        records.insert(student_id.to_string(), record.clone());
        Ok(record)
    }
}

/// Wraps a repository and fails every merge, for exercising the
/// surfaced-error path.
pub struct ConflictingUnifiedScoreRepository {
    pub inner: InMemoryUnifiedScoreRepository,
}

#[async_trait]
impl UnifiedScoreRepository for ConflictingUnifiedScoreRepository {
    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<UnifiedScoreRecord>> {
        self.inner.find_by_student(student_id).await
    }

    async fn find_for_students(
        &self,
        student_ids: &[String],
    ) -> AppResult<Vec<UnifiedScoreRecord>> {
        self.inner.find_for_students(student_ids).await
    }

    async fn merge_entries(
        &self,
        student_id: &str,
        _entries: Vec<ModuleScoreEntry>,
        _eligible_module_count: usize,
    ) -> AppResult<UnifiedScoreRecord> {
        Err(AppError::WriteConflict(format!(
            "Simulated conflict for student '{}'",
            student_id
        )))
    }
}

pub struct InMemoryRosterRepository {
    students: Arc<RwLock<Vec<StudentProfile>>>,
}

impl InMemoryRosterRepository {
    pub fn new(students: Vec<StudentProfile>) -> Self {
        Self {
            students: Arc::new(RwLock::new(students)),
        }
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn find_by_class(&self, class_id: &str) -> AppResult<Vec<StudentProfile>> {
        let students = self.students.read().await;
        let mut items: Vec<_> = students
            .iter()
            .filter(|s| s.class_id == class_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        Ok(items)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<StudentProfile>> {
        let students = self.students.read().await;
        Ok(students.iter().find(|s| s.student_id == student_id).cloned())
    }

    async fn list_class_ids(&self) -> AppResult<Vec<String>> {
        let students = self.students.read().await;
        let mut ids: Vec<String> = students.iter().map(|s| s.class_id.clone()).collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

pub struct InMemoryClassConfigRepository {
    configs: Arc<RwLock<HashMap<String, ClassConfig>>>,
}

impl InMemoryClassConfigRepository {
    pub fn new(configs: Vec<ClassConfig>) -> Self {
        Self {
            configs: Arc::new(RwLock::new(
                configs.into_iter().map(|c| (c.class_id.clone(), c)).collect(),
            )),
        }
    }
}

#[async_trait]
impl ClassConfigRepository for InMemoryClassConfigRepository {
    async fn find_by_class(&self, class_id: &str) -> AppResult<Option<ClassConfig>> {
        let configs = self.configs.read().await;
        Ok(configs.get(class_id).cloned())
    }
}

pub struct InMemoryProgressSnapshotRepository {
    snapshots: Arc<RwLock<Vec<ProgressSnapshot>>>,
}

impl InMemoryProgressSnapshotRepository {
    pub fn new(snapshots: Vec<ProgressSnapshot>) -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(snapshots)),
        }
    }
}

#[async_trait]
impl ProgressSnapshotRepository for InMemoryProgressSnapshotRepository {
    async fn find_for_module(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> AppResult<Vec<ProgressSnapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots
            .iter()
            .filter(|s| s.student_id == student_id && s.module_id == module_id)
            .cloned()
            .collect())
    }
}

pub fn make_attempt(student_id: &str, module_id: &str, score: f64, minutes_ago: i64) -> Attempt {
    let mut attempt = Attempt::new(student_id, module_id, score);
    attempt.completed_at = Utc::now() - Duration::minutes(minutes_ago);
    attempt
}

pub fn make_snapshot(
    student_id: &str,
    module_id: &str,
    score: Option<f64>,
    minutes_ago: i64,
) -> ProgressSnapshot {
    ProgressSnapshot {
        student_id: student_id.to_string(),
        module_id: module_id.to_string(),
        score,
        updated_at: Some(Utc::now() - Duration::minutes(minutes_ago)),
    }
}
