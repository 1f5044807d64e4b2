use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{ModuleScoreEntry, UnifiedScoreRecord},
};

/// Persisted per-student score records with merge-write semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnifiedScoreRepository: Send + Sync {
    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<UnifiedScoreRecord>>;
    async fn find_for_students(&self, student_ids: &[String]) -> AppResult<Vec<UnifiedScoreRecord>>;
    /// Merges module entries into the student's record, creating it on
    /// first write. Implementations must serialize updates per student:
    /// read the latest record, fold the entries in, and write back only if
    /// nothing else won the race, retrying from a fresh read otherwise.
    async fn merge_entries(
        &self,
        student_id: &str,
        entries: Vec<ModuleScoreEntry>,
        eligible_module_count: usize,
    ) -> AppResult<UnifiedScoreRecord>;
}

pub struct MongoUnifiedScoreRepository {
    collection: Collection<UnifiedScoreRecord>,
    merge_retry_limit: u32,
}

impl MongoUnifiedScoreRepository {
    pub fn new(db: &Database, merge_retry_limit: u32) -> Self {
        let collection = db.get_collection("unified_scores");
        Self {
            collection,
            merge_retry_limit,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for unified_scores collection");

        let student_index = IndexModel::builder()
            .keys(doc! { "student_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(student_index).await?;

        log::info!("Successfully created indexes for unified_scores collection");
        Ok(())
    }

    /// One optimistic pass: read the latest record, merge, and write it
    /// back conditioned on the revision we read. Returns None when the
    /// condition failed and the caller should retry from a fresh read.
    async fn try_merge(
        &self,
        student_id: &str,
        entries: &[ModuleScoreEntry],
        eligible_module_count: usize,
    ) -> AppResult<Option<UnifiedScoreRecord>> {
        let existing = self
            .collection
            .find_one(doc! { "student_id": student_id })
            .await?;

        match existing {
            Some(current) => {
                let seen_revision = current.revision;
                let mut merged = current;
                merged.merge_entries(entries.to_vec(), eligible_module_count);
                merged.revision = seen_revision + 1;

                let result = self
                    .collection
                    .replace_one(
                        doc! { "student_id": student_id, "revision": seen_revision },
                        &merged,
                    )
                    .await?;

                if result.matched_count == 1 {
                    Ok(Some(merged))
                } else {
                    Ok(None)
                }
            }
            None => {
                let mut record = UnifiedScoreRecord::new(student_id);
                record.merge_entries(entries.to_vec(), eligible_module_count);
                record.revision = 1;

                match self.collection.insert_one(&record).await {
                    Ok(_) => Ok(Some(record)),
                    // Another writer created the record first; retry the
                    // merge against it.
                    Err(err) if is_duplicate_key(&err) => Ok(None),
                    Err(err) => Err(err.into()),
                }
            }
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

#[async_trait]
impl UnifiedScoreRepository for MongoUnifiedScoreRepository {
    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<UnifiedScoreRecord>> {
        let record = self
            .collection
            .find_one(doc! { "student_id": student_id })
            .await?;
        Ok(record)
    }

    async fn find_for_students(
        &self,
        student_ids: &[String],
    ) -> AppResult<Vec<UnifiedScoreRecord>> {
        let records = self
            .collection
            .find(doc! { "student_id": { "$in": student_ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn merge_entries(
        &self,
        student_id: &str,
        entries: Vec<ModuleScoreEntry>,
        eligible_module_count: usize,
    ) -> AppResult<UnifiedScoreRecord> {
        for _ in 0..self.merge_retry_limit {
            if let Some(record) = self
                .try_merge(student_id, &entries, eligible_module_count)
                .await?
            {
                return Ok(record);
            }
        }

        Err(AppError::WriteConflict(format!(
            "Gave up merging unified score for student '{}' after {} attempts",
            student_id, self.merge_retry_limit
        )))
    }
}
