use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Attempt,
};

/// Append-only feed of raw attempts. Implementations never mutate or
/// delete existing records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn record(&self, attempt: Attempt) -> AppResult<Attempt>;
    /// All attempts for a student, oldest first. An unreachable store is an
    /// error, never an empty result.
    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>>;
    /// Attempts for one (student, module) pair, oldest first.
    async fn find_by_student_module(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> AppResult<Vec<Attempt>>;
    async fn count_for_student(&self, student_id: &str, module_id: &str) -> AppResult<u64>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let student_module_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "module_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("student_module".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(student_module_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }

    async fn find_ordered(&self, filter: Document) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(filter)
            .sort(doc! { "completed_at": 1 })
            .await
            .map_err(|err| AppError::SourceUnavailable(err.to_string()))?
            .try_collect()
            .await
            .map_err(|err| AppError::SourceUnavailable(err.to_string()))?;

        Ok(attempts)
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn record(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>> {
        self.find_ordered(doc! { "student_id": student_id }).await
    }

    async fn find_by_student_module(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> AppResult<Vec<Attempt>> {
        self.find_ordered(doc! { "student_id": student_id, "module_id": module_id })
            .await
    }

    async fn count_for_student(&self, student_id: &str, module_id: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(
                doc! {
                    "student_id": student_id,
                    "module_id": module_id
                },
            )
            .await?;
        Ok(count)
    }
}
