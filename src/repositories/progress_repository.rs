use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::ProgressSnapshot,
};

/// Read-only view over one of the legacy progress collections. Only
/// consulted when the primary attempt feed has nothing for a module.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressSnapshotRepository: Send + Sync {
    async fn find_for_module(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> AppResult<Vec<ProgressSnapshot>>;
}

pub struct MongoProgressSnapshotRepository {
    collection: Collection<ProgressSnapshot>,
}

impl MongoProgressSnapshotRepository {
    pub fn module_progress(db: &Database) -> Self {
        Self {
            collection: db.get_collection("student_module_progress"),
        }
    }

    pub fn game_progress(db: &Database) -> Self {
        Self {
            collection: db.get_collection("gameProgress"),
        }
    }
}

#[async_trait]
impl ProgressSnapshotRepository for MongoProgressSnapshotRepository {
    async fn find_for_module(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> AppResult<Vec<ProgressSnapshot>> {
        let snapshots = self
            .collection
            .find(doc! { "student_id": student_id, "module_id": module_id })
            .await
            .map_err(|err| AppError::SourceUnavailable(err.to_string()))?
            .try_collect()
            .await
            .map_err(|err| AppError::SourceUnavailable(err.to_string()))?;

        Ok(snapshots)
    }
}
