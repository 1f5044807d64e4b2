use async_trait::async_trait;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::ClassConfig};

/// Per-class grading configuration, owned by class management. Absence of
/// a config is normal and falls back to the deployment defaults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassConfigRepository: Send + Sync {
    async fn find_by_class(&self, class_id: &str) -> AppResult<Option<ClassConfig>>;
}

pub struct MongoClassConfigRepository {
    collection: Collection<ClassConfig>,
}

impl MongoClassConfigRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("class_configs");
        Self { collection }
    }
}

#[async_trait]
impl ClassConfigRepository for MongoClassConfigRepository {
    async fn find_by_class(&self, class_id: &str) -> AppResult<Option<ClassConfig>> {
        let config = self
            .collection
            .find_one(doc! { "class_id": class_id })
            .await?;
        Ok(config)
    }
}
