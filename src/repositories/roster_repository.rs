use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::StudentProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn find_by_class(&self, class_id: &str) -> AppResult<Vec<StudentProfile>>;
    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<StudentProfile>>;
    async fn list_class_ids(&self) -> AppResult<Vec<String>>;
}

pub struct MongoRosterRepository {
    collection: Collection<StudentProfile>,
}

impl MongoRosterRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("classStudents");
        Self { collection }
    }
}

#[async_trait]
impl RosterRepository for MongoRosterRepository {
    async fn find_by_class(&self, class_id: &str) -> AppResult<Vec<StudentProfile>> {
        let students = self
            .collection
            .find(doc! { "class_id": class_id })
            .sort(doc! { "student_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(students)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<StudentProfile>> {
        let profile = self
            .collection
            .find_one(doc! { "student_id": student_id })
            .await?;
        Ok(profile)
    }

    async fn list_class_ids(&self) -> AppResult<Vec<String>> {
        let ids = self
            .collection
            .distinct("class_id", doc! {})
            .await?
            .into_iter()
            .filter_map(|value| value.as_str().map(|s| s.to_string()))
            .collect();
        Ok(ids)
    }
}
