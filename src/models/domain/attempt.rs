use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::module_score::PASS_THRESHOLD;
use crate::models::dto::request::RecordAttemptRequest;

/// One quiz/exercise submission. Append-only: never mutated or deleted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Attempt {
    pub id: String,
    pub student_id: String,
    pub module_id: String,
    pub score: f64,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Attempt {
    pub fn new(student_id: &str, module_id: &str, score: f64) -> Self {
        Attempt {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            module_id: module_id.to_string(),
            score,
            passed: score >= PASS_THRESHOLD,
            completed_at: Utc::now(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn from_request(request: RecordAttemptRequest) -> Self {
        let completed_at = request.completed_at.unwrap_or_else(Utc::now);
        Attempt {
            id: Uuid::new_v4().to_string(),
            student_id: request.student_id,
            module_id: request.module_id,
            score: request.score,
            passed: request.score >= PASS_THRESHOLD,
            completed_at,
            created_at: Some(Utc::now()),
        }
    }

    /// Malformed attempts are skipped by the reducer rather than being
    /// allowed into the aggregates.
    pub fn is_well_formed(&self) -> bool {
        !self.student_id.is_empty()
            && !self.module_id.is_empty()
            && self.score.is_finite()
            && (0.0..=100.0).contains(&self.score)
    }
}
