use serde::Deserialize;
use validator::Validate;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordAttemptRequest {
    #[validate(length(min = 1, max = 64))]
    pub student_id: String,

    #[validate(length(min = 1, max = 64))]
    pub module_id: String,

    #[validate(range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100"))]
    pub score: f64,

    /// Submission time as reported by the activity recorder. Defaults to
    /// now when absent.
    pub completed_at: Option<DateTime<Utc>>,
}
