use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roster entry for one enrolled student. Owned by the class-management
/// side; consumed here to label ranking rows.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentProfile {
    pub student_id: String,
    pub class_id: String,
    pub display_name: String,
    pub anonymous_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl StudentProfile {
    pub fn new(student_id: &str, class_id: &str, display_name: &str, anonymous_id: &str) -> Self {
        StudentProfile {
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            display_name: display_name.to_string(),
            anonymous_id: anonymous_id.to_string(),
            enrolled_at: Some(Utc::now()),
        }
    }
}
