use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shape of the legacy progress documents (`student_module_progress`,
/// `gameProgress`). Written by the old activity recorder; read here only as
/// a lower-priority score source during reconciliation. Fields are loose
/// because the legacy writers were not consistent about them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ProgressSnapshot {
    pub student_id: String,
    pub module_id: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProgressSnapshot {
    /// A snapshot only counts if it carries a usable score.
    pub fn usable_score(&self) -> Option<f64> {
        self.score
            .filter(|s| s.is_finite() && (0.0..=100.0).contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(score: Option<f64>) -> ProgressSnapshot {
        ProgressSnapshot {
            student_id: "student-1".to_string(),
            module_id: "dietary-assessment".to_string(),
            score,
            updated_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_usable_score_filters_garbage() {
        assert_eq!(snapshot(Some(88.0)).usable_score(), Some(88.0));
        assert_eq!(snapshot(Some(250.0)).usable_score(), None);
        assert_eq!(snapshot(Some(f64::NAN)).usable_score(), None);
        assert_eq!(snapshot(None).usable_score(), None);
    }
}
