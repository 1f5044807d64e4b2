use serde::{Deserialize, Serialize};

/// One row of a ranking view. Ephemeral: recomputed from the current
/// unified score records on every request, never persisted as truth.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RankingEntry {
    pub student_id: String,
    pub display_name: String,
    pub anonymous_id: String,
    pub total_score: f64,
    pub normalized_score: f64,
    pub completed_module_count: u32,
    pub position: u32,
}

impl RankingEntry {
    /// Fallback label for students missing from the roster. A gap in the
    /// roster must not block the ranking, so the entry gets a masked
    /// identifier derived from the student id instead of a name.
    pub fn masked_identifier(student_id: &str) -> String {
        let tail: String = student_id
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("student-{}", tail)
    }
}
