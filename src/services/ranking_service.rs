use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{RankingEntry, StudentProfile, UnifiedScoreRecord},
    repositories::{RosterRepository, UnifiedScoreRepository},
};

/// Builds ranking views from the current unified score records. Read-only;
/// nothing here is persisted, so a ranking is always derivable from the
/// records as they stand.
pub struct RankingService {
    unified_scores: Arc<dyn UnifiedScoreRepository>,
    roster: Arc<dyn RosterRepository>,
}

impl RankingService {
    pub fn new(
        unified_scores: Arc<dyn UnifiedScoreRepository>,
        roster: Arc<dyn RosterRepository>,
    ) -> Self {
        Self {
            unified_scores,
            roster,
        }
    }

    /// Ranking for one class roster. Students without a unified score
    /// record never attempted anything and are excluded outright; showing
    /// them as score zero would conflate never-started with scored-zero.
    pub async fn class_ranking(&self, class_id: &str) -> AppResult<Vec<RankingEntry>> {
        let students = self.roster.find_by_class(class_id).await?;
        let student_ids: Vec<String> = students.iter().map(|s| s.student_id.clone()).collect();

        let records = self.unified_scores.find_for_students(&student_ids).await?;

        let profiles: HashMap<String, StudentProfile> = students
            .into_iter()
            .map(|s| (s.student_id.clone(), s))
            .collect();

        Ok(Self::assemble(records, &profiles))
    }

    /// Pure assembly step: sort descending by total score, break ties by
    /// earliest activity, assign 1-based positions.
    pub fn assemble(
        mut records: Vec<UnifiedScoreRecord>,
        profiles: &HashMap<String, StudentProfile>,
    ) -> Vec<RankingEntry> {
        records.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.last_activity.cmp(&b.last_activity))
        });

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let (display_name, anonymous_id) = match profiles.get(&record.student_id) {
                    Some(profile) => (profile.display_name.clone(), profile.anonymous_id.clone()),
                    None => {
                        log::warn!(
                            "Student '{}' has a score record but no roster entry",
                            record.student_id
                        );
                        let masked = RankingEntry::masked_identifier(&record.student_id);
                        (masked.clone(), masked)
                    }
                };

                RankingEntry {
                    student_id: record.student_id,
                    display_name,
                    anonymous_id,
                    total_score: record.total_score,
                    normalized_score: record.normalized_score,
                    completed_module_count: record.completed_module_count,
                    position: (index + 1) as u32,
                }
            })
            .collect()
    }
}
