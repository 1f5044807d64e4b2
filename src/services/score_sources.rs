use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    errors::AppResult,
    repositories::{AttemptRepository, ProgressSnapshotRepository},
    services::score_reducer::ScoreReducer,
};

/// A score found in one of the raw stores.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceHit {
    pub source: &'static str,
    pub score: f64,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// One prioritized place a best score can come from.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn lookup(&self, student_id: &str, module_id: &str) -> AppResult<Option<SourceHit>>;
}

/// Ordered list of sources tried in sequence, stopping at the first hit.
/// The fallback policy lives here, in one place, instead of being buried
/// in nested lookups. A source error aborts the resolution: an unreachable
/// store must not be read as "no score there".
pub struct ScoreSourceChain {
    sources: Vec<Arc<dyn ScoreSource>>,
}

impl ScoreSourceChain {
    pub fn new(sources: Vec<Arc<dyn ScoreSource>>) -> Self {
        Self { sources }
    }

    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub async fn resolve(
        &self,
        student_id: &str,
        module_id: &str,
    ) -> AppResult<Option<SourceHit>> {
        for source in &self.sources {
            if let Some(hit) = source.lookup(student_id, module_id).await? {
                log::debug!(
                    "Resolved score for student '{}' module '{}' from source '{}'",
                    student_id,
                    module_id,
                    source.name()
                );
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }
}

/// Primary source: the append-only attempt feed, reduced to a best score.
pub struct AttemptFeedSource {
    attempts: Arc<dyn AttemptRepository>,
}

impl AttemptFeedSource {
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }
}

#[async_trait]
impl ScoreSource for AttemptFeedSource {
    fn name(&self) -> &'static str {
        "quiz_attempts"
    }

    async fn lookup(&self, student_id: &str, module_id: &str) -> AppResult<Option<SourceHit>> {
        let attempts = self
            .attempts
            .find_by_student_module(student_id, module_id)
            .await?;

        Ok(
            ScoreReducer::reduce_module(module_id, &attempts).map(|entry| SourceHit {
                source: "quiz_attempts",
                score: entry.best_score,
                recorded_at: Some(entry.last_attempt_at),
            }),
        )
    }
}

/// Legacy source: progress snapshot documents left behind by the old
/// activity recorder.
pub struct SnapshotScoreSource {
    name: &'static str,
    snapshots: Arc<dyn ProgressSnapshotRepository>,
}

impl SnapshotScoreSource {
    pub fn new(name: &'static str, snapshots: Arc<dyn ProgressSnapshotRepository>) -> Self {
        Self { name, snapshots }
    }
}

#[async_trait]
impl ScoreSource for SnapshotScoreSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn lookup(&self, student_id: &str, module_id: &str) -> AppResult<Option<SourceHit>> {
        let snapshots = self.snapshots.find_for_module(student_id, module_id).await?;

        let best = snapshots
            .iter()
            .filter_map(|snapshot| {
                snapshot
                    .usable_score()
                    .map(|score| (score, snapshot.updated_at))
            })
            .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Ok(best.map(|(score, recorded_at)| SourceHit {
            source: self.name,
            score,
            recorded_at,
        }))
    }
}
