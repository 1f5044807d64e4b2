use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ClassConfigRepository, MongoAttemptRepository, MongoClassConfigRepository,
        MongoProgressSnapshotRepository, MongoRosterRepository, MongoUnifiedScoreRepository,
        RosterRepository,
    },
    services::{
        AttemptFeedSource, RankingService, ScoreSourceChain, SnapshotScoreSource,
        UnifiedScoreService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub unified_score_service: Arc<UnifiedScoreService>,
    pub ranking_service: Arc<RankingService>,
    pub roster: Arc<dyn RosterRepository>,
    pub class_configs: Arc<dyn ClassConfigRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let attempts = Arc::new(MongoAttemptRepository::new(&db));
        attempts.ensure_indexes().await?;

        let unified_scores = Arc::new(MongoUnifiedScoreRepository::new(
            &db,
            config.merge_retry_limit,
        ));
        unified_scores.ensure_indexes().await?;

        let roster = Arc::new(MongoRosterRepository::new(&db));
        let class_configs = Arc::new(MongoClassConfigRepository::new(&db));

        // Priority order matters: the attempt feed is authoritative, the
        // legacy collections only fill gaps left by the migration.
        let score_sources = ScoreSourceChain::new(vec![
            Arc::new(AttemptFeedSource::new(attempts.clone())),
            Arc::new(SnapshotScoreSource::new(
                "student_module_progress",
                Arc::new(MongoProgressSnapshotRepository::module_progress(&db)),
            )),
            Arc::new(SnapshotScoreSource::new(
                "gameProgress",
                Arc::new(MongoProgressSnapshotRepository::game_progress(&db)),
            )),
        ]);

        let unified_score_service = Arc::new(UnifiedScoreService::new(
            attempts,
            unified_scores.clone(),
            score_sources,
        ));
        let ranking_service = Arc::new(RankingService::new(unified_scores, roster.clone()));

        Ok(Self {
            unified_score_service,
            ranking_service,
            roster,
            class_configs,
            config: Arc::new(config),
        })
    }
}
