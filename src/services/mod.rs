pub mod module_access;
pub mod ranking_service;
pub mod score_aggregator;
pub mod score_reducer;
pub mod score_sources;

pub use ranking_service::RankingService;
pub use score_aggregator::{ReconcileSummary, UnifiedScoreService};
pub use score_reducer::ScoreReducer;
pub use score_sources::{
    AttemptFeedSource, ScoreSource, ScoreSourceChain, SnapshotScoreSource, SourceHit,
};
