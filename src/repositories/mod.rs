pub mod attempt_repository;
pub mod class_config_repository;
pub mod progress_repository;
pub mod roster_repository;
pub mod unified_score_repository;

pub use attempt_repository::{AttemptRepository, MongoAttemptRepository};
pub use class_config_repository::{ClassConfigRepository, MongoClassConfigRepository};
pub use progress_repository::{MongoProgressSnapshotRepository, ProgressSnapshotRepository};
pub use roster_repository::{MongoRosterRepository, RosterRepository};
pub use unified_score_repository::{MongoUnifiedScoreRepository, UnifiedScoreRepository};

#[cfg(test)]
pub use attempt_repository::MockAttemptRepository;
#[cfg(test)]
pub use class_config_repository::MockClassConfigRepository;
#[cfg(test)]
pub use progress_repository::MockProgressSnapshotRepository;
#[cfg(test)]
pub use roster_repository::MockRosterRepository;
#[cfg(test)]
pub use unified_score_repository::MockUnifiedScoreRepository;
