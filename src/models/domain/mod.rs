pub mod attempt;
pub mod class_config;
pub mod module_score;
pub mod progress;
pub mod ranking;
pub mod student;
pub mod unified_score;
pub use attempt::Attempt;
pub use class_config::ClassConfig;
pub use module_score::{ModuleScoreEntry, ModuleStatus, PASS_THRESHOLD};
pub use progress::ProgressSnapshot;
pub use ranking::RankingEntry;
pub use student::StudentProfile;
pub use unified_score::UnifiedScoreRecord;
