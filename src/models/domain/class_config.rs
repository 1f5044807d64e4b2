use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-class grading configuration, owned by the class-management side and
/// read here as a plain input. Replaces the ambient module-lock state the
/// platform used to keep in shared browser storage.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassConfig {
    pub class_id: String,
    /// Modules this class is graded on; also the normalization denominator.
    pub eligible_modules: Vec<String>,
    /// Modules the instructor has locked. Locked modules stay eligible for
    /// grading but are not accessible for new attempts.
    #[serde(default)]
    pub locked_modules: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl ClassConfig {
    pub fn new(class_id: &str, eligible_modules: Vec<String>) -> Self {
        ClassConfig {
            class_id: class_id.to_string(),
            eligible_modules,
            locked_modules: Vec::new(),
            modified_at: Some(Utc::now()),
        }
    }

    /// Default configuration for classes with no stored config.
    pub fn fallback(class_id: &str, default_modules: &[String]) -> Self {
        ClassConfig {
            class_id: class_id.to_string(),
            eligible_modules: default_modules.to_vec(),
            locked_modules: Vec::new(),
            modified_at: None,
        }
    }

    pub fn is_eligible(&self, module_id: &str) -> bool {
        self.eligible_modules.iter().any(|m| m == module_id)
    }

    pub fn eligible_module_count(&self) -> usize {
        self.eligible_modules.len()
    }
}
