use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    /// Modules every class is graded on unless its class config says otherwise.
    pub default_modules: Vec<String>,
    /// Upper bound on read-merge-write retries for a unified score record.
    pub merge_retry_limit: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "avalia-local".to_string()),
            default_modules: env::var("DEFAULT_MODULES")
                .map(|raw| {
                    raw.split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| Self::builtin_modules()),
            merge_retry_limit: env::var("MERGE_RETRY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    fn builtin_modules() -> Vec<String> {
        [
            "anthropometric-assessment",
            "clinical-assessment",
            "biochemical-assessment",
            "dietary-assessment",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect()
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "avalia-test".to_string(),
            default_modules: Self::builtin_modules(),
            merge_retry_limit: 3,
        }
    }
}
