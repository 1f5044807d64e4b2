use crate::models::domain::ClassConfig;

/// Whether a student may open a module for new attempts. A pure function
/// of the class configuration: no ambient lock state anywhere.
pub fn is_module_unlocked(config: &ClassConfig, module_id: &str) -> bool {
    config.is_eligible(module_id) && !config.locked_modules.iter().any(|m| m == module_id)
}

/// The modules currently open for attempts in a class.
pub fn accessible_modules<'a>(config: &'a ClassConfig) -> Vec<&'a str> {
    config
        .eligible_modules
        .iter()
        .filter(|m| is_module_unlocked(config, m))
        .map(|m| m.as_str())
        .collect()
}
