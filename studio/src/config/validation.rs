use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid transition_duration_ms: {configured} (limit: {limit})")]
    TransitionDuration { configured: u64, limit: u64 },
    #[error("Unknown default_theme: '{configured}'")]
    UnknownDefaultTheme {
        configured: String,
        available: Vec<String>,
    },
    #[error("Invalid storage key: '{configured}' (max length: {limit})")]
    StorageKey { configured: String, limit: usize },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::TransitionDuration { configured, limit } => {
                format!(
                    "Transition duration too long!\n\n\
                    Your configured value: {configured} ms\n\
                    Maximum: {limit} ms\n\n\
                    Please update theme.transition_duration_ms in lumen.toml."
                )
            }
            ConfigValidationError::UnknownDefaultTheme {
                configured,
                available,
            } => {
                format!(
                    "Default theme not found!\n\n\
                    Your configured value: {configured}\n\
                    Available themes: {}\n\n\
                    Please update theme.default_theme in lumen.toml.",
                    available.join(", ")
                )
            }
            ConfigValidationError::StorageKey { configured, limit } => {
                format!(
                    "Storage key is invalid!\n\n\
                    Your configured value: '{configured}'\n\
                    Keys must be non-empty and at most {limit} characters.\n\n\
                    Please update storage.key in lumen.toml."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug, Clone)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
