use super::{LoggingConfig, limits::*, validation::ConfigValidationError};
use engine::catalog::{DEFAULT_THEME_ID, ThemeCatalog};
use engine::persistence::STORAGE_KEY;
use engine::provider::{DEFAULT_TRANSITION_DURATION_MS, ProviderConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    theme: ThemeSettings,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

/// `[theme]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeSettings {
    default_theme: Option<String>,
    transitions_enabled: Option<bool>,
    transition_duration_ms: Option<u64>,
    random_seed: Option<u64>,
}

/// `[storage]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct StorageConfig {
    enabled: Option<bool>,
    path: Option<String>,
    key: Option<String>,
}

impl AppConfig {
    /// Validate the configuration against defined limits and the catalog
    pub fn validate(&self, catalog: &ThemeCatalog) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let duration = self.theme.transition_duration_ms();
        if duration > MAX_TRANSITION_DURATION_MS {
            errors.push(ConfigValidationError::TransitionDuration {
                configured: duration,
                limit: MAX_TRANSITION_DURATION_MS,
            });
        }

        let default_theme = self.theme.default_theme();
        if !catalog.contains(default_theme) {
            errors.push(ConfigValidationError::UnknownDefaultTheme {
                configured: default_theme.to_string(),
                available: catalog.theme_ids().iter().map(|id| id.to_string()).collect(),
            });
        }

        let key = self.storage.key();
        if key.trim().is_empty() || key.len() > MAX_STORAGE_KEY_LEN {
            errors.push(ConfigValidationError::StorageKey {
                configured: key.to_string(),
                limit: MAX_STORAGE_KEY_LEN,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Provider options derived from the `[theme]` section
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            default_theme_id: self.theme.default_theme().to_string(),
            transitions_enabled: self.theme.transitions_enabled(),
            transition_duration_ms: self.theme.transition_duration_ms(),
            random_seed: self.theme.random_seed(),
        }
    }
}

impl ThemeSettings {
    pub fn default_theme(&self) -> &str {
        self.default_theme.as_deref().unwrap_or(DEFAULT_THEME_ID)
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled.unwrap_or(true)
    }

    pub fn transition_duration_ms(&self) -> u64 {
        self.transition_duration_ms
            .unwrap_or(DEFAULT_TRANSITION_DURATION_MS)
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }
}

impl StorageConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Explicit storage file; `None` means the per-user config directory
    pub fn path(&self) -> Option<PathBuf> {
        self.path.as_ref().map(PathBuf::from)
    }

    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(STORAGE_KEY)
    }
}
