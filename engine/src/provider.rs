//! # Theme Provider
//!
//! The one object a hosting application creates at startup. It owns the
//! [`ThemeController`] and hands out the read-only hook views to every
//! consumer, so the active theme is passed around explicitly instead of living
//! in a global.
//!
//! ```no_run
//! use engine::catalog::ThemeCatalog;
//! use engine::document::{DomApplier, InMemoryDocument};
//! use engine::persistence::{MemoryStorage, PersistenceAdapter};
//! use engine::provider::{ProviderConfig, ThemeProvider};
//! use std::sync::Arc;
//!
//! # async fn run() -> engine::errors::ThemeResult<()> {
//! let catalog = ThemeCatalog::builtin()?;
//! let document = InMemoryDocument::new();
//! let provider = ThemeProvider::new(
//!     ProviderConfig::default(),
//!     Arc::clone(&catalog),
//!     PersistenceAdapter::new(Arc::new(MemoryStorage::new()), catalog),
//!     DomApplier::new(Arc::new(document.clone())),
//! )?;
//!
//! provider.controller().next_theme().await;
//! let accent = provider.css().css_alpha(engine::catalog::ColorRole::Accent, 0.4);
//! # Ok(())
//! # }
//! ```

use crate::catalog::{DEFAULT_THEME_ID, ThemeCatalog};
use crate::controller::ThemeController;
use crate::document::DomApplier;
use crate::errors::ThemeResult;
use crate::hooks::{ThemeControl, ThemeCss, ThemeInfo, ThemeTransition};
use crate::persistence::PersistenceAdapter;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Default cross-fade duration in milliseconds
pub const DEFAULT_TRANSITION_DURATION_MS: u64 = 300;

/// Startup options for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub default_theme_id: String,
    pub transitions_enabled: bool,
    pub transition_duration_ms: u64,
    /// Seed for random theme selection; entropy when absent.
    pub random_seed: Option<u64>,
}

impl ProviderConfig {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_theme_id: DEFAULT_THEME_ID.to_string(),
            transitions_enabled: true,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            random_seed: None,
        }
    }
}

pub struct ThemeProvider {
    controller: ThemeController,
    applier: DomApplier,
}

impl ThemeProvider {
    /// Initialize the controller, paint the initial theme and, when
    /// transitions are enabled, install the global cross-fade stylesheet.
    pub fn new(
        config: ProviderConfig,
        catalog: Arc<ThemeCatalog>,
        persistence: PersistenceAdapter,
        applier: DomApplier,
    ) -> ThemeResult<Self> {
        let controller = ThemeController::new(&config, catalog, persistence, applier.clone())?;

        if config.transitions_enabled {
            applier.install_transition_styles();
        }

        Ok(Self {
            controller,
            applier,
        })
    }

    pub fn controller(&self) -> &ThemeController {
        &self.controller
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        self.controller.catalog()
    }

    /// CSS reference helpers bound to the current theme.
    pub fn css(&self) -> ThemeCss {
        ThemeCss::new(self.controller.current_theme())
    }

    pub fn control(&self) -> ThemeControl<'_> {
        ThemeControl::new(&self.controller)
    }

    pub fn info(&self) -> ThemeInfo<'_> {
        ThemeInfo::new(self.controller.catalog(), self.controller.current_theme())
    }

    pub fn transition(&self) -> ThemeTransition {
        ThemeTransition::new(self.controller.is_transitioning())
    }
}

impl Drop for ThemeProvider {
    fn drop(&mut self) {
        self.controller.shutdown();
        self.applier.remove_transition_styles();
    }
}

impl std::fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("controller", &self.controller)
            .finish()
    }
}
