//! # Theme Controller
//!
//! The stateful core of the engine and the single writer of
//! [`ActiveThemeState`]. Every theme change goes through
//! [`ThemeController::set_theme`]:
//!
//! 1. A request for the active id, or for the id a pending switch is already
//!    heading to, is a no-op.
//! 2. An id the catalog does not know is rejected with a warning.
//! 3. With transitions enabled, the transition flag is raised and the document
//!    is marked with the transition class and duration.
//! 4. One frame yield lets the transition styling land before the colors do.
//! 5. Commit, under the state lock: apply to the document, save to storage,
//!    then publish the new id. Storage failure never blocks the visual update.
//!    A switch overtaken by a later request during the yield does not commit.
//! 6. A timer clears the transition flag after the configured duration, but
//!    only if no later switch has opened a newer transition.
//!
//! Nothing in here panics or returns an error to the caller for a failed
//! switch; the outcome is reported through [`SwitchOutcome`].

pub mod state;

use crate::catalog::{ThemeCatalog, ThemeRecord};
use crate::document::DomApplier;
use crate::errors::{ThemeError, ThemeResult};
use crate::persistence::PersistenceAdapter;
use crate::provider::ProviderConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use state::{ActiveThemeState, ThemePhase};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Delay between raising the transition flag and committing new colors.
pub const FRAME_YIELD: Duration = Duration::from_millis(16);

/// What a call to [`ThemeController::set_theme`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The requested theme was already active, or already being switched to.
    AlreadyActive,
    /// A later request overtook this one before it committed. Nothing was
    /// applied or saved.
    Superseded,
    /// The request was refused and nothing changed.
    Rejected(ThemeError),
    /// The theme is now active and on the document. `persisted` is false when
    /// storage was unavailable or failed.
    Applied { theme_id: String, persisted: bool },
}

impl SwitchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SwitchOutcome::Applied { .. })
    }
}

pub struct ThemeController {
    catalog: Arc<ThemeCatalog>,
    persistence: PersistenceAdapter,
    applier: DomApplier,
    state: Arc<Mutex<ActiveThemeState>>,
    rng: Mutex<StdRng>,
    transitions_enabled: bool,
    transition_duration: Duration,
    shutdown: CancellationToken,
}

impl ThemeController {
    /// Resolve the initial theme and paint it without a transition.
    ///
    /// The persisted id wins over the configured default. A default that is
    /// not in the catalog is a configuration error.
    pub fn new(
        config: &ProviderConfig,
        catalog: Arc<ThemeCatalog>,
        persistence: PersistenceAdapter,
        applier: DomApplier,
    ) -> ThemeResult<Self> {
        if !catalog.contains(&config.default_theme_id) {
            return Err(ThemeError::UnknownTheme(config.default_theme_id.clone()));
        }

        let initial_id = persistence
            .load()
            .unwrap_or_else(|| config.default_theme_id.clone());
        let initial = catalog
            .get_shared(&initial_id)
            .ok_or_else(|| ThemeError::UnknownTheme(initial_id.clone()))?;

        applier.apply(&initial);
        log::info!("Theme controller initialized with theme '{initial_id}'");

        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            catalog,
            persistence,
            applier,
            state: Arc::new(Mutex::new(ActiveThemeState::new(initial))),
            rng: Mutex::new(rng),
            transitions_enabled: config.transitions_enabled,
            transition_duration: config.transition_duration(),
            shutdown: CancellationToken::new(),
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, ActiveThemeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn catalog(&self) -> &Arc<ThemeCatalog> {
        &self.catalog
    }

    pub fn persistence(&self) -> &PersistenceAdapter {
        &self.persistence
    }

    pub fn theme_id(&self) -> String {
        self.lock_state().theme_id().to_string()
    }

    pub fn current_theme(&self) -> Arc<ThemeRecord> {
        Arc::clone(self.lock_state().theme())
    }

    pub fn is_transitioning(&self) -> bool {
        self.lock_state().is_transitioning()
    }

    pub fn phase(&self) -> ThemePhase {
        self.lock_state().phase()
    }

    /// Copy of the full state, for diagnostics.
    pub fn state(&self) -> ActiveThemeState {
        self.lock_state().clone()
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    /// Cross-fade duration consumers should synchronize with.
    pub fn transition_duration(&self) -> Duration {
        self.transition_duration
    }

    /// Switch to `requested`. Requires a tokio runtime for the frame yield and
    /// the transition timer.
    ///
    /// Overlapping calls resolve to the latest request: an earlier switch
    /// still waiting on its frame yield returns [`SwitchOutcome::Superseded`]
    /// without touching the document or storage. A call whose future is
    /// dropped before committing rolls back its transition.
    pub async fn set_theme(&self, requested: &str) -> SwitchOutcome {
        let Some(theme) = self.catalog.get_shared(requested) else {
            log::warn!("Theme \"{requested}\" not found");
            return SwitchOutcome::Rejected(ThemeError::UnknownTheme(requested.to_string()));
        };

        let generation = {
            let mut state = self.lock_state();
            if state.target_id() == requested {
                return SwitchOutcome::AlreadyActive;
            }
            let generation = state.begin_switch(&theme.id, self.transitions_enabled);
            if self.transitions_enabled {
                self.applier.begin_transition(self.transition_duration);
            }
            generation
        };
        let mut guard = PendingSwitchGuard {
            state: &self.state,
            applier: &self.applier,
            generation,
            armed: true,
        };

        tokio::time::sleep(FRAME_YIELD).await;

        let persisted = {
            let mut state = self.lock_state();
            if !state.is_latest(generation) {
                log::debug!("Switch to '{}' superseded by a later request", theme.id);
                return SwitchOutcome::Superseded;
            }
            self.applier.apply(&theme);
            let persisted = self.persistence.save(&theme.id);
            state.commit(Arc::clone(&theme), generation);
            guard.armed = false;
            persisted
        };

        log::info!("Switched to theme: {} ({})", theme.name, theme.id);

        if self.transitions_enabled {
            self.arm_transition_timer(generation);
        }

        SwitchOutcome::Applied {
            theme_id: theme.id.clone(),
            persisted,
        }
    }

    fn arm_transition_timer(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let applier = self.applier.clone();
        let duration = self.transition_duration;
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(duration) => {
                    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                    if state.end_transition(generation) {
                        applier.end_transition();
                    }
                }
                () = token.cancelled() => {}
            }
        });
    }

    pub async fn next_theme(&self) -> SwitchOutcome {
        let next = self.catalog.next_theme(&self.theme_id()).to_string();
        self.set_theme(&next).await
    }

    pub async fn previous_theme(&self) -> SwitchOutcome {
        let previous = self.catalog.previous_theme(&self.theme_id()).to_string();
        self.set_theme(&previous).await
    }

    /// Switch to a uniformly drawn theme. Drawing the active theme is allowed
    /// and results in [`SwitchOutcome::AlreadyActive`].
    pub async fn random_theme(&self) -> SwitchOutcome {
        let id = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.catalog.random_theme(&mut *rng).to_string()
        };
        self.set_theme(&id).await
    }

    /// Hint that `id` is about to be shown. Themes are fully in memory, so
    /// this only validates and logs.
    pub fn preload_theme(&self, id: &str) {
        if let Some(theme) = self.catalog.get_theme(id) {
            log::debug!("Preloading theme: {}", theme.name);
        }
    }

    /// Abandon pending transition timers. The transition flag is left as is.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for ThemeController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Rolls back a switch whose future is dropped between raising the
/// transition and committing.
struct PendingSwitchGuard<'a> {
    state: &'a Mutex<ActiveThemeState>,
    applier: &'a DomApplier,
    generation: u64,
    armed: bool,
}

impl Drop for PendingSwitchGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.abandon(self.generation) {
            self.applier.end_transition();
        }
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("state", &*self.lock_state())
            .field("transitions_enabled", &self.transitions_enabled)
            .field("transition_duration", &self.transition_duration)
            .finish()
    }
}
