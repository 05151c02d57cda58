use crate::catalog::ThemeRecord;
use serde::Serialize;
use std::sync::Arc;

/// An in-flight visual transition between two themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    /// Stamp of the switch that opened this transition. Only the timer armed
    /// by that same switch may close it.
    pub generation: u64,
}

/// Externally visible phase of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ThemePhase {
    Idle { theme_id: String },
    Transitioning { from: String, to: String },
}

/// A requested switch that has not committed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSwitch {
    pub to: String,
    /// Stamp of the request. Only the latest request may commit.
    pub generation: u64,
}

/// Runtime state owned by the controller.
///
/// The active theme is held as the resolved catalog record, so the active id
/// can never dangle. The controller is the only writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveThemeState {
    theme: Arc<ThemeRecord>,
    pending: Option<PendingSwitch>,
    transition: Option<Transition>,
    generation: u64,
}

impl ActiveThemeState {
    pub(crate) fn new(theme: Arc<ThemeRecord>) -> Self {
        Self {
            theme,
            pending: None,
            transition: None,
            generation: 0,
        }
    }

    pub fn theme_id(&self) -> &str {
        &self.theme.id
    }

    pub fn pending(&self) -> Option<&PendingSwitch> {
        self.pending.as_ref()
    }

    /// The id the state is heading to: the latest pending request, or the
    /// committed theme when nothing is in flight.
    pub fn target_id(&self) -> &str {
        match &self.pending {
            Some(p) => &p.to,
            None => &self.theme.id,
        }
    }

    pub fn theme(&self) -> &Arc<ThemeRecord> {
        &self.theme
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> ThemePhase {
        match &self.transition {
            Some(t) => ThemePhase::Transitioning {
                from: t.from.clone(),
                to: t.to.clone(),
            },
            None => ThemePhase::Idle {
                theme_id: self.theme.id.clone(),
            },
        }
    }

    /// Register a request for `to`, superseding any earlier pending one. With
    /// `animate`, also open a transition towards `to`.
    pub(crate) fn begin_switch(&mut self, to: &str, animate: bool) -> u64 {
        self.generation += 1;
        self.pending = Some(PendingSwitch {
            to: to.to_string(),
            generation: self.generation,
        });
        if animate {
            self.transition = Some(Transition {
                from: self.theme.id.clone(),
                to: to.to_string(),
                generation: self.generation,
            });
        }
        self.generation
    }

    /// Whether the request stamped `generation` is still the latest one.
    pub(crate) fn is_latest(&self, generation: u64) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.generation == generation)
    }

    /// Publish `theme` for the request stamped `generation`. Refused when a
    /// later request has superseded it.
    pub(crate) fn commit(&mut self, theme: Arc<ThemeRecord>, generation: u64) -> bool {
        if !self.is_latest(generation) {
            return false;
        }
        self.theme = theme;
        self.pending = None;
        true
    }

    /// Close the transition if it is still the one opened by `generation`.
    pub(crate) fn end_transition(&mut self, generation: u64) -> bool {
        match &self.transition {
            Some(t) if t.generation == generation => {
                self.transition = None;
                true
            }
            _ => false,
        }
    }

    /// Drop whatever the request stamped `generation` still owns, after it
    /// was cancelled before committing. Returns whether its transition was
    /// closed.
    pub(crate) fn abandon(&mut self, generation: u64) -> bool {
        if self.is_latest(generation) {
            self.pending = None;
        }
        self.end_transition(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColorTriple, ThemeCategory, ThemeColors};

    fn theme(id: &str) -> Arc<ThemeRecord> {
        Arc::new(ThemeRecord::new(
            id,
            id,
            ThemeCategory::Minimal,
            ThemeColors::from_fn(|_| ColorTriple::from_components(0, 0, 0)),
        ))
    }

    #[test]
    fn test_phase_follows_transition() {
        let mut state = ActiveThemeState::new(theme("a"));
        assert_eq!(
            state.phase(),
            ThemePhase::Idle {
                theme_id: "a".to_string()
            }
        );

        let generation = state.begin_switch("b", true);
        assert_eq!(state.target_id(), "b");
        assert_eq!(
            state.phase(),
            ThemePhase::Transitioning {
                from: "a".to_string(),
                to: "b".to_string()
            }
        );

        assert!(state.commit(theme("b"), generation));
        assert!(state.pending().is_none());
        assert!(state.end_transition(generation));
        assert_eq!(
            state.phase(),
            ThemePhase::Idle {
                theme_id: "b".to_string()
            }
        );
    }

    #[test]
    fn test_stale_generation_cannot_end_newer_transition() {
        let mut state = ActiveThemeState::new(theme("a"));

        let first = state.begin_switch("b", true);
        let second = state.begin_switch("c", true);

        assert!(!state.end_transition(first));
        assert!(state.is_transitioning());
        assert!(state.end_transition(second));
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_superseded_request_cannot_commit() {
        let mut state = ActiveThemeState::new(theme("a"));

        let first = state.begin_switch("b", false);
        let second = state.begin_switch("a", false);
        assert_eq!(state.target_id(), "a");

        assert!(!state.commit(theme("b"), first));
        assert_eq!(state.theme_id(), "a");
        assert!(state.commit(theme("a"), second));
        assert_eq!(state.target_id(), "a");
    }

    #[test]
    fn test_abandon_rolls_back_only_own_request() {
        let mut state = ActiveThemeState::new(theme("a"));

        let stale = state.begin_switch("b", true);
        let current = state.begin_switch("c", true);
        assert!(!state.abandon(stale));
        assert_eq!(state.target_id(), "c");
        assert!(state.is_transitioning());

        assert!(state.abandon(current));
        assert!(state.pending().is_none());
        assert!(!state.is_transitioning());
        assert_eq!(state.target_id(), "a");
    }
}
