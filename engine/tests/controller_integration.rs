use claims::{assert_none, assert_ok, assert_some_eq};
use engine::catalog::{ColorTriple, ThemeCatalog, ThemeCategory, ThemeColors, ThemeRecord};
use engine::controller::state::ThemePhase;
use engine::controller::{SwitchOutcome, ThemeController};
use engine::document::{
    DomApplier, InMemoryDocument, THEME_ATTRIBUTE, TRANSITION_CLASS, TRANSITION_STYLESHEET_ID,
};
use engine::errors::{StorageError, ThemeError};
use engine::persistence::{KeyValueStore, MemoryStorage, PersistenceAdapter, STORAGE_KEY};
use engine::provider::{ProviderConfig, ThemeProvider};
use std::sync::Arc;
use std::time::Duration;

fn theme(id: &str, shade: u8) -> ThemeRecord {
    ThemeRecord::new(
        id,
        id.to_uppercase(),
        ThemeCategory::Minimal,
        ThemeColors::from_fn(|_| ColorTriple::from_components(shade, shade, shade)),
    )
}

/// Three-theme catalog [a, b, c].
fn abc_catalog() -> Arc<ThemeCatalog> {
    Arc::new(
        ThemeCatalog::from_records(vec![theme("a", 10), theme("b", 20), theme("c", 30)]).unwrap(),
    )
}

fn config(default: &str, transitions: bool) -> ProviderConfig {
    ProviderConfig {
        default_theme_id: default.to_string(),
        transitions_enabled: transitions,
        transition_duration_ms: 300,
        random_seed: Some(7),
    }
}

struct Harness {
    controller: ThemeController,
    storage: MemoryStorage,
    document: InMemoryDocument,
}

fn harness(catalog: Arc<ThemeCatalog>, config: &ProviderConfig) -> Harness {
    let storage = MemoryStorage::new();
    let document = InMemoryDocument::new();
    let controller = ThemeController::new(
        config,
        Arc::clone(&catalog),
        PersistenceAdapter::new(Arc::new(storage.clone()), catalog),
        DomApplier::new(Arc::new(document.clone())),
    )
    .unwrap();

    Harness {
        controller,
        storage,
        document,
    }
}

fn stored(storage: &MemoryStorage) -> Option<String> {
    storage.get_item(STORAGE_KEY).unwrap()
}

/// Accepts reads, refuses writes. Models a full quota.
struct ReadOnlyStorage;

impl KeyValueStore for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded {
            key: key.to_string(),
        })
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_navigation_wraps_both_ways() {
    let h = harness(abc_catalog(), &config("a", false));
    assert_eq!(h.controller.theme_id(), "a");

    for expected in ["b", "c", "a"] {
        let outcome = h.controller.next_theme().await;
        assert_eq!(
            outcome,
            SwitchOutcome::Applied {
                theme_id: expected.to_string(),
                persisted: true
            }
        );
        assert_eq!(h.controller.theme_id(), expected);
    }

    h.controller.previous_theme().await;
    assert_eq!(h.controller.theme_id(), "c");
    assert_some_eq!(stored(&h.storage), "c".to_string());
    assert_some_eq!(h.document.attribute(THEME_ATTRIBUTE), "c".to_string());

    for _ in 0..100 {
        h.controller.random_theme().await;
        assert!(["a", "b", "c"].contains(&h.controller.theme_id().as_str()));
    }
}

#[tokio::test(start_paused = true)]
async fn test_switch_updates_state_document_and_storage() {
    let h = harness(ThemeCatalog::builtin().unwrap(), &config("pure-minimal", true));

    let outcome = h.controller.set_theme("neon-tokyo").await;
    assert!(outcome.is_applied());

    assert_eq!(h.controller.theme_id(), "neon-tokyo");
    assert_some_eq!(stored(&h.storage), "neon-tokyo".to_string());
    assert_some_eq!(
        h.document.property("--color-primary"),
        "14, 165, 233".to_string()
    );
    assert_some_eq!(
        h.document.attribute("data-category"),
        "cyberpunk".to_string()
    );
}

#[tokio::test(start_paused = true)]
async fn test_same_theme_is_noop() {
    let h = harness(abc_catalog(), &config("a", true));
    let before = h.document.snapshot();

    assert_eq!(h.controller.set_theme("a").await, SwitchOutcome::AlreadyActive);
    assert!(!h.controller.is_transitioning());
    assert_eq!(h.document.snapshot(), before);
    assert_none!(stored(&h.storage));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_theme_changes_nothing() {
    let h = harness(abc_catalog(), &config("a", true));
    h.controller.set_theme("b").await;
    tokio::time::sleep(Duration::from_millis(400)).await;

    let document_before = h.document.snapshot();
    let outcome = h.controller.set_theme("does-not-exist").await;

    assert_eq!(
        outcome,
        SwitchOutcome::Rejected(ThemeError::UnknownTheme("does-not-exist".to_string()))
    );
    assert_eq!(h.controller.theme_id(), "b");
    assert!(!h.controller.is_transitioning());
    assert_eq!(h.document.snapshot(), document_before);
    assert_some_eq!(stored(&h.storage), "b".to_string());
}

#[tokio::test(start_paused = true)]
async fn test_storage_failure_does_not_block_switch() {
    let catalog = abc_catalog();
    let document = InMemoryDocument::new();
    let controller = ThemeController::new(
        &config("a", false),
        Arc::clone(&catalog),
        PersistenceAdapter::new(Arc::new(ReadOnlyStorage), catalog),
        DomApplier::new(Arc::new(document.clone())),
    )
    .unwrap();

    let outcome = controller.set_theme("c").await;

    assert_eq!(
        outcome,
        SwitchOutcome::Applied {
            theme_id: "c".to_string(),
            persisted: false
        }
    );
    assert_eq!(controller.theme_id(), "c");
    assert_some_eq!(document.attribute(THEME_ATTRIBUTE), "c".to_string());
}

#[tokio::test(start_paused = true)]
async fn test_transition_flag_lifecycle() {
    let h = harness(abc_catalog(), &config("a", true));
    assert!(!h.controller.is_transitioning());

    h.controller.set_theme("b").await;
    assert!(h.controller.is_transitioning());
    assert!(h.document.has_class(TRANSITION_CLASS));
    assert_eq!(
        h.controller.phase(),
        ThemePhase::Transitioning {
            from: "a".to_string(),
            to: "b".to_string()
        }
    );

    tokio::time::sleep(Duration::from_millis(301)).await;
    tokio::task::yield_now().await;

    assert!(!h.controller.is_transitioning());
    assert!(!h.document.has_class(TRANSITION_CLASS));
    assert_eq!(
        h.controller.phase(),
        ThemePhase::Idle {
            theme_id: "b".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_does_not_end_newer_transition() {
    let h = harness(abc_catalog(), &config("a", true));

    h.controller.set_theme("b").await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    h.controller.set_theme("c").await;

    // The first switch's timer has fired by now
    tokio::time::sleep(Duration::from_millis(150)).await;
    tokio::task::yield_now().await;
    assert!(h.controller.is_transitioning());
    assert!(h.document.has_class(TRANSITION_CLASS));

    tokio::time::sleep(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;
    assert!(!h.controller.is_transitioning());
    assert!(!h.document.has_class(TRANSITION_CLASS));
}

#[tokio::test(start_paused = true)]
async fn test_transitions_disabled_never_raise_flag() {
    let h = harness(abc_catalog(), &config("a", false));

    h.controller.set_theme("b").await;
    assert!(!h.controller.is_transitioning());
    assert!(!h.document.has_class(TRANSITION_CLASS));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_switches_stay_consistent() {
    let h = harness(abc_catalog(), &config("a", true));

    let (first, second) = tokio::join!(h.controller.set_theme("b"), h.controller.set_theme("c"));
    assert_eq!(first, SwitchOutcome::Superseded);
    assert_eq!(
        second,
        SwitchOutcome::Applied {
            theme_id: "c".to_string(),
            persisted: true
        }
    );

    assert_eq!(h.controller.theme_id(), "c");
    assert_some_eq!(h.document.attribute(THEME_ATTRIBUTE), "c".to_string());
    assert_some_eq!(stored(&h.storage), "c".to_string());
}

#[tokio::test(start_paused = true)]
async fn test_switching_back_during_yield_wins() {
    let h = harness(abc_catalog(), &config("a", true));

    let (first, second) = tokio::join!(h.controller.set_theme("b"), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        h.controller.set_theme("a").await
    });

    assert_eq!(first, SwitchOutcome::Superseded);
    assert_eq!(
        second,
        SwitchOutcome::Applied {
            theme_id: "a".to_string(),
            persisted: true
        }
    );
    assert_eq!(h.controller.theme_id(), "a");
    assert_some_eq!(h.document.attribute(THEME_ATTRIBUTE), "a".to_string());
    assert_some_eq!(stored(&h.storage), "a".to_string());
}

#[tokio::test(start_paused = true)]
async fn test_repeat_request_for_pending_theme_is_noop() {
    let h = harness(abc_catalog(), &config("a", false));

    let (first, second) = tokio::join!(h.controller.set_theme("b"), h.controller.set_theme("b"));
    assert!(first.is_applied());
    assert_eq!(second, SwitchOutcome::AlreadyActive);
    assert_eq!(h.controller.theme_id(), "b");
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_switch_rolls_back_transition() {
    let h = harness(abc_catalog(), &config("a", true));

    let result = tokio::time::timeout(Duration::from_millis(5), h.controller.set_theme("b")).await;
    assert!(result.is_err());

    assert!(!h.controller.is_transitioning());
    assert!(!h.document.has_class(TRANSITION_CLASS));
    assert_eq!(
        h.controller.phase(),
        ThemePhase::Idle {
            theme_id: "a".to_string()
        }
    );
    assert_eq!(h.controller.theme_id(), "a");
    assert_some_eq!(h.document.attribute(THEME_ATTRIBUTE), "a".to_string());
    assert_none!(stored(&h.storage));

    assert!(h.controller.set_theme("b").await.is_applied());
    assert_eq!(h.controller.theme_id(), "b");
}

#[tokio::test(start_paused = true)]
async fn test_random_draws_are_seeded_and_valid() {
    let catalog = ThemeCatalog::builtin().unwrap();
    let first = harness(Arc::clone(&catalog), &config("pure-minimal", false));
    let second = harness(Arc::clone(&catalog), &config("pure-minimal", false));

    let mut visited = std::collections::HashSet::new();
    for _ in 0..100 {
        let outcome = first.controller.random_theme().await;
        assert!(matches!(
            outcome,
            SwitchOutcome::Applied { .. } | SwitchOutcome::AlreadyActive
        ));

        second.controller.random_theme().await;

        let id = first.controller.theme_id();
        assert!(catalog.contains(&id));
        assert_eq!(id, second.controller.theme_id());
        visited.insert(id);
    }

    assert!(visited.len() > 1);
}

#[tokio::test(start_paused = true)]
async fn test_initial_theme_from_storage() {
    let catalog = abc_catalog();
    let storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, "c").unwrap();
    let document = InMemoryDocument::new();

    let controller = ThemeController::new(
        &config("a", true),
        Arc::clone(&catalog),
        PersistenceAdapter::new(Arc::new(storage), catalog),
        DomApplier::new(Arc::new(document.clone())),
    )
    .unwrap();

    assert_eq!(controller.theme_id(), "c");
    assert!(!controller.is_transitioning());
    assert_some_eq!(document.attribute(THEME_ATTRIBUTE), "c".to_string());
    assert!(!document.has_class(TRANSITION_CLASS));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_persisted_value_falls_back_to_default() {
    let catalog = abc_catalog();
    let storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, "retired").unwrap();

    let controller = ThemeController::new(
        &config("b", true),
        Arc::clone(&catalog),
        PersistenceAdapter::new(Arc::new(storage), catalog),
        DomApplier::headless(),
    )
    .unwrap();

    assert_eq!(controller.theme_id(), "b");
}

#[test]
fn test_unknown_default_is_rejected() {
    let catalog = abc_catalog();
    let result = ThemeController::new(
        &config("zzz", true),
        Arc::clone(&catalog),
        PersistenceAdapter::unavailable(catalog),
        DomApplier::headless(),
    );

    assert!(matches!(result, Err(ThemeError::UnknownTheme(ref id)) if id == "zzz"));
}

#[tokio::test(start_paused = true)]
async fn test_headless_and_storageless_controller_still_switches() {
    let catalog = abc_catalog();
    let controller = ThemeController::new(
        &config("a", true),
        Arc::clone(&catalog),
        PersistenceAdapter::unavailable(catalog),
        DomApplier::headless(),
    )
    .unwrap();

    let outcome = controller.next_theme().await;
    assert_eq!(
        outcome,
        SwitchOutcome::Applied {
            theme_id: "b".to_string(),
            persisted: false
        }
    );
    assert_eq!(controller.theme_id(), "b");
}

#[tokio::test(start_paused = true)]
async fn test_provider_hooks_follow_active_theme() {
    let catalog = ThemeCatalog::builtin().unwrap();
    let document = InMemoryDocument::new();
    let provider = assert_ok!(ThemeProvider::new(
        config("pure-minimal", true),
        Arc::clone(&catalog),
        PersistenceAdapter::new(Arc::new(MemoryStorage::new()), Arc::clone(&catalog)),
        DomApplier::new(Arc::new(document.clone())),
    ));
    assert!(document.stylesheet(TRANSITION_STYLESHEET_ID).is_some());

    let control = provider.control();
    assert_eq!(control.current_index(), 5);
    assert!(control.can_go_next());
    assert!(control.can_go_previous());

    let outcome = control.set_theme_by_index(0).await;
    assert!(outcome.is_some_and(|o| o.is_applied()));
    assert_eq!(provider.info().theme_id(), "neon-tokyo");
    assert!(!provider.control().can_go_previous());
    assert_eq!(provider.transition().transition_class(), TRANSITION_CLASS);
    assert_eq!(
        provider.css().hex(engine::ColorRole::Primary),
        "#0ea5e9".to_string()
    );

    assert!(provider.control().set_theme_by_index(99).await.is_none());

    drop(provider);
    assert!(document.stylesheet(TRANSITION_STYLESHEET_ID).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_abandons_pending_timer() {
    let h = harness(abc_catalog(), &config("a", true));

    h.controller.set_theme("b").await;
    h.controller.shutdown();
    tokio::time::sleep(Duration::from_millis(400)).await;
    tokio::task::yield_now().await;

    assert!(h.controller.is_transitioning());
}
