//! # Document Application Layer
//!
//! The only component allowed to mutate global presentation state. It writes
//! a theme's colors onto root custom properties (`--color-<role>`, holding the
//! bare `R, G, B` triple) and stamps `data-theme` / `data-category` on the root
//! element so stylesheets can branch on either.
//!
//! The presentation target is abstracted behind [`StyleTarget`]. A
//! [`DomApplier`] without a target (server-side rendering, tests of pure
//! logic) silently skips every call.

use crate::catalog::{ColorRole, ThemeRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const CATEGORY_ATTRIBUTE: &str = "data-category";
pub const TRANSITION_CLASS: &str = "theme-transitioning";
pub const TRANSITION_DURATION_PROPERTY: &str = "--theme-transition-duration";
pub const TRANSITION_STYLESHEET_ID: &str = "theme-transitions";

/// Mutable presentation surface: the document root plus named stylesheets.
pub trait StyleTarget: Send + Sync {
    fn set_property(&self, name: &str, value: &str);

    fn set_attribute(&self, name: &str, value: &str);

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Insert a stylesheet element unless one with `id` already exists.
    fn install_stylesheet(&self, id: &str, css: &str);

    fn remove_stylesheet(&self, id: &str);
}

/// Observable state of an [`InMemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    pub properties: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub stylesheets: BTreeMap<String, String>,
}

/// Headless document. Clones are handles onto the same root.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    state: Arc<Mutex<DocumentSnapshot>>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, f: impl FnOnce(&mut DocumentSnapshot)) {
        match self.state.lock() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.snapshot().properties.get(name).cloned()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.snapshot().attributes.get(name).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.snapshot().classes.contains(class)
    }

    pub fn stylesheet(&self, id: &str) -> Option<String> {
        self.snapshot().stylesheets.get(id).cloned()
    }

    /// Render the root state as a `:root` rule, attributes as a comment header.
    ///
    /// Only theme state is rendered. The transition duration is an animation
    /// detail and is left out, so the output is the same whether or not a
    /// switch happened in this session.
    pub fn root_css(&self) -> String {
        let snapshot = self.snapshot();
        let mut css = String::new();

        if !snapshot.attributes.is_empty() {
            let attrs: Vec<String> = snapshot
                .attributes
                .iter()
                .map(|(name, value)| format!("{name}=\"{value}\""))
                .collect();
            css.push_str(&format!("/* {} */\n", attrs.join(" ")));
        }

        css.push_str(":root {\n");
        for (name, value) in &snapshot.properties {
            if name == TRANSITION_DURATION_PROPERTY {
                continue;
            }
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

impl StyleTarget for InMemoryDocument {
    fn set_property(&self, name: &str, value: &str) {
        self.update(|s| {
            s.properties.insert(name.to_string(), value.to_string());
        });
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.update(|s| {
            s.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn add_class(&self, class: &str) {
        self.update(|s| {
            s.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, class: &str) {
        self.update(|s| {
            s.classes.remove(class);
        });
    }

    fn install_stylesheet(&self, id: &str, css: &str) {
        self.update(|s| {
            s.stylesheets
                .entry(id.to_string())
                .or_insert_with(|| css.to_string());
        });
    }

    fn remove_stylesheet(&self, id: &str) {
        self.update(|s| {
            s.stylesheets.remove(id);
        });
    }
}

/// Cross-fade rules installed while transitions are enabled.
pub fn transition_stylesheet() -> String {
    let duration = format!("var({TRANSITION_DURATION_PROPERTY}, 300ms)");
    let fade = |property: &str| format!("{property} {duration} ease-in-out");

    let root_rules = [
        fade("background-color"),
        fade("color"),
        fade("border-color"),
    ]
    .join(",\n    ");

    let descendant_rules = [
        fade("background-color"),
        fade("color"),
        fade("border-color"),
        fade("box-shadow"),
    ]
    .join(",\n    ");

    format!(
        ".{TRANSITION_CLASS} {{\n  transition:\n    {root_rules};\n}}\n\n\
         .{TRANSITION_CLASS} *,\n.{TRANSITION_CLASS} *::before,\n.{TRANSITION_CLASS} *::after {{\n  \
         transition:\n    {descendant_rules} !important;\n}}\n"
    )
}

/// Pushes themes onto a [`StyleTarget`], or does nothing when there is none.
#[derive(Clone, Default)]
pub struct DomApplier {
    target: Option<Arc<dyn StyleTarget>>,
}

impl DomApplier {
    pub fn new(target: Arc<dyn StyleTarget>) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Applier for a context with no document.
    pub fn headless() -> Self {
        Self { target: None }
    }

    pub fn has_document(&self) -> bool {
        self.target.is_some()
    }

    /// Write every color role and the identifying attributes. Idempotent.
    pub fn apply(&self, theme: &ThemeRecord) {
        let Some(target) = &self.target else {
            return;
        };

        for role in ColorRole::ALL {
            target.set_property(&role.custom_property(), theme.color(role).as_str());
        }

        target.set_attribute(THEME_ATTRIBUTE, &theme.id);
        target.set_attribute(CATEGORY_ATTRIBUTE, theme.category.as_str());
    }

    pub fn begin_transition(&self, duration: Duration) {
        if let Some(target) = &self.target {
            target.set_property(
                TRANSITION_DURATION_PROPERTY,
                &format!("{}ms", duration.as_millis()),
            );
            target.add_class(TRANSITION_CLASS);
        }
    }

    pub fn end_transition(&self) {
        if let Some(target) = &self.target {
            target.remove_class(TRANSITION_CLASS);
        }
    }

    pub fn install_transition_styles(&self) {
        if let Some(target) = &self.target {
            target.install_stylesheet(TRANSITION_STYLESHEET_ID, &transition_stylesheet());
        }
    }

    pub fn remove_transition_styles(&self) {
        if let Some(target) = &self.target {
            target.remove_stylesheet(TRANSITION_STYLESHEET_ID);
        }
    }
}

impl std::fmt::Debug for DomApplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomApplier")
            .field("has_document", &self.target.is_some())
            .finish()
    }
}
