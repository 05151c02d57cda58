//! # Consumption Hooks
//!
//! Read-only views derived from the controller state and the catalog. None of
//! them hold state of their own; a view is cheap to build and reflects the
//! theme that was active when it was built.
//!
//! CSS references resolve through the root custom properties rather than
//! embedding color values, so anything styled with [`css`] or [`css_alpha`]
//! repaints on the next theme switch without being rebuilt.

use crate::catalog::{
    CatalogStats, ColorRole, ThemeCatalog, ThemeCategory, ThemeColors, ThemeRecord,
};
use crate::controller::{SwitchOutcome, ThemeController};
use crate::document::TRANSITION_CLASS;
use std::sync::Arc;

/// `rgb(var(--color-<role>))`
pub fn css(role: ColorRole) -> String {
    format!("rgb(var({}))", role.custom_property())
}

/// `rgb(var(--color-<role>) / <alpha>)` with alpha clamped to `[0, 1]`.
///
/// NaN is treated as fully transparent.
pub fn css_alpha(role: ColorRole, alpha: f64) -> String {
    format!(
        "rgb(var({}) / {})",
        role.custom_property(),
        clamp_alpha(alpha)
    )
}

pub fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        return 0.0;
    }
    // abs() folds -0.0 into 0.0
    alpha.clamp(0.0, 1.0).abs()
}

/// Whether `key` names a color role.
pub fn color_exists(key: &str) -> bool {
    key.parse::<ColorRole>().is_ok()
}

/// CSS helpers bound to one theme.
#[derive(Debug, Clone)]
pub struct ThemeCss {
    theme: Arc<ThemeRecord>,
}

impl ThemeCss {
    pub fn new(theme: Arc<ThemeRecord>) -> Self {
        Self { theme }
    }

    pub fn css(&self, role: ColorRole) -> String {
        css(role)
    }

    pub fn css_alpha(&self, role: ColorRole, alpha: f64) -> String {
        css_alpha(role, alpha)
    }

    /// The stored `R, G, B` triple.
    pub fn rgb(&self, role: ColorRole) -> &str {
        self.theme.color(role).as_str()
    }

    /// `#rrggbb`, or `#000000` if the triple does not parse.
    pub fn hex(&self, role: ColorRole) -> String {
        self.theme.color(role).to_hex()
    }

    /// WCAG relative luminance of a role, in `[0, 1]`.
    pub fn relative_luminance(&self, role: ColorRole) -> Option<f64> {
        let (r, g, b) = self.theme.color(role).components()?;

        let linear = |channel: u8| {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };

        Some(0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b))
    }

    /// Resolve a style map: values naming a color role become CSS references,
    /// everything else passes through untouched. Order is preserved.
    pub fn create_styles<'a, I>(&self, styles: I) -> Vec<(String, String)>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        styles
            .into_iter()
            .map(|(property, value)| {
                let resolved = match value.parse::<ColorRole>() {
                    Ok(role) => css(role),
                    Err(_) => value.to_string(),
                };
                (property.to_string(), resolved)
            })
            .collect()
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.theme.colors
    }
}

/// Navigation helpers for theme pickers and keyboard shortcuts.
pub struct ThemeControl<'a> {
    controller: &'a ThemeController,
}

impl<'a> ThemeControl<'a> {
    pub fn new(controller: &'a ThemeController) -> Self {
        Self { controller }
    }

    pub fn theme_ids(&self) -> Vec<&'a str> {
        self.controller.catalog().theme_ids()
    }

    pub fn all_themes(&self) -> Vec<&'a ThemeRecord> {
        self.controller.catalog().all_themes().collect()
    }

    pub fn themes_by_category(&self, category: ThemeCategory) -> Vec<&'a ThemeRecord> {
        self.controller.catalog().themes_by_category(category)
    }

    pub fn current_index(&self) -> usize {
        let id = self.controller.theme_id();
        // The active id always resolves, so the index is always present
        self.controller.catalog().index_of(&id).unwrap_or_default()
    }

    /// Whether the active theme is not the last one. Navigation wraps
    /// regardless; this is for disabling "next" buttons in linear pickers.
    pub fn can_go_next(&self) -> bool {
        self.current_index() + 1 < self.controller.catalog().len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index() > 0
    }

    /// Switch to the theme at `index`; `None` if out of range.
    pub async fn set_theme_by_index(&self, index: usize) -> Option<SwitchOutcome> {
        let id = self.controller.catalog().theme_id_at(index)?.to_string();
        Some(self.controller.set_theme(&id).await)
    }

    pub async fn set_theme(&self, id: &str) -> SwitchOutcome {
        self.controller.set_theme(id).await
    }

    pub async fn next_theme(&self) -> SwitchOutcome {
        self.controller.next_theme().await
    }

    pub async fn previous_theme(&self) -> SwitchOutcome {
        self.controller.previous_theme().await
    }

    pub async fn random_theme(&self) -> SwitchOutcome {
        self.controller.random_theme().await
    }
}

/// Descriptive view of the active theme and the catalog around it.
pub struct ThemeInfo<'a> {
    catalog: &'a ThemeCatalog,
    theme: Arc<ThemeRecord>,
}

impl<'a> ThemeInfo<'a> {
    pub fn new(catalog: &'a ThemeCatalog, theme: Arc<ThemeRecord>) -> Self {
        Self { catalog, theme }
    }

    pub fn theme(&self) -> &ThemeRecord {
        &self.theme
    }

    pub fn theme_id(&self) -> &str {
        &self.theme.id
    }

    pub fn name(&self) -> &str {
        &self.theme.name
    }

    pub fn category(&self) -> ThemeCategory {
        self.theme.category
    }

    pub fn all_themes(&self) -> Vec<&'a ThemeRecord> {
        self.catalog.all_themes().collect()
    }

    /// Themes sharing the active theme's category, catalog order.
    pub fn themes_in_category(&self) -> Vec<&'a ThemeRecord> {
        self.catalog.themes_by_category(self.theme.category)
    }

    pub fn stats(&self) -> CatalogStats {
        self.catalog.stats()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTransition {
    is_transitioning: bool,
}

impl ThemeTransition {
    pub fn new(is_transitioning: bool) -> Self {
        Self { is_transitioning }
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    /// Class to put on elements that animate their own colors.
    pub fn transition_class(&self) -> &'static str {
        if self.is_transitioning {
            TRANSITION_CLASS
        } else {
            ""
        }
    }
}
