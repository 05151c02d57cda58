//! # Theme Catalog
//!
//! Static registry of theme records, built once and never mutated.
//!
//! The catalog is a pure lookup table: every operation is free of side
//! effects and independent of which theme is currently active. Insertion
//! order is significant because next/previous navigation wraps around it.
//!
//! ## Construction
//!
//! ```no_run
//! use engine::catalog::ThemeCatalog;
//!
//! // The embedded catalog (cached after the first call)
//! let catalog = ThemeCatalog::builtin()?;
//! assert_eq!(catalog.theme_ids().first(), Some(&"neon-tokyo"));
//! ```
//!
//! A record missing a color role, carrying an unparseable triple or sharing an
//! id with another record fails construction with a
//! [`CatalogError`](crate::errors::CatalogError).

pub mod loader;
pub mod types;
pub mod validation;

use crate::errors::CatalogError;
use crate::validation::Validator;
use loader::{BUILTIN_THEMES, parse_themes};
use once_cell::sync::OnceCell;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use validation::ThemeRecordValidator;

pub use types::{
    CatalogStats, ColorRole, ColorTriple, ThemeCategory, ThemeColors, ThemeRecord,
};

/// Theme used when nothing valid is persisted.
pub const DEFAULT_THEME_ID: &str = "pure-minimal";

static BUILTIN_CATALOG: OnceCell<Arc<ThemeCatalog>> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<Arc<ThemeRecord>>,
    index: HashMap<String, usize>,
}

impl ThemeCatalog {
    /// Build a catalog from records, validating each one.
    pub fn from_records(records: Vec<ThemeRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut themes = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for record in records {
            ThemeRecordValidator.validate(&record)?;

            if index.contains_key(&record.id) {
                return Err(CatalogError::DuplicateThemeId { id: record.id });
            }

            index.insert(record.id.clone(), themes.len());
            themes.push(Arc::new(record));
        }

        log::debug!("Theme catalog built with {} themes", themes.len());
        Ok(Self { themes, index })
    }

    /// Build a catalog from `(source_name, toml_content)` pairs.
    pub fn from_toml_sources<'a, I>(sources: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::from_records(parse_themes(sources)?)
    }

    /// The embedded catalog, parsed and validated on first use.
    pub fn builtin() -> Result<Arc<ThemeCatalog>, CatalogError> {
        BUILTIN_CATALOG
            .get_or_try_init(|| {
                Self::from_toml_sources(BUILTIN_THEMES.iter().map(|s| (s.name, s.content)))
                    .map(Arc::new)
            })
            .cloned()
    }

    pub fn get_theme(&self, id: &str) -> Option<&ThemeRecord> {
        self.index.get(id).map(|&i| self.themes[i].as_ref())
    }

    /// Shared handle to a record, for holders that outlive the borrow.
    pub fn get_shared(&self, id: &str) -> Option<Arc<ThemeRecord>> {
        self.index.get(id).map(|&i| Arc::clone(&self.themes[i]))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Position of `id` in navigation order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn all_themes(&self) -> impl Iterator<Item = &ThemeRecord> {
        self.themes.iter().map(|t| t.as_ref())
    }

    pub fn themes_by_category(&self, category: ThemeCategory) -> Vec<&ThemeRecord> {
        self.all_themes()
            .filter(|theme| theme.category == category)
            .collect()
    }

    /// Ids in navigation order.
    pub fn theme_ids(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn theme_id_at(&self, index: usize) -> Option<&str> {
        self.themes.get(index).map(|t| t.id.as_str())
    }

    /// Every category tag, including ones with no themes in this catalog.
    pub fn categories(&self) -> &'static [ThemeCategory] {
        &ThemeCategory::ALL
    }

    /// Uniform draw over all ids. The currently active id is not excluded.
    pub fn random_theme<R>(&self, rng: &mut R) -> &str
    where
        R: Rng + ?Sized,
    {
        let i = rng.gen_range(0..self.themes.len());
        &self.themes[i].id
    }

    /// The id after `id`, wrapping from last to first.
    ///
    /// An id outside the catalog navigates as if positioned before the first
    /// entry, so it yields the first id.
    pub fn next_theme(&self, id: &str) -> &str {
        let next = match self.index_of(id) {
            Some(i) => (i + 1) % self.themes.len(),
            None => 0,
        };
        &self.themes[next].id
    }

    /// The id before `id`, wrapping from first to last.
    ///
    /// An id outside the catalog yields the last id.
    pub fn previous_theme(&self, id: &str) -> &str {
        let len = self.themes.len();
        let previous = match self.index_of(id) {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        &self.themes[previous].id
    }

    pub fn stats(&self) -> CatalogStats {
        let mut themes_per_category: Vec<(ThemeCategory, usize)> = Vec::new();

        for theme in self.all_themes() {
            match themes_per_category
                .iter_mut()
                .find(|(category, _)| *category == theme.category)
            {
                Some((_, count)) => *count += 1,
                None => themes_per_category.push((theme.category, 1)),
            }
        }

        let categories: Vec<ThemeCategory> =
            themes_per_category.iter().map(|(c, _)| *c).collect();

        CatalogStats {
            total_themes: self.themes.len(),
            category_count: categories.len(),
            categories,
            themes_per_category,
        }
    }
}
