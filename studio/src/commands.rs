//! Command execution against a [`ThemeProvider`] bound to a headless
//! document. Every switch goes through the controller, so the remembered
//! theme and the rendered root CSS come out exactly as a browser page would
//! see them.

use crate::cli::Command;
use crate::config::AppConfig;
use crate::config::app::StorageConfig;
use crate::error::{AppError, AppResult};
use engine::catalog::{ColorRole, ThemeCatalog, ThemeRecord};
use engine::controller::SwitchOutcome;
use engine::document::{DomApplier, InMemoryDocument};
use engine::hooks::ThemeCss;
use engine::persistence::{FileStorage, PersistenceAdapter};
use engine::provider::ThemeProvider;
use std::io::Write;
use std::sync::Arc;

/// Directory name under the user's config dir
pub const APP_NAME: &str = "lumen";

pub struct Studio {
    provider: ThemeProvider,
    document: InMemoryDocument,
}

impl Studio {
    pub fn new(config: &AppConfig, catalog: Arc<ThemeCatalog>) -> AppResult<Self> {
        let persistence = build_persistence(config.storage(), Arc::clone(&catalog));
        let document = InMemoryDocument::new();

        let provider = ThemeProvider::new(
            config.provider_config(),
            catalog,
            persistence,
            DomApplier::new(Arc::new(document.clone())),
        )?;

        Ok(Self { provider, document })
    }

    pub fn provider(&self) -> &ThemeProvider {
        &self.provider
    }

    pub fn document(&self) -> &InMemoryDocument {
        &self.document
    }

    pub async fn run<W: Write>(&self, command: &Command, out: &mut W) -> AppResult<()> {
        let controller = self.provider.controller();

        match command {
            Command::Set { id } => {
                let outcome = controller.set_theme(id).await;
                self.report_switch(outcome, out)
            }
            Command::Next => {
                let outcome = controller.next_theme().await;
                self.report_switch(outcome, out)
            }
            Command::Previous => {
                let outcome = controller.previous_theme().await;
                self.report_switch(outcome, out)
            }
            Command::Random => {
                let outcome = controller.random_theme().await;
                self.report_switch(outcome, out)
            }
            Command::Css => {
                write!(out, "{}", self.document.root_css())?;
                Ok(())
            }
            Command::Show { id } => self.show(id.as_deref(), out),
            Command::List { category } => {
                let control = self.provider.control();
                let themes = match category {
                    Some(category) => control.themes_by_category(*category),
                    None => control.all_themes(),
                };
                let active = controller.theme_id();

                for theme in themes {
                    let marker = if theme.id == active { "*" } else { " " };
                    writeln!(
                        out,
                        "{marker} {:<18} {:<18} {}",
                        theme.id, theme.name, theme.category
                    )?;
                }
                Ok(())
            }
            Command::Stats => {
                let info = self.provider.info();
                let stats = info.stats();

                writeln!(out, "Total themes: {}", stats.total_themes)?;
                writeln!(out, "Categories:   {}", stats.category_count)?;
                writeln!(out, "Active theme: {} ({})", info.name(), info.theme_id())?;
                for (category, count) in &stats.themes_per_category {
                    writeln!(out, "  {:<10} {count}", category.as_str())?;
                }
                Ok(())
            }
            Command::Categories => {
                let catalog = self.provider.catalog();
                let stats = catalog.stats();

                for category in catalog.categories() {
                    writeln!(
                        out,
                        "{:<10} {}",
                        category.as_str(),
                        stats.count_for(*category)
                    )?;
                }
                Ok(())
            }
            Command::Clear => {
                let persistence = controller.persistence();
                if !persistence.is_available() {
                    writeln!(out, "Storage is disabled; nothing to clear")?;
                    return Ok(());
                }
                if !persistence.clear() {
                    return Err(AppError::Storage(
                        "Failed to clear the remembered theme".to_string(),
                    ));
                }
                writeln!(out, "Cleared remembered theme")?;
                Ok(())
            }
        }
    }

    fn report_switch<W: Write>(&self, outcome: SwitchOutcome, out: &mut W) -> AppResult<()> {
        match outcome {
            SwitchOutcome::Rejected(err) => return Err(err.into()),
            SwitchOutcome::AlreadyActive => {
                writeln!(
                    out,
                    "Theme '{}' is already active",
                    self.provider.controller().theme_id()
                )?;
            }
            SwitchOutcome::Superseded => {
                writeln!(
                    out,
                    "Switch overtaken by a later request; active theme is '{}'",
                    self.provider.controller().theme_id()
                )?;
            }
            SwitchOutcome::Applied {
                theme_id,
                persisted,
            } => {
                let name = self.provider.info().name().to_string();
                writeln!(out, "Switched to {name} ({theme_id})")?;
                if !persisted {
                    writeln!(out, "Note: theme was not remembered (storage unavailable)")?;
                }
            }
        }

        writeln!(out)?;
        write!(out, "{}", self.document.root_css())?;
        Ok(())
    }

    fn show<W: Write>(&self, id: Option<&str>, out: &mut W) -> AppResult<()> {
        let theme: Arc<ThemeRecord> = match id {
            Some(id) => self
                .provider
                .catalog()
                .get_shared(id)
                .ok_or_else(|| AppError::Theme(format!("Theme '{id}' not found")))?,
            None => self.provider.controller().current_theme(),
        };
        let css = ThemeCss::new(Arc::clone(&theme));

        writeln!(out, "{} ({})", theme.name, theme.id)?;
        writeln!(out, "Category: {}", theme.category)?;
        if !theme.description.is_empty() {
            writeln!(out, "{}", theme.description)?;
        }
        writeln!(out)?;

        for role in ColorRole::ALL {
            writeln!(
                out,
                "  {:<18} {:<15} {}",
                role.as_str(),
                css.rgb(role),
                css.hex(role)
            )?;
        }
        Ok(())
    }
}

fn build_persistence(storage: &StorageConfig, catalog: Arc<ThemeCatalog>) -> PersistenceAdapter {
    if !storage.enabled() {
        return PersistenceAdapter::unavailable(catalog).with_key(storage.key());
    }

    let store = match storage.path() {
        Some(path) => Some(FileStorage::new(path)),
        None => FileStorage::in_config_dir(APP_NAME),
    };

    match store {
        Some(store) => {
            log::debug!("Remembering theme in {}", store.path().display());
            PersistenceAdapter::new(Arc::new(store), catalog).with_key(storage.key())
        }
        None => {
            log::warn!("No config directory available, theme will not be remembered");
            PersistenceAdapter::unavailable(catalog).with_key(storage.key())
        }
    }
}
