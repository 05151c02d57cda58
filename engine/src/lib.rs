//! # Lumen Engine
//!
//! Runtime theming for the Lumen portfolio site. A fixed catalog of named
//! color palettes, one of which is active at a time; switching is animated,
//! remembered across sessions and pushed onto the document as CSS custom
//! properties.
//!
//! ## Modules
//!
//! - [`catalog`] - Immutable theme registry, lookup and navigation order
//! - [`persistence`] - Remembering the chosen theme in a key-value store
//! - [`document`] - Writing a theme onto the document root
//! - [`controller`] - Active theme state and the switching protocol
//! - [`provider`] - Startup configuration and the handle consumers hold
//! - [`hooks`] - Read-only views for styling, navigation and theme info
//! - [`errors`] - Error types shared by the modules above
//! - [`validation`] - Validation trait used by the catalog

pub mod catalog;
pub mod controller;
pub mod document;
pub mod errors;
pub mod hooks;
pub mod persistence;
pub mod provider;
pub mod validation;

pub use catalog::{ColorRole, ThemeCatalog, ThemeCategory, ThemeRecord};
pub use controller::{SwitchOutcome, ThemeController};
pub use errors::{ThemeError, ThemeResult};
pub use provider::{ProviderConfig, ThemeProvider};
