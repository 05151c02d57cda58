use engine::errors::{CatalogError, StorageError, ThemeError};
use std::fmt::Display;

/// Application-wide error type for the Lumen host.
///
/// Engine errors are folded into string-carrying variants at the boundary so
/// that the command layer can report them uniformly.
///
/// # Error Categories
///
/// - [`AppError::Theme`] - Catalog construction or theme lookup failures
/// - [`AppError::Config`] - Configuration loading and validation errors
/// - [`AppError::Storage`] - Theme persistence failures the user asked about
/// - [`AppError::Io`] - Terminal and file system output failures
///
/// # Examples
///
/// ```no_run
/// use lumen::error::{AppError, AppResult};
///
/// fn require_theme(id: &str, known: &[&str]) -> AppResult<()> {
///     if known.contains(&id) {
///         Ok(())
///     } else {
///         Err(AppError::Theme(format!("Theme '{id}' not found")))
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Theme(String),
    Config(String),
    Storage(String),
    Io(String),
}

impl AppError {
    /// Short hint printed after the error on the command line.
    pub fn suggestion(&self) -> &'static str {
        match self {
            AppError::Theme(_) => "Run `lumen list` to see the available themes.",
            AppError::Config(_) => "Check lumen.toml and LUMEN__* environment variables.",
            AppError::Storage(_) => {
                "Check the storage path, or set storage.enabled = false to run without persistence."
            }
            AppError::Io(_) => "Check that the output is writable.",
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Theme(msg) => write!(f, "Theme Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Storage(msg) => write!(f, "Storage Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        match err {
            ThemeError::Storage(e) => AppError::Storage(e.to_string()),
            other => AppError::Theme(other.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Theme(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
