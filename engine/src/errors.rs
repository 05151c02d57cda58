use thiserror::Error;

/// Errors raised while building a [`ThemeCatalog`](crate::catalog::ThemeCatalog).
///
/// Every variant is fatal for catalog construction: a catalog either contains
/// only fully-formed theme records or it does not exist at all. There is no
/// runtime fallback for a record with a missing color role.
///
/// # Error Categories
///
/// ## Source Errors
/// - [`Parse`] - A theme document is not valid TOML or does not match the
///   fixed theme shape (missing or unknown color role, unknown category)
///
/// ## Record Errors
/// - [`InvalidThemeId`] - The id is empty, too long or contains characters that
///   are not allowed in a persistence token
/// - [`MissingField`] - A required descriptive field is empty
/// - [`InvalidColor`] - A color value is not an `R, G, B` triple of integers
///   in `0..=255`
///
/// ## Catalog Errors
/// - [`DuplicateThemeId`] - Two records share the same id
/// - [`Empty`] - The catalog has no records, so navigation is undefined
///
/// [`Parse`]: CatalogError::Parse
/// [`InvalidThemeId`]: CatalogError::InvalidThemeId
/// [`MissingField`]: CatalogError::MissingField
/// [`InvalidColor`]: CatalogError::InvalidColor
/// [`DuplicateThemeId`]: CatalogError::DuplicateThemeId
/// [`Empty`]: CatalogError::Empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A theme document could not be deserialized.
    #[error("Failed to parse theme source '{source_name}': {reason}")]
    Parse { source_name: String, reason: String },

    #[error("Invalid theme id '{id}': {reason}")]
    InvalidThemeId { id: String, reason: String },

    #[error("Theme '{theme_id}' is missing required field '{field}'")]
    MissingField { theme_id: String, field: String },

    /// A color triple failed to parse.
    ///
    /// Triples are validated at construction time so that every value handed
    /// to the document layer can be spliced directly into `rgb(...)`.
    #[error("Theme '{theme_id}' has an invalid '{role}' color '{value}': {reason}")]
    InvalidColor {
        theme_id: String,
        role: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate theme id '{id}'")]
    DuplicateThemeId { id: String },

    #[error("Theme catalog is empty")]
    Empty,
}

/// Failures of the durable key/value store behind the persistence adapter.
///
/// These never escape a theme switch. The adapter logs them and carries on,
/// so the visual update is never held hostage by storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store exists but refused the operation (disabled, locked, read-only).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    #[error("Storage I/O error: {0}")]
    Io(String),

    /// The backing file exists but is not a valid key/value document.
    #[error("Storage data is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}

/// Top-level error type for the theme engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// A theme id was requested that the catalog does not contain.
    #[error("Theme '{0}' not found")]
    UnknownTheme(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type alias for engine operations
pub type ThemeResult<T> = Result<T, ThemeError>;
