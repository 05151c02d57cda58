use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback returned by hex conversion when a triple does not parse.
pub const FALLBACK_HEX: &str = "#000000";

/// Semantic color roles every theme must supply.
///
/// The set is closed: looking up a role that does not exist is a compile-time
/// error rather than an undefined string at runtime. String keys coming from
/// the outside (CSS style maps, command line input) go through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorRole {
    Primary,
    PrimaryLight,
    PrimaryDark,
    Secondary,
    SecondaryLight,
    SecondaryDark,
    Accent,
    AccentLight,
    AccentDark,
    Background,
    Foreground,
    Muted,
    MutedForeground,
    Border,
    Success,
    Warning,
    Error,
    Info,
}

impl ColorRole {
    pub const ALL: [ColorRole; 18] = [
        ColorRole::Primary,
        ColorRole::PrimaryLight,
        ColorRole::PrimaryDark,
        ColorRole::Secondary,
        ColorRole::SecondaryLight,
        ColorRole::SecondaryDark,
        ColorRole::Accent,
        ColorRole::AccentLight,
        ColorRole::AccentDark,
        ColorRole::Background,
        ColorRole::Foreground,
        ColorRole::Muted,
        ColorRole::MutedForeground,
        ColorRole::Border,
        ColorRole::Success,
        ColorRole::Warning,
        ColorRole::Error,
        ColorRole::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::PrimaryLight => "primary-light",
            ColorRole::PrimaryDark => "primary-dark",
            ColorRole::Secondary => "secondary",
            ColorRole::SecondaryLight => "secondary-light",
            ColorRole::SecondaryDark => "secondary-dark",
            ColorRole::Accent => "accent",
            ColorRole::AccentLight => "accent-light",
            ColorRole::AccentDark => "accent-dark",
            ColorRole::Background => "background",
            ColorRole::Foreground => "foreground",
            ColorRole::Muted => "muted",
            ColorRole::MutedForeground => "muted-foreground",
            ColorRole::Border => "border",
            ColorRole::Success => "success",
            ColorRole::Warning => "warning",
            ColorRole::Error => "error",
            ColorRole::Info => "info",
        }
    }

    /// Name of the global custom property holding this role's triple.
    pub fn custom_property(&self) -> String {
        format!("--color-{}", self.as_str())
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorRole::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown color role '{s}'"))
    }
}

/// Closed set of grouping tags for themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    Cyberpunk,
    Nature,
    Cosmic,
    Retro,
    Minimal,
    Luxury,
}

impl ThemeCategory {
    pub const ALL: [ThemeCategory; 6] = [
        ThemeCategory::Cyberpunk,
        ThemeCategory::Nature,
        ThemeCategory::Cosmic,
        ThemeCategory::Retro,
        ThemeCategory::Minimal,
        ThemeCategory::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeCategory::Cyberpunk => "cyberpunk",
            ThemeCategory::Nature => "nature",
            ThemeCategory::Cosmic => "cosmic",
            ThemeCategory::Retro => "retro",
            ThemeCategory::Minimal => "minimal",
            ThemeCategory::Luxury => "luxury",
        }
    }
}

impl fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        ThemeCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| format!("Unknown theme category '{s}'"))
    }
}

/// A color stored as raw `"R, G, B"` components.
///
/// No `rgb()` wrapper is stored so that consumers can splice in an alpha
/// channel (`rgb(var(--color-x) / 0.5)`) without re-parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTriple(String);

impl ColorTriple {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_components(r: u8, g: u8, b: u8) -> Self {
        Self(format!("{r}, {g}, {b}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn components(&self) -> Option<(u8, u8, u8)> {
        parse_triple(&self.0).ok()
    }

    pub fn to_hex(&self) -> String {
        triple_to_hex(&self.0)
    }
}

impl fmt::Display for ColorTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse an `"R, G, B"` string into its three components.
pub fn parse_triple(value: &str) -> Result<(u8, u8, u8), &'static str> {
    let mut parts = value.split(',').map(str::trim);

    let mut next = |name: &'static str| -> Result<u8, &'static str> {
        parts
            .next()
            .filter(|part| !part.is_empty())
            .ok_or(name)?
            .parse::<u8>()
            .map_err(|_| name)
    };

    let r = next("Invalid red component")?;
    let g = next("Invalid green component")?;
    let b = next("Invalid blue component")?;

    if parts.next().is_some() {
        return Err("Too many components");
    }

    Ok((r, g, b))
}

/// Convert an `"R, G, B"` string into `#rrggbb`, or [`FALLBACK_HEX`] if it
/// does not parse.
pub fn triple_to_hex(value: &str) -> String {
    match parse_triple(value) {
        Ok((r, g, b)) => format!("#{r:02x}{g:02x}{b:02x}"),
        Err(_) => FALLBACK_HEX.to_string(),
    }
}

/// The fixed-shape mapping from color role to value.
///
/// Deserialization rejects documents with missing or extra roles, which is
/// what makes an incomplete theme fail catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ThemeColors {
    // === Primary Scale ===
    pub primary: ColorTriple,
    pub primary_light: ColorTriple,
    pub primary_dark: ColorTriple,

    // === Secondary Scale ===
    pub secondary: ColorTriple,
    pub secondary_light: ColorTriple,
    pub secondary_dark: ColorTriple,

    // === Accent Scale ===
    pub accent: ColorTriple,
    pub accent_light: ColorTriple,
    pub accent_dark: ColorTriple,

    // === Base Colors ===
    pub background: ColorTriple,
    pub foreground: ColorTriple,
    pub muted: ColorTriple,
    pub muted_foreground: ColorTriple,
    pub border: ColorTriple,

    // === Semantic Colors ===
    pub success: ColorTriple,
    pub warning: ColorTriple,
    pub error: ColorTriple,
    pub info: ColorTriple,
}

impl ThemeColors {
    /// Build a color set by asking `f` for every role.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(ColorRole) -> ColorTriple,
    {
        Self {
            primary: f(ColorRole::Primary),
            primary_light: f(ColorRole::PrimaryLight),
            primary_dark: f(ColorRole::PrimaryDark),
            secondary: f(ColorRole::Secondary),
            secondary_light: f(ColorRole::SecondaryLight),
            secondary_dark: f(ColorRole::SecondaryDark),
            accent: f(ColorRole::Accent),
            accent_light: f(ColorRole::AccentLight),
            accent_dark: f(ColorRole::AccentDark),
            background: f(ColorRole::Background),
            foreground: f(ColorRole::Foreground),
            muted: f(ColorRole::Muted),
            muted_foreground: f(ColorRole::MutedForeground),
            border: f(ColorRole::Border),
            success: f(ColorRole::Success),
            warning: f(ColorRole::Warning),
            error: f(ColorRole::Error),
            info: f(ColorRole::Info),
        }
    }

    pub fn get(&self, role: ColorRole) -> &ColorTriple {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::PrimaryLight => &self.primary_light,
            ColorRole::PrimaryDark => &self.primary_dark,
            ColorRole::Secondary => &self.secondary,
            ColorRole::SecondaryLight => &self.secondary_light,
            ColorRole::SecondaryDark => &self.secondary_dark,
            ColorRole::Accent => &self.accent,
            ColorRole::AccentLight => &self.accent_light,
            ColorRole::AccentDark => &self.accent_dark,
            ColorRole::Background => &self.background,
            ColorRole::Foreground => &self.foreground,
            ColorRole::Muted => &self.muted,
            ColorRole::MutedForeground => &self.muted_foreground,
            ColorRole::Border => &self.border,
            ColorRole::Success => &self.success,
            ColorRole::Warning => &self.warning,
            ColorRole::Error => &self.error,
            ColorRole::Info => &self.info,
        }
    }

    /// Iterate over all roles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, &ColorTriple)> {
        ColorRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// An immutable theme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeRecord {
    /// Stable key, also used as the persistence token.
    pub id: String,
    pub name: String,
    pub category: ThemeCategory,
    #[serde(default)]
    pub description: String,
    pub colors: ThemeColors,
}

impl ThemeRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ThemeCategory,
        colors: ThemeColors,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            colors,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn color(&self, role: ColorRole) -> &ColorTriple {
        self.colors.get(role)
    }
}

/// Aggregate counts over a catalog, independent of the active theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_themes: usize,
    /// Distinct categories in order of first appearance in the catalog.
    pub categories: Vec<ThemeCategory>,
    pub category_count: usize,
    pub themes_per_category: Vec<(ThemeCategory, usize)>,
}

impl CatalogStats {
    pub fn count_for(&self, category: ThemeCategory) -> usize {
        self.themes_per_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
