use crate::catalog::types::ThemeRecord;
use crate::errors::CatalogError;

/// A named theme document, usually embedded in the binary.
#[derive(Debug, Clone, Copy)]
pub struct ThemeSource {
    pub name: &'static str,
    pub content: &'static str,
}

/// Built-in theme documents in catalog order.
///
/// Order is significant: next/previous navigation walks this list.
pub const BUILTIN_THEMES: &[ThemeSource] = &[
    ThemeSource {
        name: "neon-tokyo.toml",
        content: include_str!("../../themes/neon-tokyo.toml"),
    },
    ThemeSource {
        name: "blade-runner.toml",
        content: include_str!("../../themes/blade-runner.toml"),
    },
    ThemeSource {
        name: "forest-spirits.toml",
        content: include_str!("../../themes/forest-spirits.toml"),
    },
    ThemeSource {
        name: "starlight-cosmos.toml",
        content: include_str!("../../themes/starlight-cosmos.toml"),
    },
    ThemeSource {
        name: "vintage-paper.toml",
        content: include_str!("../../themes/vintage-paper.toml"),
    },
    ThemeSource {
        name: "pure-minimal.toml",
        content: include_str!("../../themes/pure-minimal.toml"),
    },
    ThemeSource {
        name: "golden-luxury.toml",
        content: include_str!("../../themes/golden-luxury.toml"),
    },
];

/// Parse a single theme document.
///
/// Shape errors (missing role, unknown role, unknown category) surface here as
/// [`CatalogError::Parse`]; semantic checks happen in the catalog validators.
pub fn parse_theme(source_name: &str, content: &str) -> Result<ThemeRecord, CatalogError> {
    toml::from_str::<ThemeRecord>(content).map_err(|e| CatalogError::Parse {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a list of documents, preserving order.
pub fn parse_themes<'a, I>(sources: I) -> Result<Vec<ThemeRecord>, CatalogError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    sources
        .into_iter()
        .map(|(name, content)| parse_theme(name, content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{ColorRole, ThemeCategory};

    #[test]
    fn test_builtin_sources_parse() {
        let records = parse_themes(BUILTIN_THEMES.iter().map(|s| (s.name, s.content)))
            .expect("built-in themes should parse");

        assert_eq!(records.len(), 7);
        assert_eq!(records[0].id, "neon-tokyo");
        assert_eq!(records[5].id, "pure-minimal");
        assert_eq!(records[5].category, ThemeCategory::Minimal);
        assert_eq!(
            records[0].color(ColorRole::Primary).as_str(),
            "14, 165, 233"
        );
    }

    #[test]
    fn test_missing_role_fails_to_parse() {
        let doc = r#"
            id = "broken"
            name = "Broken"
            category = "retro"

            [colors]
            primary = "1, 2, 3"
        "#;

        match parse_theme("broken.toml", doc) {
            Err(CatalogError::Parse {
                source_name,
                reason,
            }) => {
                assert_eq!(source_name, "broken.toml");
                assert!(reason.contains("missing field"), "unexpected reason: {reason}");
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_fails_to_parse() {
        let doc = BUILTIN_THEMES[0]
            .content
            .replace("category = \"cyberpunk\"", "category = \"vaporwave\"");
        assert!(parse_theme("vaporwave.toml", &doc).is_err());
    }

    #[test]
    fn test_unknown_role_fails_to_parse() {
        let doc = format!("{}glow = \"1, 2, 3\"\n", BUILTIN_THEMES[0].content);
        assert!(parse_theme("glow.toml", &doc).is_err());
    }
}
