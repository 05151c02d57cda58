use crate::catalog::types::{ColorRole, ColorTriple, ThemeRecord, parse_triple};
use crate::errors::CatalogError;
use crate::validation::Validator;

/// Maximum length of a theme id (it doubles as a storage value).
pub const MAX_THEME_ID_LEN: usize = 50;

/// Validator for theme ids.
///
/// Ids are persistence tokens and attribute values, so they are restricted to
/// lowercase ASCII alphanumerics and hyphens.
pub struct ThemeIdValidator;

impl Validator<str> for ThemeIdValidator {
    type Error = CatalogError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| CatalogError::InvalidThemeId {
            id: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("Id cannot be empty"));
        }

        if input.len() > MAX_THEME_ID_LEN {
            return Err(invalid("Id too long (max 50 characters)"));
        }

        if !input
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid(
                "Id contains invalid characters (only lowercase letters, digits and hyphens allowed)",
            ));
        }

        if input.starts_with('-') || input.ends_with('-') {
            return Err(invalid("Id cannot start or end with a hyphen"));
        }

        Ok(())
    }
}

/// Validator for a single color value, bound to the theme and role it belongs
/// to so errors point at the offending entry.
pub struct ColorTripleValidator<'a> {
    pub theme_id: &'a str,
    pub role: ColorRole,
}

impl Validator<ColorTriple> for ColorTripleValidator<'_> {
    type Error = CatalogError;

    fn validate(&self, input: &ColorTriple) -> Result<(), Self::Error> {
        parse_triple(input.as_str())
            .map(|_| ())
            .map_err(|reason| CatalogError::InvalidColor {
                theme_id: self.theme_id.to_string(),
                role: self.role.to_string(),
                value: input.as_str().to_string(),
                reason: reason.to_string(),
            })
    }
}

/// Validator for complete theme records
pub struct ThemeRecordValidator;

impl Validator<ThemeRecord> for ThemeRecordValidator {
    type Error = CatalogError;

    fn validate(&self, input: &ThemeRecord) -> Result<(), Self::Error> {
        ThemeIdValidator.validate(&input.id)?;

        // Display names can contain spaces, so only presence is checked
        if input.name.trim().is_empty() {
            return Err(CatalogError::MissingField {
                theme_id: input.id.clone(),
                field: "name".to_string(),
            });
        }

        for (role, triple) in input.colors.iter() {
            ColorTripleValidator {
                theme_id: &input.id,
                role,
            }
            .validate(triple)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{ThemeCategory, ThemeColors};

    fn record(id: &str) -> ThemeRecord {
        ThemeRecord::new(
            id,
            "Test Theme",
            ThemeCategory::Minimal,
            ThemeColors::from_fn(|_| ColorTriple::from_components(10, 20, 30)),
        )
    }

    #[test]
    fn test_theme_id_validator() {
        let validator = ThemeIdValidator;

        // Valid ids
        assert!(validator.validate("neon-tokyo").is_ok());
        assert!(validator.validate("theme2").is_ok());

        // Invalid ids
        assert!(validator.validate("").is_err());
        assert!(validator.validate("-leading").is_err());
        assert!(validator.validate("trailing-").is_err());
        assert!(validator.validate("Upper-Case").is_err());
        assert!(validator.validate("under_score").is_err());
        assert!(validator.validate(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_record_validator_accepts_complete_record() {
        assert!(ThemeRecordValidator.validate(&record("valid")).is_ok());
    }

    #[test]
    fn test_record_validator_rejects_blank_name() {
        let mut theme = record("blank-name");
        theme.name = "   ".to_string();

        assert_eq!(
            ThemeRecordValidator.validate(&theme),
            Err(CatalogError::MissingField {
                theme_id: "blank-name".to_string(),
                field: "name".to_string(),
            })
        );
    }

    #[test]
    fn test_record_validator_reports_bad_triple() {
        let mut theme = record("bad-color");
        theme.colors.border = ColorTriple::new("12, 300, 4");

        match ThemeRecordValidator.validate(&theme) {
            Err(CatalogError::InvalidColor { role, value, .. }) => {
                assert_eq!(role, "border");
                assert_eq!(value, "12, 300, 4");
            }
            other => panic!("Expected InvalidColor, got {other:?}"),
        }
    }
}
