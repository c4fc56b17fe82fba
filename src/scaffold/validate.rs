use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScaffoldError;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("name pattern is valid"));
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Lowercase letters, digits and hyphens only; at most 64 characters.
pub fn validate_name(name: &str) -> Result<(), ScaffoldError> {
    if name.is_empty() {
        return Err(ScaffoldError::InvalidName("name must not be empty".into()));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ScaffoldError::InvalidName(format!(
            "name is too long ({len} characters, max {MAX_NAME_LEN})"
        )));
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(ScaffoldError::InvalidName(format!(
            "name may only contain lowercase letters, digits and hyphens (pattern {})",
            NAME_PATTERN.as_str()
        )));
    }
    Ok(())
}

/// Non-empty, at most 1024 characters, no tag-like `<...>` substrings.
pub fn validate_description(description: &str) -> Result<(), ScaffoldError> {
    if description.is_empty() {
        return Err(ScaffoldError::InvalidDescription(
            "description must not be empty".into(),
        ));
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ScaffoldError::InvalidDescription(format!(
            "description is too long ({len} characters, max {MAX_DESCRIPTION_LEN})"
        )));
    }
    if TAG_PATTERN.is_match(description) {
        return Err(ScaffoldError::InvalidDescription(
            "description must not contain tags such as <tag>".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        for name in ["excel-handler", "api2", "a", "x-1-y"] {
            assert!(validate_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_uppercase_and_underscores() {
        assert!(matches!(
            validate_name("My_Skill"),
            Err(ScaffoldError::InvalidName(_))
        ));
        assert!(validate_name("Excel").is_err());
        assert!(validate_name("excel_handler").is_err());
        assert!(validate_name("excel handler").is_err());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(validate_name("").is_err());
    }

    #[test]
    fn name_length_limit() {
        assert!(validate_name(&"a".repeat(64)).is_ok());
        let err = validate_name(&"a".repeat(65)).unwrap_err();
        assert!(err.to_string().contains("65"));
    }

    #[test]
    fn accepts_plain_description() {
        assert!(validate_description("Handle Excel files").is_ok());
        assert!(validate_description("compare a < b and c > d").is_ok());
    }

    #[test]
    fn rejects_empty_description() {
        assert!(matches!(
            validate_description(""),
            Err(ScaffoldError::InvalidDescription(_))
        ));
    }

    #[test]
    fn description_length_counts_characters() {
        assert!(validate_description(&"é".repeat(1024)).is_ok());
        assert!(validate_description(&"x".repeat(1025)).is_err());
    }

    #[test]
    fn rejects_tags_in_description() {
        assert!(validate_description("Use <b>bold</b> text").is_err());
        assert!(validate_description("<script>").is_err());
    }
}
