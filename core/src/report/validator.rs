//! Structural validation of a report draft.
//!
//! Rules are checked in a fixed order and the first violation wins:
//! title length, description length, empty title, empty description,
//! proof-of-concept URL, severity scale. Lengths are counted in characters.

use thiserror::Error;
use url::Url;

use super::{Severity, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Error: Title exceeds maximum length of 100 characters")]
    TitleTooLong,

    #[error("Error: Description exceeds maximum length of 5000 characters")]
    DescriptionTooLong,

    #[error("Error: Title cannot be empty")]
    EmptyTitle,

    #[error("Error: Description cannot be empty")]
    EmptyDescription,

    #[error("Error: Provided URL is invalid")]
    InvalidUrl,

    #[error("Error: Invalid severity. Must be one of P1, P2, P3, P4, P5")]
    InvalidSeverity,
}

pub fn validate(
    title: &str,
    description: &str,
    severity: &str,
    poc_url: Option<&str>,
) -> Result<(), ValidationError> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }

    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    if let Some(url) = poc_url.filter(|u| !u.is_empty()) {
        if !is_absolute_url(url) {
            return Err(ValidationError::InvalidUrl);
        }
    }

    severity.parse::<Severity>()?;
    Ok(())
}

/// True when `raw` parses with both a scheme and an authority.
pub fn is_absolute_url(raw: &str) -> bool {
    Url::parse(raw).map(|u| u.has_host()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = "SQL Injection in Login Form";
    const DESCRIPTION: &str = "Found a SQL injection...";

    #[test]
    fn accepts_well_formed_report() {
        assert_eq!(validate(TITLE, DESCRIPTION, "P2", None), Ok(()));
        assert_eq!(validate(TITLE, DESCRIPTION, "P2", Some("")), Ok(()));
        assert_eq!(
            validate(TITLE, DESCRIPTION, "P1", Some("https://target.example/login?id=1")),
            Ok(())
        );
    }

    #[test]
    fn accepts_boundary_lengths() {
        let title = "t".repeat(100);
        let description = "d".repeat(5000);
        assert_eq!(validate(&title, &description, "P4", None), Ok(()));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let title = "é".repeat(100);
        assert_eq!(validate(&title, DESCRIPTION, "P3", None), Ok(()));
    }

    #[test]
    fn long_title_wins_over_everything_else() {
        let title = "t".repeat(101);
        let description = "d".repeat(6000);
        assert_eq!(
            validate(&title, &description, "nonsense", Some("not a url")),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(
            validate(&title, "", "P1", None),
            Err(ValidationError::TitleTooLong)
        );
    }

    #[test]
    fn long_description_is_reported_before_emptiness() {
        let description = "d".repeat(5001);
        assert_eq!(
            validate(TITLE, &description, "P1", Some("not a url")),
            Err(ValidationError::DescriptionTooLong)
        );
        assert_eq!(
            validate("", &description, "P1", None),
            Err(ValidationError::DescriptionTooLong)
        );
    }

    #[test]
    fn empty_fields() {
        assert_eq!(
            validate("", DESCRIPTION, "P2", None),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            validate("", "", "P2", None),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            validate(TITLE, "", "P2", None),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn rejects_malformed_urls() {
        for bad in ["not a url", "example.com/path", "/relative/path", "mailto:a@b.example"] {
            assert_eq!(
                validate(TITLE, DESCRIPTION, "P2", Some(bad)),
                Err(ValidationError::InvalidUrl),
                "{bad}"
            );
        }
    }

    #[test]
    fn url_error_comes_before_severity_error() {
        assert_eq!(
            validate(TITLE, DESCRIPTION, "P9", Some("not a url")),
            Err(ValidationError::InvalidUrl)
        );
    }

    #[test]
    fn rejects_severity_off_the_scale() {
        assert_eq!(
            validate(TITLE, DESCRIPTION, "critical", None),
            Err(ValidationError::InvalidSeverity)
        );
        assert_eq!(
            validate(TITLE, DESCRIPTION, "", None),
            Err(ValidationError::InvalidSeverity)
        );
        assert_eq!(validate(TITLE, DESCRIPTION, "p3", None), Ok(()));
    }

    #[test]
    fn messages() {
        assert_eq!(
            ValidationError::TitleTooLong.to_string(),
            "Error: Title exceeds maximum length of 100 characters"
        );
        assert_eq!(
            ValidationError::InvalidUrl.to_string(),
            "Error: Provided URL is invalid"
        );
    }
}
