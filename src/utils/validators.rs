//! Input validation for link creation.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::error::ValidationError;

/// Custom short codes: 3 to 10 ASCII letters or digits.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{3,10}$").expect("valid custom code pattern"));

/// Codes that collide with fixed routes and can never be used as short links.
pub const RESERVED_CODES: &[&str] = &["api", "health"];

/// Returns true if `code` shadows a fixed route (case-insensitive).
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Validates that `input` is an absolute http or https URL.
///
/// The URL is returned trimmed but otherwise as given, so redirects go to exactly
/// what the user submitted.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUrl`] for relative URLs, unparseable input,
/// hostless URLs and non-HTTP schemes such as `javascript:` or `data:`.
pub fn validate_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidUrl(trimmed.to_string());

    let url = Url::parse(trimmed).map_err(|_| invalid())?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(invalid()),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    Ok(trimmed.to_string())
}

/// Validates a numeric validity period.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidValidity`] for zero, negative, or values
/// that do not fit in `u32`.
pub fn validate_validity(minutes: i64) -> Result<u32, ValidationError> {
    if minutes <= 0 {
        return Err(ValidationError::InvalidValidity(minutes.to_string()));
    }
    u32::try_from(minutes).map_err(|_| ValidationError::InvalidValidity(minutes.to_string()))
}

/// Parses a textual validity period such as a form or CLI value.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidValidity`] if the text is not a whole number
/// or is not positive.
pub fn parse_validity(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidValidity(trimmed.to_string()))?;
    validate_validity(minutes)?;
    Ok(minutes)
}

/// Validates a user-provided custom short code.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidShortCode`] unless the code is 3-10 ASCII
/// alphanumeric characters and not one of [`RESERVED_CODES`].
pub fn validate_custom_code(code: &str) -> Result<(), ValidationError> {
    if CUSTOM_CODE_REGEX.is_match(code) && !is_reserved_code(code) {
        Ok(())
    } else {
        Err(ValidationError::InvalidShortCode(code.to_string()))
    }
}
