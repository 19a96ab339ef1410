//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{LinkRecord, NewLink};
use crate::error::{ErrorInfo, ValidationError};
use crate::utils::validators::parse_validity;

/// Request to shorten one to five URLs.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 5, message = "Provide between 1 and 5 URLs"))]
    pub urls: Vec<UrlItem>,
}

/// Individual URL to be shortened.
///
/// Content checks (URL shape, validity, custom code) happen in the registry so
/// that each item fails on its own without rejecting the batch.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlItem {
    pub url: String,

    /// Minutes until expiry; a number or a numeric string.
    #[serde(default)]
    pub validity_minutes: Option<ValidityField>,

    /// Optional custom short code. Blank means none.
    #[serde(default)]
    pub custom_code: Option<String>,
}

/// Validity as submitted by a client form: `30`, `"30"` or `""`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidityField {
    Minutes(i64),
    Fractional(f64),
    Text(String),
}

impl ValidityField {
    /// Converts the raw field into whole minutes. A blank string is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValidity`] for fractional numbers and
    /// text that is not a positive integer.
    pub fn minutes(&self) -> Result<Option<i64>, ValidationError> {
        match self {
            ValidityField::Minutes(m) => Ok(Some(*m)),
            ValidityField::Fractional(f) => Err(ValidationError::InvalidValidity(f.to_string())),
            ValidityField::Text(s) if s.trim().is_empty() => Ok(None),
            ValidityField::Text(s) => parse_validity(s).map(Some),
        }
    }
}

impl UrlItem {
    /// Builds the registry input for this item.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValidity`] if the validity field cannot
    /// be read as whole minutes.
    pub fn to_new_link(&self) -> Result<NewLink, ValidationError> {
        let validity = match &self.validity_minutes {
            Some(field) => field.minutes()?,
            None => None,
        };

        Ok(NewLink {
            original_url: self.url.clone(),
            validity_minutes: validity,
            custom_short_code: self.custom_code.clone(),
        })
    }
}

/// Response containing batch processing results.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub summary: BatchSummary,
    pub items: Vec<ShortenResultItem>,
}

/// Individual result for a URL in the batch.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortenResultItem {
    Success(LinkCreated),
    Error(LinkFailed),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCreated {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl LinkCreated {
    pub fn new(record: LinkRecord, short_url: String) -> Self {
        Self {
            original_url: record.original_url,
            short_code: record.short_code,
            short_url,
            validity_minutes: record.validity_minutes,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFailed {
    pub original_url: String,
    pub error: ErrorInfo,
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
