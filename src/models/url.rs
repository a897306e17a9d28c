use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::validate_url;

/// Submitted long URL, as a form field or a JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUrlDto {
    // A missing field is treated like an empty submission
    #[serde(default)]
    #[validate(custom(function = "validate_url"))]
    pub url: String,
}

impl CreateUrlDto {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Drops surrounding whitespace; the stored URL is the trimmed text.
    pub fn trimmed(self) -> Self {
        let url = self.url.trim();
        if url.len() == self.url.len() {
            self
        } else {
            Self::new(url)
        }
    }
}

/// A stored URL and the alias derived from its id
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Store-assigned, strictly increasing
    pub id: i64,

    /// The original target, exactly as submitted (after trimming)
    pub url: String,

    /// `None` between the insert and the alias update
    pub alias: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// JSON view of a record once its alias is set
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponseDto {
    pub id: i64,
    pub url: String,
    pub alias: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlResponseDto {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        let alias = record.alias.unwrap_or_default();
        UrlResponseDto {
            id: record.id,
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), alias),
            alias,
            url: record.url,
            created_at: record.created_at,
        }
    }
}

/// `GET /?alias=...`
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let dto = CreateUrlDto::new("  https://example.org/page \n").trimmed();
        assert_eq!(dto.url, "https://example.org/page");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_blank_and_relative_input() {
        assert!(CreateUrlDto::new("   ").trimmed().validate().is_err());
        assert!(CreateUrlDto::new("not a url").trimmed().validate().is_err());
    }

    #[test]
    fn response_builds_short_url() {
        let record = UrlRecord {
            id: 62,
            url: "https://example.com".into(),
            alias: Some("10".into()),
            created_at: Utc::now(),
        };
        let dto = UrlResponseDto::from_record(record, "http://sho.rt/");
        assert_eq!(dto.short_url, "http://sho.rt/10");
        assert_eq!(dto.alias, "10");
    }
}
