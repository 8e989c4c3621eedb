use crate::error::{CoreError, Result};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// A persisted URL mapping.
///
/// Records are immutable once created: the store assigns `id` on insert
/// and nothing updates a row afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Surrogate key, unique and strictly increasing across all records.
    pub id: u64,
    /// The original URL that was shortened.
    pub full_url: String,
    /// The base-62 alias, derived deterministically from `id`.
    pub short_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
}

/// Insert payload for a URL mapping, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUrlRecord {
    pub full_url: String,
    pub short_url: String,
    pub created_at: Timestamp,
}

impl NewUrlRecord {
    /// Builds an insert payload after checking both fields against the
    /// given limits.
    pub fn validated(
        full_url: impl Into<String>,
        short_url: impl Into<String>,
        created_at: Timestamp,
        limits: &Limits,
    ) -> Result<Self> {
        let full_url = full_url.into();
        let short_url = short_url.into();
        limits.check_full_url(&full_url)?;
        limits.check_short_code(&short_url)?;
        Ok(Self {
            full_url,
            short_url,
            created_at,
        })
    }
}

/// Runtime-checked validation rules for URL records.
///
/// The defaults accept full URLs of 1 to 2048 bytes and short codes of
/// up to 4 characters, which bounds the representable id space to
/// 62^4 - 1 before codes would have to grow longer.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Limits {
    #[builder(default = 1)]
    pub min_full_url_len: usize,
    #[builder(default = 2048)]
    pub max_full_url_len: usize,
    #[builder(default = 4)]
    pub max_short_code_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Limits {
    /// Rejects blank or out-of-bounds full URLs.
    ///
    /// A URL consisting only of whitespace counts as blank.
    pub fn check_full_url(&self, full_url: &str) -> Result<()> {
        if full_url.trim().is_empty() {
            return Err(CoreError::InvalidFullUrl(
                "full url must not be blank".to_string(),
            ));
        }
        let len = full_url.len();
        if len < self.min_full_url_len || len > self.max_full_url_len {
            return Err(CoreError::InvalidFullUrl(format!(
                "length must be between {} and {}, got {}",
                self.min_full_url_len, self.max_full_url_len, len
            )));
        }
        Ok(())
    }

    /// Rejects blank or over-long short codes.
    pub fn check_short_code(&self, short_url: &str) -> Result<()> {
        if short_url.is_empty() {
            return Err(CoreError::InvalidShortCode(
                "short code must not be empty".to_string(),
            ));
        }
        if short_url.len() > self.max_short_code_len {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be at most {}, got {}",
                self.max_short_code_len,
                short_url.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_full_url_is_rejected() {
        let limits = Limits::default();
        assert!(limits.check_full_url("").is_err());
        assert!(limits.check_full_url("   ").is_err());
        assert!(limits.check_full_url("\t\n").is_err());
    }

    #[test]
    fn full_url_length_bounds() {
        let limits = Limits::builder()
            .min_full_url_len(5)
            .max_full_url_len(16)
            .build();

        assert!(limits.check_full_url("http").is_err());
        assert!(limits.check_full_url("http://a.io").is_ok());
        assert!(limits.check_full_url("http://a-very-long-host.example").is_err());
    }

    #[test]
    fn short_code_length_bound() {
        let limits = Limits::default();
        assert!(limits.check_short_code("b").is_ok());
        assert!(limits.check_short_code("abcd").is_ok());
        assert!(limits.check_short_code("abcde").is_err());
        assert!(limits.check_short_code("").is_err());
    }

    #[test]
    fn validated_payload_carries_fields_through() {
        let now = Timestamp::now();
        let new = NewUrlRecord::validated("https://example.com", "b", now, &Limits::default())
            .unwrap();

        assert_eq!(new.full_url, "https://example.com");
        assert_eq!(new.short_url, "b");
        assert_eq!(new.created_at, now);
    }
}
