pub mod http;

pub use http::HttpItemsApi;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::app::{ReadstashError, Result};
use crate::domain::{CreatedItem, Item, ItemStatus};

/// Wrapper every backend response arrives in: `"success"` carries a payload,
/// `"error"` carries a message. The client unwraps this and raises the error
/// case instead of returning it as data.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> Envelope<T> {
    pub fn into_result(self, http_status: u16) -> Result<T> {
        match self {
            Envelope::Success { data } => Ok(data),
            Envelope::Error { message } => Err(ReadstashError::Remote {
                status: http_status,
                message,
            }),
        }
    }
}

/// Outbound calls to the item store. A trait so the TUI and tests can swap
/// in fakes without a server.
#[async_trait]
pub trait ItemsApi: Send + Sync {
    async fn create_item(&self, url: &str) -> Result<CreatedItem>;
    async fn get_item(&self, id: &str) -> Result<Item>;
    async fn list_items(&self, status: Option<ItemStatus>) -> Result<Vec<Item>>;
    /// Once-per-session user sync; callers log failures rather than surface them.
    async fn sync_user(&self) -> Result<()>;
}

/// Reject anything that isn't a well-formed absolute http(s) URL, before a
/// single byte goes over the wire.
pub fn validate_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ReadstashError::Validation(
            "Please paste an article URL".to_string(),
        ));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|_| ReadstashError::Validation("Please enter a valid URL".to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ReadstashError::Validation(
            "Please enter a valid URL".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_absolute_http_urls() {
        assert!(validate_url("https://example.com/article").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert_eq!(
            validate_url("  https://example.com  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_validate_rejects_malformed_strings() {
        for bad in ["", "   ", "not a url", "example.com/article", "ftp://example.com"] {
            assert!(
                matches!(validate_url(bad), Err(ReadstashError::Validation(_))),
                "expected validation error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_envelope_unwraps_success() {
        let env: Envelope<CreatedItem> = serde_json::from_str(
            r#"{"status":"success","data":{"id":"x1","status":"created"}}"#,
        )
        .unwrap();
        let created = env.into_result(200).unwrap();
        assert_eq!(created.id, "x1");
        assert_eq!(created.status, ItemStatus::Created);
    }

    #[test]
    fn test_envelope_raises_error_case() {
        let env: Envelope<CreatedItem> =
            serde_json::from_str(r#"{"status":"error","message":"nope"}"#).unwrap();
        match env.into_result(200) {
            Err(ReadstashError::Remote { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "nope");
            }
            other => panic!("expected Remote error, got {:?}", other),
        }
    }
}
