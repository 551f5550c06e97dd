//! Provider-specific error types
//!
//! ProviderError는 GitHub API 호출에서 발생하는 세부 에러를 관리합니다.
//! gitgutter_foundation::Error와의 변환을 지원합니다.

use gitgutter_foundation::Error as FoundationError;
use thiserror::Error;

/// Errors that can occur while talking to a code host
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Token is missing, invalid or lacks scope
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded (GitHub answers 403 with remaining = 0)
    #[error("Rate limit exceeded{}", .reset_at.map(|ts| format!(", resets at {}", ts)).unwrap_or_default())]
    RateLimited { reset_at: Option<i64> },

    /// Requested path or repository does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server error (5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// Connection failed, DNS, timeout
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Validation failed on the API side (422 and friends)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Content could not be decoded into text
    #[error("Decode failure: {0}")]
    Decode(String),

    /// Anything else
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl ProviderError {
    /// Create from HTTP status code and body
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 => ProviderError::Authentication(message),
            403 if message.to_lowercase().contains("rate limit") => {
                ProviderError::RateLimited { reset_at: None }
            }
            403 => ProviderError::Authentication(message),
            404 => ProviderError::NotFound(message),
            422 => ProviderError::InvalidRequest(message),
            429 => ProviderError::RateLimited { reset_at: None },
            500..=599 => ProviderError::Server(message),
            _ => ProviderError::Api { status, message },
        }
    }

    /// Whether the failure means "nothing there" rather than "could not ask"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

/// GitHub error bodies look like `{"message": "...", "documentation_url": "..."}`
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

// ============================================================================
// gitgutter_foundation::Error 변환
// ============================================================================

impl From<ProviderError> for FoundationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Authentication(msg) => {
                FoundationError::api(401, format!("Authentication failed: {}", msg))
            }
            ProviderError::RateLimited { reset_at } => FoundationError::RateLimited(
                reset_at
                    .map(|ts| format!("Resets at {}", ts))
                    .unwrap_or_else(|| "Rate limited".to_string()),
            ),
            ProviderError::NotFound(msg) => FoundationError::NotFound(msg),
            ProviderError::Server(msg) => FoundationError::api(500, msg),
            ProviderError::Unavailable(msg) => FoundationError::Http(msg),
            ProviderError::InvalidRequest(msg) => FoundationError::InvalidInput(msg),
            ProviderError::InvalidResponse(msg) => {
                FoundationError::Http(format!("Invalid response: {}", msg))
            }
            ProviderError::Decode(msg) => FoundationError::Decode(msg),
            ProviderError::Api { status, message } => FoundationError::api(status, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert!(matches!(
            ProviderError::from_http_status(401, "{\"message\":\"Bad credentials\"}"),
            ProviderError::Authentication(msg) if msg == "Bad credentials"
        ));
        assert!(matches!(
            ProviderError::from_http_status(403, "{\"message\":\"API rate limit exceeded for 1.2.3.4.\"}"),
            ProviderError::RateLimited { reset_at: None }
        ));
        assert!(matches!(
            ProviderError::from_http_status(403, "Resource not accessible"),
            ProviderError::Authentication(_)
        ));
        assert!(ProviderError::from_http_status(404, "{\"message\":\"Not Found\"}").is_not_found());
        assert!(matches!(
            ProviderError::from_http_status(502, "bad gateway"),
            ProviderError::Server(_)
        ));
        assert!(matches!(
            ProviderError::from_http_status(418, "teapot"),
            ProviderError::Api { status: 418, .. }
        ));
    }

    #[test]
    fn test_into_foundation_error() {
        let err: FoundationError = ProviderError::Decode("bad base64".into()).into();
        assert!(matches!(err, FoundationError::Decode(_)));

        let err: FoundationError = ProviderError::RateLimited {
            reset_at: Some(1_700_000_000),
        }
        .into();
        assert!(matches!(err, FoundationError::RateLimited(_)));
        assert_eq!(err.to_string(), "Rate limited: Resets at 1700000000");
    }
}
