//! Backend API Wrappers
//!
//! Frontend bindings to the gallery HTTP API, organized by domain.

mod auth;
mod items;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Backend origin, overridable at build time
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

pub fn api_base() -> &'static str {
    option_env!("GALLERY_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

fn endpoint(path: &str) -> String {
    format!("{}{}", api_base().trim_end_matches('/'), path)
}

/// Why a backend call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request never got a response
    Network(String),
    Timeout,
    /// Non-success status with the server's message
    Status(u16, String),
    /// Response body was not what we expected
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Timeout => write!(f, "Request timed out"),
            FetchError::Status(code, msg) if msg.is_empty() => write!(f, "Server returned {}", code),
            FetchError::Status(code, msg) => write!(f, "{} ({})", msg, code),
            FetchError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Decode a JSON body, turning non-2xx responses into `FetchError::Status`
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();
        return Err(FetchError::Status(status.as_u16(), message));
    }
    response.json::<T>().await.map_err(|e| FetchError::Decode(e.to_string()))
}

// Re-export all public items
pub use auth::*;
pub use items::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_shows_server_message() {
        let err = FetchError::Status(503, "Store unavailable".to_string());
        assert_eq!(err.to_string(), "Store unavailable (503)");
        assert_eq!(FetchError::Status(502, String::new()).to_string(), "Server returned 502");
    }

    #[test]
    fn test_endpoint_joins_path() {
        assert!(endpoint("/api/items").ends_with("/api/items"));
        assert!(!endpoint("/api/items").contains("//api"));
    }
}
