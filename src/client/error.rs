use reqwest::StatusCode;
use thiserror::Error;

/// Error taxonomy for calls against the Opticini backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No usable access token: either none is stored, or the stored pair was
    /// rejected and could not be refreshed. Callers should direct the user to
    /// log in again.
    #[error("not authenticated; run `opticini login` to obtain a token")]
    Unauthenticated,
    #[error("permission denied: {0}")]
    Forbidden(String),
    /// Any other non-success HTTP status, with the message extracted from the
    /// backend's JSON error body when one is present.
    #[error("backend returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    /// Network-level failure: the backend could not be reached at all.
    #[error("cannot reach backend at {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub(crate) fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source,
        }
    }
}

/// Map a terminal (post-retry) HTTP status to the error taxonomy.
pub(crate) fn from_status(status: StatusCode, body: &str) -> ApiError {
    let message = message_or_reason(status, body);
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthenticated,
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        _ => ApiError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Map a rejected login. A 401 here means the credentials themselves were
/// refused, so the backend's message (e.g. "No active account found with the
/// given credentials") is kept instead of the generic log-in-again advice.
pub(crate) fn from_login_status(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Api {
            status: status.as_u16(),
            message: message_or_reason(status, body),
        },
        _ => from_status(status, body),
    }
}

fn message_or_reason(status: StatusCode, body: &str) -> String {
    extract_message(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        }
    })
}

// DRF-style bodies use "detail"; older endpoints use "error" or "message".
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "error", "message"] {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            return Some(msg.to_string());
        }
    }
    None
}
