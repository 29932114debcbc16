use reqwest::StatusCode;
use thiserror::Error;

/// Longest response body quoted in an error message, in bytes.
const BODY_EXCERPT_BYTES: usize = 500;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Roster server refused access: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - check the roster server token")]
    Unauthorized,

    #[error("Roster endpoint not found: {0}")]
    NotFound(String),

    #[error("Roster server is rate limiting requests")]
    RateLimited,

    #[error("Roster server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid roster server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(excerpt(body)),
            404 => ApiError::NotFound(excerpt(body)),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(excerpt(body)),
            _ => ApiError::InvalidResponse(format!("{}: {}", status, excerpt(body))),
        }
    }
}

/// At most [`BODY_EXCERPT_BYTES`] of `body`, cut on a char boundary.
fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.len() <= BODY_EXCERPT_BYTES {
        return body.to_string();
    }
    let end = (0..=BODY_EXCERPT_BYTES)
        .rev()
        .find(|&i| body.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... ({} bytes)", &body[..end], body.len())
}
