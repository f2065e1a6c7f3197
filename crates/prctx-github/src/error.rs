//! Error types for prctx-github.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed or token invalid.
    #[error("GitHub authentication failed - check GITHUB_TOKEN")]
    AuthenticationFailed,

    /// API rate limit exceeded.
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// API error with status code.
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A route placeholder has no matching parameter.
    #[error("missing parameter for route: {0}")]
    MissingParameter(String),

    /// Route string is not `METHOD /path`.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Token cannot be sent as a header value.
    #[error("invalid authorization header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),
}
