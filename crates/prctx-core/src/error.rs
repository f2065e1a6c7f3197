//! Error types for prctx-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving the CI context.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Owner, repository or pull-request number is missing from the environment.
    #[error("not running in a travis pull request")]
    NotInPullRequest,

    /// An integer-valued environment variable holds something else.
    #[error("expected integer for {variable}")]
    InvalidInteger {
        /// Name of the offending variable.
        variable: String,
    },

    /// The client factory failed to build a client.
    #[error("failed to build client: {0}")]
    ClientBuild(#[source] Box<dyn std::error::Error + Send + Sync>),
}
