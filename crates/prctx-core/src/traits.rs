//! Trait abstractions for client construction.
//!
//! The core never talks HTTP itself: it only builds a client from an auth
//! value and keeps a handle to it. `ClientFactory` is that seam, which lets
//! the session be tested with a mock client.

use secrecy::SecretString;

/// Builds API clients from an optional auth token.
pub trait ClientFactory {
    /// The client type produced.
    type Client;

    /// Error returned when a client cannot be built.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build a new client. `None` means unauthenticated.
    ///
    /// # Errors
    /// Returns error if the client cannot be constructed.
    fn build(&self, auth: Option<&SecretString>) -> Result<Self::Client, Self::Error>;
}
