//! Auth override and cached client.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{Map, Value};

use crate::config::{EnvConfig, PullRequestContext};
use crate::error::{Error, Result};
use crate::traits::ClientFactory;

/// Auth selection for [`Session::client`].
#[derive(Debug, Clone, Default)]
pub enum AuthOverride {
    /// Use the session's auth and its cached client.
    #[default]
    Inherit,

    /// Build a one-off client with this auth, bypassing the cache.
    /// `Explicit(None)` builds an unauthenticated client.
    Explicit(Option<SecretString>),
}

impl From<Option<SecretString>> for AuthOverride {
    fn from(auth: Option<SecretString>) -> Self {
        Self::Explicit(auth)
    }
}

/// Pull-request context plus a lazily built, cached client.
///
/// Holds at most one cached client. It is rebuilt on the next
/// [`client`](Self::client) call after [`set_auth`](Self::set_auth).
pub struct Session<F: ClientFactory> {
    config: EnvConfig,
    factory: F,
    auth: Option<SecretString>,
    auth_changed: bool,
    client: Option<Arc<F::Client>>,
}

impl<F: ClientFactory> Session<F> {
    /// Create a session. The initial auth is the configured token.
    pub fn new(config: EnvConfig, factory: F) -> Self {
        let auth = config.token.clone();
        Self {
            config,
            factory,
            auth,
            auth_changed: false,
            client: None,
        }
    }

    /// The configuration this session was created from.
    #[must_use]
    pub const fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The current auth.
    #[must_use]
    pub const fn auth(&self) -> Option<&SecretString> {
        self.auth.as_ref()
    }

    /// Require a complete pull-request context.
    ///
    /// # Errors
    /// Returns [`Error::NotInPullRequest`] if owner, repo or PR number is missing.
    pub fn context(&self) -> Result<PullRequestContext<'_>> {
        self.config.context()
    }

    /// Replace the auth used for the cached client. `None` clears it.
    pub fn set_auth(&mut self, auth: Option<SecretString>) {
        self.auth = auth;
        self.auth_changed = true;
    }

    /// Get a client.
    ///
    /// With [`AuthOverride::Explicit`] a fresh client is built and the cache
    /// is left untouched. Otherwise the cached client is returned, building it
    /// first if none exists or the auth changed since it was built.
    ///
    /// # Errors
    /// Returns [`Error::NotInPullRequest`] for [`AuthOverride::Inherit`]
    /// outside a pull-request build, or [`Error::ClientBuild`] if the factory fails.
    pub fn client(&mut self, auth: AuthOverride) -> Result<Arc<F::Client>> {
        if let AuthOverride::Explicit(auth) = auth {
            return self.build(auth.as_ref()).map(Arc::new);
        }

        self.context()?;

        if let Some(client) = self.client.as_ref().filter(|_| !self.auth_changed) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(self.build(self.auth.as_ref())?);
        self.client = Some(Arc::clone(&client));
        self.auth_changed = false;
        Ok(client)
    }

    /// Build the parameters for a pull-request scoped API call.
    ///
    /// # Errors
    /// Returns [`Error::NotInPullRequest`] if the context is incomplete.
    pub fn options(&self, extra: Option<&Map<String, Value>>) -> Result<Map<String, Value>> {
        self.config.options(extra)
    }

    fn build(&self, auth: Option<&SecretString>) -> Result<F::Client> {
        self.factory
            .build(auth)
            .map_err(|e| Error::ClientBuild(Box::new(e)))
    }
}
