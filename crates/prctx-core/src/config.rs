//! CI configuration read from the environment.

use std::fmt;

use secrecy::SecretString;
use serde_json::{Map, Value};

use crate::env::{non_empty, parse_int};
use crate::error::{Error, Result};

/// Default auth token.
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// `owner/repo` slug of the repository being built.
pub const TRAVIS_REPO_SLUG: &str = "TRAVIS_REPO_SLUG";
/// Pull request number, or `false` on push builds.
pub const TRAVIS_PULL_REQUEST: &str = "TRAVIS_PULL_REQUEST";
/// Base URL of the GitHub API (GitHub Enterprise, test servers).
pub const GITHUB_API_URL: &str = "GITHUB_API_URL";

/// Repository identity parsed from an `owner/repo` slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl Slug {
    /// Split a slug on its first `/`.
    ///
    /// Returns `None` when either half is empty or the name contains
    /// another `/`, so owner and repo are always present together.
    #[must_use]
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, repo) = slug.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The triple needed for pull-request scoped API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestContext<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub number: i64,
}

/// Configuration read once at startup from CI environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Token from `GITHUB_TOKEN`, if set and non-empty.
    pub token: Option<SecretString>,

    /// Repository from `TRAVIS_REPO_SLUG`.
    pub slug: Option<Slug>,

    /// Pull request number from `TRAVIS_PULL_REQUEST`.
    pub pull_request: Option<i64>,

    /// API base URL from `GITHUB_API_URL`.
    pub api_url: Option<String>,
}

impl EnvConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInteger`] if `TRAVIS_PULL_REQUEST` is not an integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInteger`] if `TRAVIS_PULL_REQUEST` is not an integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pull_request = parse_int(
            TRAVIS_PULL_REQUEST,
            lookup(TRAVIS_PULL_REQUEST).as_deref(),
            None,
        )?;

        Ok(Self {
            token: non_empty(lookup(GITHUB_TOKEN)).map(SecretString::from),
            slug: lookup(TRAVIS_REPO_SLUG).as_deref().and_then(Slug::parse),
            pull_request,
            api_url: non_empty(lookup(GITHUB_API_URL)),
        })
    }

    /// Repository owner, if known.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.slug.as_ref().map(|slug| slug.owner.as_str())
    }

    /// Repository name, if known.
    #[must_use]
    pub fn repo(&self) -> Option<&str> {
        self.slug.as_ref().map(|slug| slug.repo.as_str())
    }

    /// Require a complete pull-request context.
    ///
    /// # Errors
    /// Returns [`Error::NotInPullRequest`] if owner, repo or PR number is missing.
    pub fn context(&self) -> Result<PullRequestContext<'_>> {
        match (&self.slug, self.pull_request) {
            (Some(slug), Some(number)) => Ok(PullRequestContext {
                owner: &slug.owner,
                repo: &slug.repo,
                number,
            }),
            _ => Err(Error::NotInPullRequest),
        }
    }

    /// Build the parameters for a pull-request scoped API call.
    ///
    /// The map holds `owner`, `repo` and `issue_number`, followed by every
    /// entry of `extra`; on a key conflict `extra` wins.
    ///
    /// # Errors
    /// Returns [`Error::NotInPullRequest`] if the context is incomplete.
    pub fn options(&self, extra: Option<&Map<String, Value>>) -> Result<Map<String, Value>> {
        let context = self.context()?;

        let mut options = Map::new();
        options.insert("owner".into(), Value::from(context.owner));
        options.insert("repo".into(), Value::from(context.repo));
        options.insert("issue_number".into(), Value::from(context.number));

        if let Some(extra) = extra {
            options.extend(extra.iter().map(|(key, value)| (key.clone(), value.clone())));
        }

        Ok(options)
    }
}
