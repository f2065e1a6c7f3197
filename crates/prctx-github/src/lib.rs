//! # prctx-github
//!
//! GitHub API client for prctx: route-based requests fed by the
//! pull-request option map, plus typed helpers for PR comments.
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which automatically
//! zeroizes memory when dropped, reducing credential exposure in memory dumps.

mod auth;
mod client;
mod error;
mod route;
mod types;

pub use auth::Auth;
pub use client::{GitHubClient, GitHubFactory};
pub use error::{Error, Result};
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
pub use types::{CreateComment, IssueComment, PullRequest, PullRequestState, UpdateComment};

/// Session whose cached client is a [`GitHubClient`].
pub type GitHubSession = prctx_core::Session<GitHubFactory>;
