//! # prctx-core
//!
//! Core library for prctx: reads the pull-request context a Travis CI build
//! exposes through its environment, and caches the GitHub client used to act
//! on that pull request.
//!
//! Nothing here performs I/O beyond reading environment variables. The client
//! itself is built through the [`ClientFactory`] trait, so this crate does not
//! depend on any HTTP stack.

pub mod config;
pub mod env;
mod error;
mod session;
mod traits;

pub use config::{EnvConfig, PullRequestContext, Slug};
pub use error::{Error, Result};
pub use session::{AuthOverride, Session};
pub use traits::ClientFactory;
// Re-export so callers can build auth values without depending on secrecy
pub use secrecy::SecretString;
// Option maps are plain JSON objects
pub use serde_json::{Map, Value};
