//! GitHub API client.

use prctx_core::{ClientFactory, EnvConfig, PullRequestContext};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::auth::Auth;
use crate::error::{Error, Result};
use crate::route;
use crate::types::{CreateComment, IssueComment, PullRequest, PullRequestState, UpdateComment};

/// Internal representation of a PR from the GitHub API.
#[derive(serde::Deserialize)]
struct ApiPullRequest {
    number: u64,
    title: String,
    body: Option<String>,
    state: String,
    /// GitHub returns state="closed" + merged=true for merged PRs.
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    draft: bool,
    html_url: String,
    head: ApiBranch,
    base: ApiBranch,
}

/// Internal representation of a branch ref from the GitHub API.
#[derive(serde::Deserialize)]
struct ApiBranch {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: String,
}

impl ApiPullRequest {
    fn into_pull_request(self) -> PullRequest {
        let state = if self.merged {
            PullRequestState::Merged
        } else {
            match self.state.as_str() {
                "open" => PullRequestState::Open,
                _ => PullRequestState::Closed,
            }
        };

        PullRequest {
            number: self.number,
            title: self.title,
            body: self.body,
            state,
            draft: self.draft,
            head_branch: self.head.ref_name,
            head_sha: self.head.sha,
            base_branch: self.base.ref_name,
            html_url: self.html_url,
        }
    }
}

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the token is not a
    /// valid header value.
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the token is not a
    /// valid header value.
    pub fn with_base_url(auth: Auth, base_url: impl Into<String>) -> Result<Self> {
        // Reject unusable tokens at construction rather than on first request
        auth.header_value()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("prctx"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Authentication this client was built with.
    #[must_use]
    pub const fn auth(&self) -> &Auth {
        &self.auth
    }

    /// API base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(match self.auth.header_value()? {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        })
    }

    /// Make a request with an optional JSON body.
    async fn call<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.authorize(self.client.request(method, url.as_str()))?;
        if let Some(body) = body {
            request = request.json(body);
        }

        Self::handle_response(request.send().await?).await
    }

    /// Handle API response.
    ///
    /// An empty success body (e.g. `204 No Content`) is decoded as JSON `null`.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Ok(serde_json::from_value(Value::Null)?);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let status_code = status.as_u16();

        match status_code {
            401 => Err(Error::AuthenticationFailed),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }

    // === Route Requests ===

    /// Call an API route such as `"POST /repos/{owner}/{repo}/issues/{issue_number}/comments"`.
    ///
    /// `{name}` placeholders are taken out of `params`. Remaining parameters
    /// are sent as the JSON body for `POST`, `PATCH` and `PUT`, and as the
    /// query string otherwise. Pair with [`prctx_core::Session::options`] to
    /// target the current pull request.
    ///
    /// # Errors
    /// Returns error if the route is malformed, a placeholder has no
    /// parameter, or the API call fails.
    pub async fn request<T: DeserializeOwned>(
        &self,
        route: &str,
        params: Map<String, Value>,
    ) -> Result<T> {
        let expanded = route::expand(route, params)?;
        let url = format!("{}{}", self.base_url, expanded.path);

        let mut request =
            self.authorize(self.client.request(expanded.method.clone(), url.as_str()))?;
        if !expanded.rest.is_empty() {
            request = if expanded.has_body() {
                request.json(&expanded.rest)
            } else {
                request.query(&expanded.query())
            };
        }

        Self::handle_response(request.send().await?).await
    }

    // === PR Operations ===

    /// Get the pull request.
    ///
    /// # Errors
    /// Returns error if PR not found or API call fails.
    pub async fn get_pr(&self, context: &PullRequestContext<'_>) -> Result<PullRequest> {
        let PullRequestContext {
            owner,
            repo,
            number,
        } = *context;
        let api_pr: ApiPullRequest = self
            .call(
                Method::GET,
                &format!("/repos/{owner}/{repo}/pulls/{number}"),
                None::<&()>,
            )
            .await?;

        Ok(api_pr.into_pull_request())
    }

    // === Comment Operations ===

    /// List comments on the pull request.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn list_pr_comments(
        &self,
        context: &PullRequestContext<'_>,
    ) -> Result<Vec<IssueComment>> {
        let PullRequestContext {
            owner,
            repo,
            number,
        } = *context;
        self.call(
            Method::GET,
            &format!("/repos/{owner}/{repo}/issues/{number}/comments"),
            None::<&()>,
        )
        .await
    }

    /// Create a comment on the pull request.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn create_pr_comment(
        &self,
        context: &PullRequestContext<'_>,
        comment: CreateComment,
    ) -> Result<IssueComment> {
        let PullRequestContext {
            owner,
            repo,
            number,
        } = *context;
        self.call(
            Method::POST,
            &format!("/repos/{owner}/{repo}/issues/{number}/comments"),
            Some(&comment),
        )
        .await
    }

    /// Update a comment in the pull request's repository.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn update_pr_comment(
        &self,
        context: &PullRequestContext<'_>,
        comment_id: u64,
        comment: UpdateComment,
    ) -> Result<IssueComment> {
        let PullRequestContext { owner, repo, .. } = *context;
        self.call(
            Method::PATCH,
            &format!("/repos/{owner}/{repo}/issues/comments/{comment_id}"),
            Some(&comment),
        )
        .await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// Builds [`GitHubClient`]s against one API URL.
#[derive(Debug, Clone)]
pub struct GitHubFactory {
    base_url: String,
}

impl GitHubFactory {
    /// Factory for a specific API URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Factory for the configured API URL, or github.com.
    #[must_use]
    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(
            config
                .api_url
                .as_deref()
                .unwrap_or(GitHubClient::DEFAULT_API_URL),
        )
    }
}

impl Default for GitHubFactory {
    fn default() -> Self {
        Self::new(GitHubClient::DEFAULT_API_URL)
    }
}

impl ClientFactory for GitHubFactory {
    type Client = GitHubClient;
    type Error = Error;

    fn build(&self, auth: Option<&SecretString>) -> Result<GitHubClient> {
        GitHubClient::with_base_url(Auth::from_token(auth), self.base_url.clone())
    }
}
