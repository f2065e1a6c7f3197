//! `prctx comment` command - post a comment on the pull request.

use anyhow::{Context, Result};
use prctx_core::{AuthOverride, Map, SecretString, Value};
use prctx_github::{IssueComment, UpdateComment};

use super::utils;
use crate::output;

const CREATE_COMMENT_ROUTE: &str = "POST /repos/{owner}/{repo}/issues/{issue_number}/comments";

/// Run the comment command.
pub fn run(body: &str, token: Option<String>, update: Option<u64>) -> Result<()> {
    let mut session = utils::open_session()?;
    if let Some(token) = token {
        session.set_auth(Some(SecretString::from(token)));
    }

    let client = session.client(AuthOverride::Inherit)?;
    if !client.auth().is_authenticated() {
        output::warn("No token set - GitHub will likely reject the comment");
    }

    let rt = tokio::runtime::Runtime::new()?;
    let comment: IssueComment = match update {
        Some(comment_id) => {
            let context = session.context()?;
            output::info(&format!("Updating comment {comment_id}..."));
            rt.block_on(client.update_pr_comment(
                &context,
                comment_id,
                UpdateComment {
                    body: body.to_string(),
                },
            ))
            .context("Failed to update comment")?
        }
        None => {
            let mut extra = Map::new();
            extra.insert("body".into(), Value::from(body));
            let options = session.options(Some(&extra))?;
            rt.block_on(client.request(CREATE_COMMENT_ROUTE, options))
                .context("Failed to create comment")?
        }
    };

    output::success(&format!("Comment {} saved", comment.id));
    if let Some(url) = &comment.html_url {
        output::detail(url);
    }

    Ok(())
}
