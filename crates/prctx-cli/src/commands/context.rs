//! `prctx context` command - show the repository and pull request of this build.

use anyhow::Result;

use super::utils;
use crate::output;

/// Run the context command.
pub fn run(json: bool) -> Result<()> {
    let session = utils::open_session()?;
    let context = session.context()?;
    let authenticated = session.auth().is_some();

    if json {
        let value = serde_json::json!({
            "owner": context.owner,
            "repo": context.repo,
            "pull_request": context.number,
            "authenticated": authenticated,
        });
        output::data(&serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::data(&format!(
        "{}/{}#{}",
        context.owner, context.repo, context.number
    ));
    if authenticated {
        output::detail("  token: GITHUB_TOKEN");
    } else {
        output::detail("  token: not set");
    }
    if let Some(api_url) = &session.config().api_url {
        output::detail(&format!("  api: {api_url}"));
    }

    Ok(())
}
