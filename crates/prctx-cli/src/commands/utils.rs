use anyhow::{Context, Result, bail};
use prctx_core::{EnvConfig, Map, Value};
use prctx_github::{GitHubFactory, GitHubSession};

/// Read the CI environment and set up a session.
pub fn open_session() -> Result<GitHubSession> {
    let config = EnvConfig::from_env().context("Invalid CI environment")?;
    let factory = GitHubFactory::from_config(&config);
    Ok(GitHubSession::new(config, factory))
}

/// Parse `KEY=VALUE` pairs into a parameter map. Later keys win.
///
/// Values that parse as JSON keep their type (`42`, `true`, `[1]`),
/// anything else is taken as a string.
pub fn parse_params(params: &[String]) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("Invalid parameter '{param}' - expected KEY=VALUE");
        };
        if key.is_empty() {
            bail!("Invalid parameter '{param}' - key is empty");
        }

        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
        map.insert(key.to_string(), value);
    }
    Ok(map)
}
