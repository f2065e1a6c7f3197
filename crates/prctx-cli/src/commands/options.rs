//! `prctx options` command - print the parameters for a pull-request call.

use anyhow::Result;

use super::utils;
use crate::output;

/// Run the options command.
pub fn run(params: &[String]) -> Result<()> {
    let extra = utils::parse_params(params)?;
    let session = utils::open_session()?;

    let options = session.options(Some(&extra))?;
    output::data(&serde_json::to_string_pretty(&options)?);

    Ok(())
}
