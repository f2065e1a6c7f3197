//! CLI command definitions.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod comment;
pub mod completions;
pub mod context;
pub mod options;
mod utils;

/// Act on the current pull request from a Travis CI build.
#[derive(Parser)]
#[command(name = "prctx")]
#[command(version)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the repository and pull request of this build
    Context {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the parameters for a pull-request scoped API call as JSON
    Options {
        /// Extra parameters as KEY=VALUE; VALUE is parsed as JSON when possible
        #[arg(value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Post a comment on the pull request
    Comment {
        /// Comment body
        body: String,

        /// Token to use instead of GITHUB_TOKEN
        #[arg(long)]
        token: Option<String>,

        /// Edit an existing comment instead of creating one
        #[arg(long, value_name = "COMMENT_ID")]
        update: Option<u64>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
