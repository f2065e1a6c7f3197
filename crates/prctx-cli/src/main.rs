//! prctx CLI - act on the current pull request from a Travis CI build.

use clap::Parser;

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Context { json } => commands::context::run(json),
        Commands::Options { params } => commands::options::run(&params),
        Commands::Comment {
            body,
            token,
            update,
        } => commands::comment::run(&body, token, update),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
