mod cli;
mod commands;
mod ghostscript;
mod model;
mod probe;
mod util;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download(args) => commands::download::run(args),
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Urls(args) => commands::urls::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Clean(args) => commands::clean::run(args),
        Commands::Merge(args) => commands::merge::run(args),
        Commands::Mix(args) => commands::mix::run(args),
        Commands::Number(args) => commands::number::run(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
