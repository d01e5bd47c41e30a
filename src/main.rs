mod application;
mod cli;
mod data;
mod domain;
mod eval;
mod infra;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("wals_eval={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli.run()
}
