mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Default to warnings when RUST_LOG is unset
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("p2timer=warn,p2timer_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(args.config.as_deref())?;

    match args.command {
        Command::Info { demo, json } => commands::info::run(&demo, &config, json),
        Command::Time { demos, sort, json } => commands::time::run(&demos, &config, sort, json),
        Command::Dump {
            demo,
            from,
            to,
            include,
            exclude,
        } => commands::dump::run(&demo, &config, from, to, &include, &exclude),
        Command::Config => commands::config::run(&config),
    }
}
