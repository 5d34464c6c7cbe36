//! cefbuild CLI - build pipeline helper for CEF Python

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cefbuild=debug")
    } else {
        EnvFilter::new("cefbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Sync(args) => commands::sync::execute(args),
        Commands::Build(args) => commands::build::execute(args),
        Commands::Clean => commands::clean::execute(),
        Commands::Info => commands::info::execute(),
    }
}
