//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cefbuild - build pipeline and packaging helper for CEF Python
#[derive(Parser)]
#[command(name = "cefbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone or update the CEF source checkout
    Sync(SyncArgs),

    /// Run the build pipeline: sync, build, detect, package
    Build(BuildArgs),

    /// Remove scratch directories left by example and snippet runs
    Clean,

    /// Show platform facts, CEF version, and resolved artifact paths
    Info,
}

#[derive(Args)]
pub struct SyncArgs {
    /// Directory holding the CEF checkout (overrides cefbuild.toml)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Branch or ref to clone
    #[arg(long)]
    pub branch: Option<String>,

    /// Remote repository URL
    #[arg(long)]
    pub url: Option<String>,

    /// Wipe an existing checkout and clone fresh
    #[arg(long)]
    pub clean: bool,

    /// Do not fast-forward an existing checkout
    #[arg(long)]
    pub no_update: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory holding the CEF checkout (overrides cefbuild.toml)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Remote repository URL used if the checkout must be created
    #[arg(long)]
    pub url: Option<String>,

    /// Target the 32-bit CEF build
    #[arg(long)]
    pub x86: bool,
}
