//! `cefbuild sync` command

use anyhow::Result;

use cefbuild::ops::sync::{sync_source, SyncOptions, SyncOutcome};
use cefbuild::util::config::Config;
use cefbuild::util::process::SystemRunner;
use cefbuild::util::ProjectContext;

use crate::cli::SyncArgs;

pub fn execute(args: SyncArgs) -> Result<()> {
    let ctx = ProjectContext::current()?;
    let config = Config::load(ctx.root())?;

    let mut opts = SyncOptions::from_config(&config);
    if let Some(build_dir) = args.build_dir {
        opts.build_dir = build_dir;
    }
    if let Some(branch) = args.branch {
        opts.branch = branch;
    }
    if let Some(url) = args.url {
        opts.url = url;
    }
    if args.clean {
        opts.clean = true;
    }
    if args.no_update {
        opts.update = false;
    }

    let dest = opts.dest();
    let mut runner = SystemRunner;
    let outcome = sync_source(&opts, &mut runner)?;

    let verb = match outcome {
        SyncOutcome::Cloned => "Cloned",
        SyncOutcome::Updated => "Updated",
        SyncOutcome::Recloned => "Recloned",
        SyncOutcome::UpToDate => "Unchanged",
    };
    eprintln!("    {} {}", verb, dest.display());

    Ok(())
}
