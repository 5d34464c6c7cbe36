//! `cefbuild build` command

use anyhow::Result;

use cefbuild::ops::sync::SyncOptions;
use cefbuild::ops::{Pipeline, PipelineOutcome};
use cefbuild::util::config::Config;
use cefbuild::util::process::SystemRunner;
use cefbuild::util::ProjectContext;
use cefbuild::PlatformDescriptor;

use crate::cli::BuildArgs;

pub fn execute(args: BuildArgs) -> Result<()> {
    let ctx = ProjectContext::current()?;
    let config = Config::load(ctx.root())?;
    let desc = PlatformDescriptor::resolve();

    let mut sync = SyncOptions::from_config(&config);
    if let Some(build_dir) = args.build_dir {
        sync.build_dir = build_dir;
    }
    if let Some(url) = args.url {
        sync.url = url;
    }
    // A full build run always wants the checkout present but should not
    // stop at the update-only path.
    sync.update = false;

    let mut runner = SystemRunner;
    let mut pipeline = Pipeline::new(desc, ctx, sync, config.build.clone(), args.x86, &mut runner);

    match pipeline.run()? {
        PipelineOutcome::Synced => {
            eprintln!("    Synced source only; nothing was built");
        }
        PipelineOutcome::SourceDistribOnly => {
            eprintln!("    Finished source distribution (32-bit native compile pending)");
        }
        PipelineOutcome::Packaged(distrib) => {
            eprintln!("    Packaged {}", distrib.display());
        }
    }

    Ok(())
}
