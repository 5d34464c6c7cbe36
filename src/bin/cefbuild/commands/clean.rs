//! `cefbuild clean` command

use anyhow::Result;

use cefbuild::ops::clean::clean_scratch;
use cefbuild::util::ProjectContext;

pub fn execute() -> Result<()> {
    let ctx = ProjectContext::current()?;

    let removed = clean_scratch(&ctx);
    for dir in &removed {
        eprintln!("    Removed {}", dir.display());
    }
    if removed.is_empty() {
        eprintln!("    Nothing to clean");
    }

    Ok(())
}
