//! Workspace cleanup.
//!
//! Example and snippet runs leave browser scratch directories behind
//! (cache, blob storage, WebRTC event logs) that must not end up inside
//! packaged distributions. Removal is best-effort: a directory that is
//! already gone, or cannot be removed, is skipped silently.

use std::path::PathBuf;

use crate::util::context::ProjectContext;

/// Scratch directories the embedded browser creates next to the scripts
/// that ran it.
const SCRATCH_DIRS: &[&str] = &["blob_storage", "webrtc_event_logs", "webcache"];

/// Remove scratch directories under `examples/` and `snippets/`.
/// Returns the directories actually removed, for reporting.
pub fn clean_scratch(ctx: &ProjectContext) -> Vec<PathBuf> {
    let mut removed = Vec::new();

    for root in [ctx.examples_dir(), ctx.snippets_dir()] {
        for name in SCRATCH_DIRS {
            let dir = root.join(name);
            if std::fs::remove_dir_all(&dir).is_ok() {
                removed.push(dir);
            }
        }
    }

    removed
}
