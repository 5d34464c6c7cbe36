//! Pipeline operations: source sync, the build state machine, cleanup.

pub mod build;
pub mod clean;
pub mod sync;

pub use build::{Pipeline, PipelineOutcome, Stage, StageResult};
pub use sync::{sync_source, SyncOptions, SyncOutcome};
