// file: src/pipeline/mod.rs
// description: batch extraction module exports and public api
// reference: pipeline orchestration

mod progress;
mod runner;

pub use progress::{BatchStats, ProgressTracker};
pub use runner::{BatchReport, BatchRunner, FileFailure, FileReport};
