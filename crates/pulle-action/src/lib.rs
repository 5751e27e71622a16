//! PULL-E action runtime: configuration, event context resolution, prompt
//! building, and the sequential comment pipeline.

pub mod artists;
pub mod cli_args;
pub mod event_context;
pub mod pipeline;
pub mod prompt;

pub use cli_args::{ActionConfig, Cli};
pub use pipeline::{run, RunOutcome};
