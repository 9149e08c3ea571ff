pub mod analyzer;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod event;
pub mod github;
pub mod result;
pub mod runner;
pub mod samples;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::HarnessError;
pub use runner::{run_harness, RunOptions, RunReport};
