pub mod bump;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod task;
pub mod ui;

pub use bump::{bump_version, verify_bump, BumpReport, FileOutcome, COMMIT_MESSAGE};
pub use error::{BumpError, Result};
pub use task::BumpRequest;
