pub mod config;
pub mod error;
pub mod failure_log;
pub mod index;
pub mod movies;
pub mod nas;
pub mod pipeline;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use failure_log::FailureLog;
pub use index::{MovieIndex, Quality, YtsIndex};
pub use movies::read_movie_list;
pub use nas::{DownloadStation, TaskSubmitter};
pub use pipeline::{Pipeline, RunSummary, TitleOutcome};
