//! Building blocks of the `tablesmith` command: configuration, logging,
//! exit status and the generation pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod status;

pub use config::{Config, ConfigError, DatabaseConfig, OutputConfig, load_config};
pub use logging::init_logging;
pub use pipeline::{ArtifactOutcome, RunSummary, TableReport, run_pipeline};
pub use status::RunStatus;
