use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use sqlx::Connection;
use sqlx::postgres::PgPoolOptions;
use tablesmith_cli::config::DEFAULT_CONFIG_PATH;
use tablesmith_cli::logging::DEFAULT_LOG_PATH;
use tablesmith_cli::{ConfigError, RunStatus, RunSummary, init_logging, load_config, run_pipeline};
use tablesmith_core::PostgresConstraintParser;
use tablesmith_introspect::{Introspector, PostgresCatalog};
use tablesmith_render::ArtifactWriter;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("can not load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("can not connect to postgres database: {0}")]
    Connection(#[from] sqlx::Error),
}

impl CliError {
    fn status(&self) -> RunStatus {
        match self {
            CliError::Config(_) | CliError::Connection(_) => RunStatus::Critical,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tablesmith",
    version,
    about = "Generate Rust entity, serde and sqlx data-access files from a Postgres catalog"
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Output directory; overrides `output.dir`.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Append-only JSON log file.
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,
    /// Only generate the named table (repeatable).
    #[arg(long = "table", value_name = "TABLE")]
    tables: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_file) {
        println!(
            "{} - can not create log file {}: {err}",
            RunStatus::Critical,
            cli.log_file.display()
        );
        return RunStatus::Critical.into();
    }

    let started_at = chrono::Utc::now();
    let timer = Instant::now();
    tracing::info!(
        event = "run_started",
        started_at = %started_at.to_rfc3339(),
        config = %cli.config.display()
    );

    let status = match run(cli).await {
        Ok(summary) => {
            let status = summary.status();
            tracing::info!(
                event = "run_finished",
                status = status.label(),
                tables_listed = summary.tables_listed,
                tables_generated = summary.tables.len(),
                tables_skipped = summary.skipped.len(),
                artifacts_written = summary.artifacts_written(),
                artifact_failures = summary.artifact_failures(),
                duration_ms = timer.elapsed().as_millis() as u64
            );
            println!(
                "{status} - {} tables generated, {} skipped, {} artifact failures",
                summary.tables.len(),
                summary.skipped.len(),
                summary.artifact_failures()
            );
            status
        }
        Err(err) => {
            let status = err.status();
            tracing::error!(
                event = "run_finished",
                status = status.label(),
                error = %err,
                duration_ms = timer.elapsed().as_millis() as u64
            );
            println!("{status} - {err}");
            status
        }
    };

    status.into()
}

async fn run(cli: Cli) -> Result<RunSummary, CliError> {
    let config = load_config(&cli.config)?;
    let options = config.database.connect_options()?;
    let out_dir = cli.output_dir.unwrap_or(config.output.dir);

    tracing::info!(event = "connecting", connection = %config.database.redacted());
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;
    {
        let mut conn = pool.acquire().await?;
        conn.ping().await?;
    }
    tracing::info!(event = "connected", database = %config.database.database_name());

    let introspector = Introspector::new(PostgresCatalog::new(pool.clone()));
    let writer = ArtifactWriter::new(out_dir);
    let summary =
        run_pipeline(&introspector, &PostgresConstraintParser, &writer, &cli.tables).await;

    pool.close().await;
    Ok(summary)
}
