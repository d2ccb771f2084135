use std::path::PathBuf;

use tablesmith_core::{ConstraintParser, TableDescription, resolve_table};
use tablesmith_introspect::{CatalogSource, Introspector};
use tablesmith_render::{ArtifactKind, ArtifactWriter, RenderError};

use crate::status::RunStatus;

#[derive(Debug)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub result: Result<PathBuf, RenderError>,
}

/// Artifacts produced for one table, in rendering order.
#[derive(Debug)]
pub struct TableReport {
    pub table: String,
    pub artifacts: Vec<ArtifactOutcome>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    /// Tables returned by the catalog listing, before filtering.
    pub tables_listed: usize,
    pub tables: Vec<TableReport>,
    /// Tables dropped because their description failed.
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn artifacts_written(&self) -> usize {
        self.outcomes().filter(|outcome| outcome.result.is_ok()).count()
    }

    pub fn artifact_failures(&self) -> usize {
        self.outcomes().filter(|outcome| outcome.result.is_err()).count()
    }

    /// Per-table failures never raise the status; an empty catalog does.
    pub fn status(&self) -> RunStatus {
        if self.tables_listed == 0 {
            RunStatus::Warning
        } else {
            RunStatus::Ok
        }
    }

    fn outcomes(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.tables.iter().flat_map(|table| table.artifacts.iter())
    }
}

/// Describe, resolve and render every table of the catalog.
///
/// `only` restricts the run to the named tables; catalog order is kept.
/// Tables whose description fails are skipped, artifacts that cannot be
/// written are reported, and neither stops the remaining work.
pub async fn run_pipeline<C: CatalogSource>(
    introspector: &Introspector<C>,
    parser: &dyn ConstraintParser,
    writer: &ArtifactWriter,
    only: &[String],
) -> RunSummary {
    let mut summary = RunSummary::default();

    tracing::info!(event = "describe_tables", engine = introspector.catalog().engine());
    let mut names = introspector.list_tables().await;
    summary.tables_listed = names.len();
    if !only.is_empty() {
        for wanted in only {
            if !names.contains(wanted) {
                tracing::warn!(event = "table_filter_unmatched", table = %wanted);
            }
        }
        names.retain(|name| only.contains(name));
    }

    let mut descriptions: Vec<TableDescription> = Vec::with_capacity(names.len());
    for name in names {
        match introspector.describe_table(&name).await {
            Ok(description) => descriptions.push(description),
            Err(err) => {
                tracing::warn!(event = "table_skipped", table = %name, error = %err);
                summary.skipped.push(name);
            }
        }
    }

    tracing::info!(event = "resolve_keys", tables = descriptions.len());
    let tables: Vec<_> = descriptions
        .into_iter()
        .map(|description| resolve_table(description, parser))
        .collect();

    for table in &tables {
        tracing::info!(
            event = "render_table",
            table = %table.name,
            entity = %tablesmith_core::snake_to_upper_camel(&table.name)
        );
        let mut artifacts = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let result = writer.write(kind, table);
            match &result {
                Ok(path) => tracing::info!(
                    event = "artifact_done",
                    table = %table.name,
                    artifact = kind.label(),
                    path = %path.display()
                ),
                Err(err) => tracing::error!(
                    event = "artifact_failed",
                    table = %table.name,
                    artifact = kind.label(),
                    error = %err
                ),
            }
            artifacts.push(ArtifactOutcome { kind, result });
        }
        summary.tables.push(TableReport {
            table: table.name.clone(),
            artifacts,
        });
    }

    summary
}
