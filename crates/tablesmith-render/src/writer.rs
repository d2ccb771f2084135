use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use tablesmith_core::Table;

use crate::dao::render_dao;
use crate::entity::render_entity;
use crate::errors::RenderError;
use crate::layout::entity_name;
use crate::shape::render_shape;

/// The three files generated for every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Shape,
    Entity,
    Dao,
}

impl ArtifactKind {
    /// Rendering order within a table.
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Shape, ArtifactKind::Entity, ArtifactKind::Dao];

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Shape => "JsonDataType",
            ArtifactKind::Entity => "Entity",
            ArtifactKind::Dao => "DAO",
        }
    }

    /// File name, e.g. `UsersJson.rs`, `Users.rs` or `UsersDAO.rs`.
    pub fn file_name(self, table: &Table) -> String {
        let name = entity_name(table);
        match self {
            ArtifactKind::Shape => format!("{name}Json.rs"),
            ArtifactKind::Entity => format!("{name}.rs"),
            ArtifactKind::Dao => format!("{name}DAO.rs"),
        }
    }

    pub fn render(self, table: &Table) -> String {
        match self {
            ArtifactKind::Shape => render_shape(table),
            ArtifactKind::Entity => render_entity(table),
            ArtifactKind::Dao => render_dao(table),
        }
    }
}

/// Writes rendered artifacts into one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render one artifact and overwrite its file.
    pub fn write(&self, kind: ArtifactKind, table: &Table) -> Result<PathBuf, RenderError> {
        let path = self.out_dir.join(kind.file_name(table));
        let text = kind.render(table);
        write_bytes_atomic(&path, text.as_bytes())?;
        tracing::debug!(
            event = "artifact_written",
            table = %table.name,
            artifact = kind.label(),
            path = %path.display(),
            bytes = text.len()
        );
        Ok(path)
    }
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), RenderError> {
    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(io_err)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| RenderError::InvalidPath(path.to_path_buf()))?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let result = write_and_rename(&tmp_path, path, data);
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result.map_err(io_err)
}

fn write_and_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp_path, path)
}
