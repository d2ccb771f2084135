use anyhow::Result;
use tablesmith_core::{CatalogColumn, PostgresConstraintParser, TableDescription, resolve_table};
use tablesmith_render::{ArtifactKind, ArtifactWriter, RenderError};

fn user_accounts() -> tablesmith_core::Table {
    let mut description = TableDescription::new(1, "user_accounts");
    description.columns = vec![
        CatalogColumn::new("id", "integer", false),
        CatalogColumn::new("name", "text", true),
    ];
    resolve_table(description, &PostgresConstraintParser)
}

#[test]
fn writes_three_named_artifacts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let writer = ArtifactWriter::new(dir.path().join("outputs"));
    let table = user_accounts();

    let mut names = Vec::new();
    for kind in ArtifactKind::ALL {
        let path = writer.write(kind, &table)?;
        assert_eq!(std::fs::read_to_string(&path)?, kind.render(&table));
        names.push(path.file_name().map(|n| n.to_string_lossy().into_owned()));
    }

    assert_eq!(
        names,
        vec![
            Some("UserAccountsJson.rs".to_string()),
            Some("UserAccounts.rs".to_string()),
            Some("UserAccountsDAO.rs".to_string()),
        ]
    );
    let leftovers = std::fs::read_dir(writer.out_dir())?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .count();
    assert_eq!(leftovers, 0);
    Ok(())
}

#[test]
fn rewrites_existing_files_byte_for_byte() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let writer = ArtifactWriter::new(dir.path());
    let table = user_accounts();

    let path = writer.write(ArtifactKind::Dao, &table)?;
    std::fs::write(&path, "stale")?;
    let first = {
        writer.write(ArtifactKind::Dao, &table)?;
        std::fs::read(&path)?
    };
    writer.write(ArtifactKind::Dao, &table)?;
    assert_eq!(std::fs::read(&path)?, first);
    assert_ne!(first, b"stale".to_vec());
    Ok(())
}

#[test]
fn unwritable_output_is_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "file")?;

    let writer = ArtifactWriter::new(&blocker);
    let err = writer
        .write(ArtifactKind::Shape, &user_accounts())
        .expect_err("output dir is a file");
    assert!(matches!(err, RenderError::Io { .. }));
    Ok(())
}

#[test]
fn failed_rename_leaves_no_temporary_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let writer = ArtifactWriter::new(dir.path());
    let table = user_accounts();

    // A non-empty directory where the artifact should go makes the rename fail.
    let target = dir.path().join(ArtifactKind::Entity.file_name(&table));
    std::fs::create_dir(&target)?;
    std::fs::write(target.join("keep"), "occupied")?;

    let err = writer
        .write(ArtifactKind::Entity, &table)
        .expect_err("target is a directory");
    assert!(matches!(err, RenderError::Io { .. }));

    let leftovers = std::fs::read_dir(dir.path())?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .count();
    assert_eq!(leftovers, 0);
    Ok(())
}
