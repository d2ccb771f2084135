use tablesmith_core::{Table, target_type};

use crate::layout::{ColumnNames, entity_name, function_suffix, header, quote_ident};

/// Render the data-access module of a table.
///
/// The module holds three scan variants that differ only in how the row is
/// obtained, a load by identifier and an insert that returns the stored row.
pub fn render_dao(table: &Table) -> String {
    let entity = entity_name(table);
    let suffix = function_suffix(table);
    let columns: Vec<ColumnNames> = table.columns.iter().map(ColumnNames::of).collect();
    let all_columns = column_list(table.columns.iter().map(|c| c.name.as_str()));

    let extract = |indent: &str| -> String {
        let mut block = String::new();
        for (column, names) in table.columns.iter().zip(&columns) {
            block.push_str(&format!(
                "{indent}let {}: {} = row.try_get({:?})?;\n",
                names.binding, names.rust_type, column.name
            ));
        }
        block
    };
    let construct = format!(
        "{entity}::new({})",
        columns
            .iter()
            .map(|names| names.binding.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut out = header(table);
    out.push('\n');
    out.push_str("use futures::{Stream, TryStreamExt};\n");
    out.push_str("use sqlx::Row;\n");
    out.push_str("use sqlx::postgres::{PgPool, PgRow};\n\n");
    out.push_str(&format!("use super::{entity};\n\n"));

    // Single row that must be present, as returned by `fetch_optional`.
    out.push_str(&format!(
        "pub fn row_result_set_to_{suffix}(row: Option<PgRow>) -> Result<{entity}, sqlx::Error> {{\n"
    ));
    out.push_str("    let row = row.ok_or(sqlx::Error::RowNotFound)?;\n");
    out.push_str(&extract("    "));
    out.push_str(&format!("    Ok({construct})\n"));
    out.push_str("}\n\n");

    // Row already positioned by the caller.
    out.push_str(&format!(
        "pub fn rows_no_fetch_result_set_to_{suffix}(row: &PgRow) -> Result<{entity}, sqlx::Error> {{\n"
    ));
    out.push_str(&extract("    "));
    out.push_str(&format!("    Ok({construct})\n"));
    out.push_str("}\n\n");

    // Row stream advanced here; only the first row is used.
    out.push_str(&format!(
        "pub async fn rows_result_set_to_{suffix}<S>(rows: &mut S) -> Result<Option<{entity}>, sqlx::Error>\n"
    ));
    out.push_str("where\n");
    out.push_str("    S: Stream<Item = Result<PgRow, sqlx::Error>> + Unpin,\n");
    out.push_str("{\n");
    out.push_str("    if let Some(row) = rows.try_next().await? {\n");
    out.push_str(&extract("        "));
    out.push_str(&format!("        return Ok(Some({construct}));\n"));
    out.push_str("    }\n");
    out.push_str("    Ok(None)\n");
    out.push_str("}\n\n");

    out.push_str(&render_load_by_id(table, &entity, &suffix, &all_columns));
    out.push('\n');
    out.push_str(&render_create(table, &entity, &suffix, &columns, &all_columns));
    out
}

fn render_load_by_id(table: &Table, entity: &str, suffix: &str, all_columns: &str) -> String {
    let (key_column, key_type) = match table.primary_column() {
        Some(column) => (column.name.clone(), target_type(&column.data_type)),
        None => ("id".to_string(), "i64".to_string()),
    };

    let mut out = format!(
        "pub async fn load_{suffix}_by_id(pool: &PgPool, id: {key_type}) -> Result<Option<{entity}>, sqlx::Error> {{\n"
    );
    let statement = format!(
        "select {all_columns} from {} where {}=$1",
        quote_ident(&table.name),
        quote_ident(&key_column)
    );
    out.push_str(&format!("    let mut rows = sqlx::query({statement:?})\n"));
    out.push_str("        .bind(id)\n");
    out.push_str("        .fetch(pool);\n");
    out.push_str(&format!("    rows_result_set_to_{suffix}(&mut rows).await\n"));
    out.push_str("}\n");
    out
}

fn render_create(
    table: &Table,
    entity: &str,
    suffix: &str,
    columns: &[ColumnNames],
    all_columns: &str,
) -> String {
    let inserted: Vec<(&str, &ColumnNames)> = table
        .columns
        .iter()
        .zip(columns)
        .filter(|(column, _)| !column.is_primary)
        .map(|(column, names)| (column.name.as_str(), names))
        .collect();

    let mut params = vec!["pool: &PgPool".to_string()];
    params.extend(
        inserted
            .iter()
            .map(|(_, names)| format!("{}: {}", names.binding, names.rust_type)),
    );

    let statement = insert_statement(
        &table.name,
        inserted.iter().map(|(name, _)| *name),
        all_columns,
    );

    let mut out = format!(
        "pub async fn create_{suffix}({}) -> Result<{entity}, sqlx::Error> {{\n",
        params.join(", ")
    );
    out.push_str(&format!("    let row = sqlx::query({statement:?})\n"));
    for (_, names) in &inserted {
        out.push_str(&format!("        .bind({})\n", names.binding));
    }
    out.push_str("        .fetch_optional(pool)\n");
    out.push_str("        .await?;\n");
    out.push_str(&format!("    row_result_set_to_{suffix}(row)\n"));
    out.push_str("}\n");
    out
}

/// Parameterized insert naming `columns` with placeholders `$1..$n`.
///
/// `returning` is an already quoted column list.
pub fn insert_statement<'a>(
    table: &str,
    columns: impl Iterator<Item = &'a str>,
    returning: &str,
) -> String {
    let table = quote_ident(table);
    let columns: Vec<String> = columns.map(quote_ident).collect();
    if columns.is_empty() {
        return format!("insert into {table} default values returning {returning}");
    }
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "insert into {table}({}) values({}) returning {returning}",
        columns.join(","),
        placeholders.join(",")
    )
}

fn column_list<'a>(columns: impl Iterator<Item = &'a str>) -> String {
    columns.map(quote_ident).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_placeholders_in_column_order() {
        let statement = insert_statement(
            "users",
            ["email", "created_at"].into_iter(),
            "id,email,created_at",
        );
        assert_eq!(
            statement,
            "insert into users(email,created_at) values($1,$2) returning id,email,created_at"
        );
    }

    #[test]
    fn quotes_reserved_and_mixed_case_names() {
        let statement = insert_statement(
            "order",
            ["user", "placedAt"].into_iter(),
            &column_list(["id", "user", "placedAt"].into_iter()),
        );
        assert_eq!(
            statement,
            r#"insert into "order"("user","placedAt") values($1,$2) returning id,"user","placedAt""#
        );
    }

    #[test]
    fn falls_back_to_default_values() {
        let statement = insert_statement("counters", std::iter::empty(), "id");
        assert_eq!(statement, "insert into counters default values returning id");
    }
}
