use sqlx::PgPool;
use sqlx::postgres::types::Oid;

use tablesmith_core::Result;

fn db_error(err: sqlx::Error) -> tablesmith_core::Error {
    tablesmith_core::Error::Db(err.to_string())
}

pub async fn list_tables(pool: &PgPool) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        select c.relname::text as name
        from pg_catalog.pg_class c
        left join pg_catalog.pg_namespace n on n.oid = c.relnamespace
        where c.relkind in ('r', '')
          and n.nspname <> 'pg_catalog'
          and n.nspname <> 'information_schema'
          and n.nspname !~ '^pg_toast'
          and pg_catalog.pg_table_is_visible(c.oid)
        order by 1
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_error)
}

pub async fn get_table_identity(pool: &PgPool, name: &str) -> Result<Option<(u32, String)>> {
    let row = sqlx::query_as::<_, (Oid, String)>(
        r#"
        select c.oid, c.relname::text
        from pg_catalog.pg_class c
        left join pg_catalog.pg_namespace n on n.oid = c.relnamespace
        where c.relname = $1
          and pg_catalog.pg_table_is_visible(c.oid)
        order by 2
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(db_error)?;

    Ok(row.map(|(oid, name)| (oid.0, name)))
}

pub struct RawColumn {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

pub async fn list_columns(pool: &PgPool, oid: u32) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query_as::<_, (String, String, bool)>(
        r#"
        select
          a.attname::text,
          pg_catalog.format_type(a.atttypid, a.atttypmod),
          not a.attnotnull
        from pg_catalog.pg_attribute a
        where a.attrelid = $1
          and a.attnum > 0
          and not a.attisdropped
        order by a.attnum
        "#,
    )
    .bind(Oid(oid))
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(name, data_type, is_nullable)| RawColumn {
            name,
            data_type,
            is_nullable,
        })
        .collect())
}

pub struct RawPrimaryKey {
    pub index_name: String,
    pub definition: Option<String>,
}

pub async fn get_primary_key(pool: &PgPool, oid: u32) -> Result<Option<RawPrimaryKey>> {
    let row = sqlx::query_as::<_, (String, Option<String>)>(
        r#"
        select
          c2.relname::text,
          pg_catalog.pg_get_constraintdef(con.oid, true)
        from pg_catalog.pg_class c
        join pg_catalog.pg_index i on i.indrelid = c.oid
        join pg_catalog.pg_class c2 on c2.oid = i.indexrelid
        left join pg_catalog.pg_constraint con
          on con.conrelid = i.indrelid
         and con.conindid = i.indexrelid
         and con.contype in ('p', 'u', 'x')
        where c.oid = $1
        order by i.indisprimary desc, i.indisunique desc, c2.relname
        limit 1
        "#,
    )
    .bind(Oid(oid))
    .fetch_optional(pool)
    .await
    .map_err(db_error)?;

    Ok(row.map(|(index_name, definition)| RawPrimaryKey {
        index_name,
        definition,
    }))
}

pub struct RawForeignKey {
    pub name: String,
    pub definition: String,
}

pub async fn list_foreign_keys(pool: &PgPool, oid: u32) -> Result<Vec<RawForeignKey>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        select
          r.conname::text,
          pg_catalog.pg_get_constraintdef(r.oid, true)
        from pg_catalog.pg_constraint r
        where r.conrelid = $1
          and r.contype = 'f'
        order by 1
        "#,
    )
    .bind(Oid(oid))
    .fetch_all(pool)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(name, definition)| RawForeignKey { name, definition })
        .collect())
}
