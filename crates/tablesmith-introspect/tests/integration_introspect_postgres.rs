use anyhow::{Context, Result, anyhow};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use tablesmith_introspect::{Introspector, PostgresCatalog};

const FIXTURE: &str = r#"
drop table if exists ts_orders;
drop table if exists ts_users;
create table ts_users (
  id bigserial primary key,
  email text not null,
  score double precision
);
create table ts_orders (
  id bigserial primary key,
  user_id bigint not null references ts_users(id),
  quantity integer not null,
  note text
)
"#;

fn database_url() -> Result<String> {
    env::var("TEST_DATABASE_URL").context("set TEST_DATABASE_URL for integration tests")
}

async fn reset_fixture(pool: &PgPool) -> Result<()> {
    for statement in FIXTURE.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("executing fixture statement {sql}"))?;
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires a live Postgres at TEST_DATABASE_URL"]
async fn describes_tables_from_postgres_catalog() -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(&database_url()?)
        .await
        .context("connecting to Postgres")?;
    reset_fixture(&pool).await?;

    let introspector = Introspector::new(PostgresCatalog::new(pool));
    let tables = introspector.list_tables().await;
    assert!(tables.iter().any(|name| name == "ts_orders"));

    let orders = introspector.describe_table("ts_orders").await?;
    let columns: Vec<(&str, &str, bool)> = orders
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.data_type.as_str(), c.is_nullable))
        .collect();
    assert_eq!(
        columns,
        vec![
            ("id", "bigint", false),
            ("user_id", "bigint", false),
            ("quantity", "integer", false),
            ("note", "text", true),
        ]
    );

    let pk = orders
        .primary_key
        .as_ref()
        .ok_or_else(|| anyhow!("primary key missing"))?;
    assert_eq!(pk.name, "ts_orders_pkey");
    assert_eq!(pk.definition.as_deref(), Some("PRIMARY KEY (id)"));

    assert_eq!(orders.foreign_keys.len(), 1);
    assert_eq!(
        orders.foreign_keys[0].definition,
        "FOREIGN KEY (user_id) REFERENCES ts_users(id)"
    );
    Ok(())
}
