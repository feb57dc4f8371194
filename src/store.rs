//! Database lifecycle: create the database when missing, open the pool, bootstrap tables.

use crate::config::{DatabaseSettings, DocumentKind};
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::time::Duration;

/// Create the configured database if it does not exist, via the `postgres` maintenance database.
pub async fn ensure_database_exists(opts: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = opts.get_database().unwrap_or("").to_string();
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn = opts.clone().database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Open the connection pool. Closed by the caller on shutdown.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, AppError> {
    let opts = settings.connect_options()?;
    ensure_database_exists(&opts).await?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(opts)
        .await?;
    Ok(pool)
}

fn document_table_ddl(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'incomplete',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            created_by TEXT,
            updated_by TEXT,
            file_name TEXT,
            file_data BYTEA
        )
        "#,
        quote_ident(table)
    )
}

const FIXED_TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL,
        full_name TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS drivers (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        license_number TEXT NOT NULL,
        vehicle_assigned TEXT,
        status TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id TEXT PRIMARY KEY,
        type TEXT NOT NULL,
        plate_number TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Active'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS routes (
        id TEXT PRIMARY KEY,
        address TEXT NOT NULL,
        drop_point TEXT NOT NULL
    )
    "#,
];

/// Create every table the API touches. Idempotent; existing tables are left as they are.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in FIXED_TABLES_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    for kind in DocumentKind::ALL {
        sqlx::query(&document_table_ddl(kind.table_name()))
            .execute(pool)
            .await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_tables_share_one_shape() {
        let ddl = document_table_ddl("item_activity_logs");
        assert!(ddl.contains("CREATE TABLE IF NOT EXISTS \"item_activity_logs\""));
        assert!(ddl.contains("status TEXT NOT NULL DEFAULT 'incomplete'"));
        assert!(ddl.contains("file_data BYTEA"));
    }

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quote_ident("logistics"), "\"logistics\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
