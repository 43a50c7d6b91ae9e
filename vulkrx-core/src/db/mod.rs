pub mod models;
pub mod operations;

use anyhow::{Context, Result, bail};
use log::{debug, info};
use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::db::models::ColumnInfo;

/// File name of the on-device database.
pub const DB_FILE_NAME: &str = "vulkrx.db";

/// Path understood by [`open_pool`] as a private in-memory database.
pub const MEMORY_DB_PATH: &str = ":memory:";

pub fn default_db_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(DB_FILE_NAME)
}

/// Opens the database at `path`, creating the file if it is absent.
pub async fn open_pool(path: &str) -> Result<SqlitePool> {
    if path == MEMORY_DB_PATH {
        // Every connection to :memory: is a fresh database, so pin the pool to one.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database");
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(5000));

    debug!("Opening database at {}", path);
    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database at {}", path))
}

pub async fn clear_workouts(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM workouts").execute(pool).await?;
    Ok(())
}

struct Migration {
    name: &'static str,
    up_sql: &'static str,
}

const MIGRATION_2025_10_14_000000_0000_CREATE_WORKOUTS: &str =
    include_str!("../../../migrations/2025-10-14-000000-0000_create_workouts/up.sql");

const MIGRATIONS: &[Migration] = &[Migration {
    name: "2025-10-14-000000-0000_create_workouts",
    up_sql: MIGRATION_2025_10_14_000000_0000_CREATE_WORKOUTS,
}];

async fn init_migrations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER NOT NULL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER))
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn is_migration_applied(pool: &SqlitePool, migration_name: &str) -> Result<bool> {
    let result =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _migrations WHERE name = ?1")
            .bind(migration_name)
            .fetch_one(pool)
            .await?;
    Ok(result > 0)
}

fn parse_sql_statements(sql: &str) -> Vec<String> {
    sql.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("--")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Brings the schema up to date. Safe to call on every launch.
pub async fn init_database(pool: &SqlitePool) -> Result<()> {
    init_migrations_table(pool).await?;

    for migration in MIGRATIONS {
        if is_migration_applied(pool, migration.name).await? {
            debug!("Migration {} already applied, skipping", migration.name);
            continue;
        }

        info!("Applying migration: {}", migration.name);
        let mut tx = pool.begin().await?;

        for statement in parse_sql_statements(migration.up_sql) {
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .with_context(|| {
                    format!(
                        "Failed to execute migration statement in {}: {}",
                        migration.name, statement
                    )
                })?;
        }

        sqlx::query("INSERT INTO _migrations (name) VALUES (?1)")
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        info!("Migration {} applied successfully", migration.name);
    }

    Ok(())
}

fn check_identifier(name: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("Invalid table name: {:?}", name);
    }
    Ok(())
}

pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
    )
    .bind(table)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Column layout of `table`, in declaration order.
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<ColumnInfo>> {
    check_identifier(table)?;
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            Ok(ColumnInfo {
                name: row.try_get("name")?,
                decl_type: row.try_get("type")?,
                not_null: row.try_get::<i64, _>("notnull")? != 0,
                primary_key: row.try_get::<i64, _>("pk")? != 0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        open_pool(MEMORY_DB_PATH).await.unwrap()
    }

    #[tokio::test]
    async fn init_twice_leaves_one_workouts_table() {
        let pool = memory_pool().await;
        init_database(&pool).await.unwrap();
        init_database(&pool).await.unwrap();

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'workouts'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);

        let applied = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[tokio::test]
    async fn workouts_columns_and_nullability() {
        let pool = memory_pool().await;
        init_database(&pool).await.unwrap();

        let columns = table_columns(&pool, "workouts").await.unwrap();
        let layout: Vec<(&str, &str, bool)> = columns
            .iter()
            .map(|c| (c.name.as_str(), c.decl_type.as_str(), c.not_null))
            .collect();
        assert_eq!(
            layout,
            vec![
                ("id", "INTEGER", true),
                ("name", "TEXT", true),
                ("sets", "INTEGER", false),
                ("reps", "INTEGER", false),
                ("weight", "REAL", false),
            ]
        );
        assert!(columns[0].primary_key);
        assert!(columns[1..].iter().all(|c| !c.primary_key));
    }

    #[tokio::test]
    async fn init_accepts_table_created_without_bookkeeping() {
        let pool = memory_pool().await;
        sqlx::query(
            "CREATE TABLE workouts (
                id INTEGER PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                sets INTEGER,
                reps INTEGER,
                weight REAL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO workouts (name) VALUES ('Squat')")
            .execute(&pool)
            .await
            .unwrap();

        init_database(&pool).await.unwrap();

        let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM workouts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_db_path(dir.path());
        let path = path.to_str().unwrap();

        let pool = open_pool(path).await.unwrap();
        init_database(&pool).await.unwrap();
        pool.close().await;

        assert!(dir.path().join(DB_FILE_NAME).exists());

        let pool = open_pool(path).await.unwrap();
        init_database(&pool).await.unwrap();
        assert!(table_exists(&pool, "workouts").await.unwrap());
    }

    #[tokio::test]
    async fn open_fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DB_FILE_NAME);
        assert!(open_pool(path.to_str().unwrap()).await.is_err());
    }

    #[tokio::test]
    async fn table_columns_rejects_bad_identifiers() {
        let pool = memory_pool().await;
        assert!(table_columns(&pool, "workouts; DROP TABLE x").await.is_err());
    }

    #[test]
    fn statements_skip_comments() {
        let statements = parse_sql_statements("-- header\nCREATE TABLE a (x);\n\nCREATE TABLE b (y);\n");
        assert_eq!(statements, vec!["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
    }
}
