use crate::db;
use crate::db::models::ColumnInfo;
use anyhow::Result;
use log::info;
use sqlx::SqlitePool;

pub struct Session {
    pub db_pool: SqlitePool,
}

impl Session {
    /// Opens `db_path` and brings the schema up to date before returning.
    pub async fn new(db_path: &str) -> Result<Self> {
        let pool = db::open_pool(db_path).await?;

        if let Err(e) = db::init_database(&pool).await {
            pool.close().await;
            return Err(e);
        }

        info!("Database ready at {}", db_path);
        Ok(Self { db_pool: pool })
    }

    pub async fn schema(&self) -> Result<Vec<ColumnInfo>> {
        db::table_columns(&self.db_pool, "workouts").await
    }

    /// Deletes every workout record and re-runs initialization.
    pub async fn reset(&self) -> Result<()> {
        db::clear_workouts(&self.db_pool).await?;
        db::init_database(&self.db_pool).await
    }

    pub async fn close(&self) {
        self.db_pool.close().await;
    }
}
