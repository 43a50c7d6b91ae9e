use anyhow::{Result, anyhow};
use sqlx::SqlitePool;

use crate::db::models::{NewWorkoutRecord, WorkoutRecord};

pub async fn create_workout_record(
    pool: &SqlitePool,
    record: &NewWorkoutRecord,
) -> Result<WorkoutRecord> {
    sqlx::query_as::<_, WorkoutRecord>(
        "INSERT INTO workouts (name, sets, reps, weight)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, name, sets, reps, weight",
    )
    .bind(&record.name)
    .bind(record.sets)
    .bind(record.reps)
    .bind(record.weight)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_workout_record(pool: &SqlitePool, id: i64) -> Result<WorkoutRecord> {
    sqlx::query_as::<_, WorkoutRecord>(
        "SELECT id, name, sets, reps, weight FROM workouts WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| anyhow!("Workout record {} not found", id))
}

pub async fn get_all_workout_records(pool: &SqlitePool) -> Result<Vec<WorkoutRecord>> {
    sqlx::query_as::<_, WorkoutRecord>(
        "SELECT id, name, sets, reps, weight FROM workouts ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn count_workout_records(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM workouts")
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

pub async fn delete_workout_record(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
