//! Workout record operations.

use crate::db::models::{NewWorkoutRecord, WorkoutRecord};
use crate::db::operations::{
    count_workout_records, create_workout_record, delete_workout_record,
    get_all_workout_records, get_workout_record,
};
use crate::entry::parse_workout_entry;
use crate::session::Session;
use anyhow::Result;
use log::debug;

impl Session {
    pub async fn add_workout(&self, record: &NewWorkoutRecord) -> Result<WorkoutRecord> {
        let created = create_workout_record(&self.db_pool, record).await?;
        debug!("Added workout record {}: {}", created.id, created);
        Ok(created)
    }

    /// Parse a line like `"Squat 5x5 @100kg"` and store it.
    pub async fn add_workout_from_string(&self, input: &str) -> Result<WorkoutRecord> {
        let record = parse_workout_entry(input)?;
        self.add_workout(&record).await
    }

    pub async fn get_workout(&self, id: i64) -> Result<WorkoutRecord> {
        get_workout_record(&self.db_pool, id).await
    }

    /// All records, oldest first.
    pub async fn get_all_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        get_all_workout_records(&self.db_pool).await
    }

    pub async fn count_workouts(&self) -> Result<usize> {
        let count = count_workout_records(&self.db_pool).await?;
        Ok(usize::try_from(count)?)
    }

    pub async fn delete_workout(&self, id: i64) -> Result<u64> {
        delete_workout_record(&self.db_pool, id).await
    }
}
