use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkoutRecord {
    pub id: i64,
    pub name: String,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}

impl fmt::Display for WorkoutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (self.sets, self.reps) {
            (Some(sets), Some(reps)) => write!(f, ": {} x {} reps", sets, reps)?,
            (Some(sets), None) => write!(f, ": {} sets", sets)?,
            (None, Some(reps)) => write!(f, ": {} reps", reps)?,
            (None, None) => {}
        }
        if let Some(weight) = self.weight {
            write!(f, " @ {:.1}kg", weight)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutRecord {
    pub name: String,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}

impl NewWorkoutRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: None,
            reps: None,
            weight: None,
        }
    }
}

/// One row of `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}
