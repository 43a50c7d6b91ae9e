use crate::db;

#[derive(uniffi::Object)]
pub struct WorkoutRecord {
    pub id: i64,
    pub name: String,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}

#[uniffi::export]
impl WorkoutRecord {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> String {
        self.name.clone()
    }

    pub fn sets(&self) -> Option<i64> {
        self.sets
    }

    pub fn reps(&self) -> Option<i64> {
        self.reps
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Single-line summary, e.g. `Bench Press: 3 x 10 reps @ 60.0kg`.
    pub fn label(&self) -> String {
        db::models::WorkoutRecord::from(self).to_string()
    }
}

impl From<db::models::WorkoutRecord> for WorkoutRecord {
    fn from(r: db::models::WorkoutRecord) -> Self {
        WorkoutRecord {
            id: r.id,
            name: r.name,
            sets: r.sets,
            reps: r.reps,
            weight: r.weight,
        }
    }
}

impl From<&WorkoutRecord> for db::models::WorkoutRecord {
    fn from(r: &WorkoutRecord) -> Self {
        db::models::WorkoutRecord {
            id: r.id,
            name: r.name.clone(),
            sets: r.sets,
            reps: r.reps,
            weight: r.weight,
        }
    }
}
