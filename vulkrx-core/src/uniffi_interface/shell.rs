use std::sync::Arc;

use log::debug;
use tokio::sync::Mutex;

use crate::db::models::NewWorkoutRecord;
use crate::navigation::Route;
use crate::shell::{Shell, View};
use crate::uniffi_interface::errors::VulkrxError;
use crate::uniffi_interface::objects::WorkoutRecord;

/// The app shell as seen from the native host. Mounting blocks until the
/// database is ready or has failed, so the host can render straight away.
#[derive(uniffi::Object)]
pub struct MobileShell {
    shell: Mutex<Shell>,
}

#[uniffi::export]
impl MobileShell {
    #[uniffi::constructor]
    pub fn mount(db_path: String) -> Arc<Self> {
        let rt = crate::runtime::init_global_runtime_blocking();
        let shell = rt.block_on(Shell::mount(&db_path));
        Arc::new(Self {
            shell: Mutex::new(shell),
        })
    }

    pub fn is_ready(&self) -> bool {
        self.shell.blocking_lock().is_ready()
    }

    /// Active screen, or `None` when the shell is showing an error.
    pub fn view_route(&self) -> Option<Route> {
        match self.shell.blocking_lock().view() {
            View::Screen(route) => Some(route),
            View::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.shell.blocking_lock().error().map(str::to_string)
    }

    pub fn navigate(&self, route: Route) -> Result<bool, VulkrxError> {
        debug!("Host requested navigation to {}", route);
        Ok(self.shell.blocking_lock().navigate(route)?)
    }

    pub fn go_back(&self) -> Result<bool, VulkrxError> {
        Ok(self.shell.blocking_lock().go_back()?)
    }

    pub fn add_workout(
        &self,
        name: String,
        sets: Option<i64>,
        reps: Option<i64>,
        weight: Option<f64>,
    ) -> Result<Arc<WorkoutRecord>, VulkrxError> {
        let record = NewWorkoutRecord {
            name,
            sets,
            reps,
            weight,
        };
        let rt = crate::runtime::init_global_runtime_blocking();
        let created = rt.block_on(async {
            let shell = self.shell.lock().await;
            let session = shell.session().ok_or_else(|| not_ready(&shell))?;
            session.add_workout(&record).await
        })?;
        Ok(Arc::new(created.into()))
    }

    pub fn add_workout_from_string(
        &self,
        input: String,
    ) -> Result<Arc<WorkoutRecord>, VulkrxError> {
        let rt = crate::runtime::init_global_runtime_blocking();
        let created = rt.block_on(async {
            let shell = self.shell.lock().await;
            let session = shell.session().ok_or_else(|| not_ready(&shell))?;
            session.add_workout_from_string(&input).await
        })?;
        Ok(Arc::new(created.into()))
    }

    pub fn list_workouts(&self) -> Result<Vec<Arc<WorkoutRecord>>, VulkrxError> {
        let rt = crate::runtime::init_global_runtime_blocking();
        let records = rt.block_on(async {
            let shell = self.shell.lock().await;
            let session = shell.session().ok_or_else(|| not_ready(&shell))?;
            session.get_all_workouts().await
        })?;
        Ok(records
            .into_iter()
            .map(|r| Arc::new(WorkoutRecord::from(r)))
            .collect())
    }

    pub fn delete_workout(&self, id: i64) -> Result<u64, VulkrxError> {
        let rt = crate::runtime::init_global_runtime_blocking();
        let deleted = rt.block_on(async {
            let shell = self.shell.lock().await;
            let session = shell.session().ok_or_else(|| not_ready(&shell))?;
            session.delete_workout(id).await
        })?;
        Ok(deleted)
    }
}

fn not_ready(shell: &Shell) -> anyhow::Error {
    anyhow::anyhow!(
        "Shell failed to start: {}",
        shell.error().unwrap_or("unknown error")
    )
}
