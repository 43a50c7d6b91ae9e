//! Application shell: storage bootstrap followed by the route stack.
//!
//! Mounting awaits database initialization. Screens are only reachable once
//! that succeeded; otherwise the shell stays in an error state and renders
//! the failure instead.

use anyhow::{Result, anyhow};
use log::{error, info};

use crate::navigation::{Navigator, Route};
use crate::session::Session;

enum ShellState {
    Ready {
        session: Session,
        navigator: Navigator,
    },
    Failed(String),
}

/// What a front end should draw right now.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Screen(Route),
    Error(String),
}

pub struct Shell {
    state: ShellState,
}

impl Shell {
    /// Opens the database at `db_path`, runs initialization once, and
    /// starts on [`Route::INITIAL`] if that succeeded.
    pub async fn mount(db_path: &str) -> Self {
        match Session::new(db_path).await {
            Ok(session) => {
                info!("Shell mounted, starting on {}", Route::INITIAL);
                Self::with_session(session)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!("Database initialization failed: {}", message);
                Self {
                    state: ShellState::Failed(message),
                }
            }
        }
    }

    /// Wraps an already initialized session.
    pub fn with_session(session: Session) -> Self {
        Self {
            state: ShellState::Ready {
                session,
                navigator: Navigator::new(Route::INITIAL),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ShellState::Ready { .. })
    }

    pub fn view(&self) -> View {
        match &self.state {
            ShellState::Ready { navigator, .. } => View::Screen(navigator.current()),
            ShellState::Failed(message) => View::Error(message.clone()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ShellState::Failed(message) => Some(message),
            ShellState::Ready { .. } => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            ShellState::Ready { session, .. } => Some(session),
            ShellState::Failed(_) => None,
        }
    }

    pub fn navigator(&self) -> Option<&Navigator> {
        match &self.state {
            ShellState::Ready { navigator, .. } => Some(navigator),
            ShellState::Failed(_) => None,
        }
    }

    fn navigator_mut(&mut self) -> Result<&mut Navigator> {
        match &mut self.state {
            ShellState::Ready { navigator, .. } => Ok(navigator),
            ShellState::Failed(message) => {
                Err(anyhow!("Shell failed to start: {}", message))
            }
        }
    }

    pub fn navigate(&mut self, route: Route) -> Result<bool> {
        Ok(self.navigator_mut()?.navigate(route))
    }

    pub fn navigate_by_name(&mut self, name: &str) -> Result<bool> {
        self.navigator_mut()?.navigate_by_name(name)
    }

    pub fn go_back(&mut self) -> Result<bool> {
        Ok(self.navigator_mut()?.go_back())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DB_FILE_NAME, MEMORY_DB_PATH, default_db_path};

    #[tokio::test]
    async fn mount_renders_home() {
        let shell = Shell::mount(MEMORY_DB_PATH).await;
        assert!(shell.is_ready());
        assert_eq!(shell.view(), View::Screen(Route::Home));
        assert_eq!(shell.navigator().unwrap().depth(), 1);
    }

    #[tokio::test]
    async fn workout_and_back() {
        let mut shell = Shell::mount(MEMORY_DB_PATH).await;
        assert!(shell.navigate(Route::Workout).unwrap());
        assert_eq!(shell.view(), View::Screen(Route::Workout));
        assert!(shell.go_back().unwrap());
        assert_eq!(shell.view(), View::Screen(Route::Home));
    }

    #[tokio::test]
    async fn init_runs_only_at_mount() {
        let mut shell = Shell::mount(MEMORY_DB_PATH).await;
        let pool = shell.session().unwrap().db_pool.clone();

        // Forget the schema entirely: any later init would recreate it.
        sqlx::query("DROP TABLE workouts").execute(&pool).await.unwrap();
        sqlx::query("DELETE FROM _migrations").execute(&pool).await.unwrap();

        for _ in 0..3 {
            assert_eq!(shell.view(), View::Screen(Route::Home));
            shell.navigate(Route::Workout).unwrap();
            shell.navigate(Route::Home).unwrap();
            shell.navigate(Route::Workout).unwrap();
            shell.go_back().unwrap();
        }

        assert!(!crate::db::table_exists(&pool, "workouts").await.unwrap());
        let applied = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(applied, 0);
    }

    #[tokio::test]
    async fn navigate_home_from_workout_returns_to_root() {
        let mut shell = Shell::mount(MEMORY_DB_PATH).await;
        for _ in 0..10 {
            shell.navigate(Route::Workout).unwrap();
            shell.navigate(Route::Home).unwrap();
        }
        assert_eq!(shell.view(), View::Screen(Route::Home));
        assert_eq!(shell.navigator().unwrap().depth(), 1);
        assert!(!shell.go_back().unwrap());
    }

    #[tokio::test]
    async fn workouts_table_exists_before_first_screen() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_db_path(dir.path());
        let shell = Shell::mount(path.to_str().unwrap()).await;

        let session = shell.session().unwrap();
        assert!(crate::db::table_exists(&session.db_pool, "workouts").await.unwrap());
        assert!(dir.path().join(DB_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn unopenable_database_renders_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join(DB_FILE_NAME);
        let mut shell = Shell::mount(path.to_str().unwrap()).await;

        assert!(!shell.is_ready());
        assert!(matches!(shell.view(), View::Error(_)));
        assert!(shell.error().is_some());
        assert!(shell.session().is_none());
        assert!(shell.navigate(Route::Workout).is_err());
        assert!(shell.go_back().is_err());
    }

    #[tokio::test]
    async fn unknown_route_name_is_rejected() {
        let mut shell = Shell::mount(MEMORY_DB_PATH).await;
        assert!(shell.navigate_by_name("Profile").is_err());
        assert_eq!(shell.view(), View::Screen(Route::Home));
    }
}
