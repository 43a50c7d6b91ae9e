//! Route stack shared by every front end.
//!
//! The app registers two screens, `Home` and `Workout`. Screens request
//! transitions; the [`Navigator`] only tracks which one is on top.

use anyhow::{Result, anyhow};
use log::debug;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Route {
    Home,
    Workout,
}

impl Route {
    /// Every registered route, in declaration order.
    pub const ALL: [Route; 2] = [Route::Home, Route::Workout];

    pub const INITIAL: Route = Route::Home;

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Workout => "Workout",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Route::ALL
            .into_iter()
            .find(|route| route.name() == s)
            .ok_or_else(|| anyhow!("Unknown route: {:?}", s))
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::INITIAL)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn current(&self) -> Route {
        // The stack is never empty: go_back refuses to pop the root.
        self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Makes `route` active. If it is already on the stack, everything
    /// above it is popped; otherwise it is pushed. Returns whether the
    /// active screen changed.
    pub fn navigate(&mut self, route: Route) -> bool {
        let from = self.current();
        if from == route {
            debug!("Already on {}, ignoring navigate", route);
            return false;
        }
        match self.stack.iter().position(|r| *r == route) {
            Some(idx) => {
                debug!("Navigating {} -> {} (popping to existing entry)", from, route);
                self.stack.truncate(idx + 1);
            }
            None => {
                debug!("Navigating {} -> {}", from, route);
                self.stack.push(route);
            }
        }
        true
    }

    pub fn navigate_by_name(&mut self, name: &str) -> Result<bool> {
        let route = name.parse::<Route>()?;
        Ok(self.navigate(route))
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Pops the active screen. At the root this does nothing and returns `false`.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        let left = self.stack.pop();
        debug!("Back from {:?} to {}", left, self.current());
        true
    }

    pub fn reset(&mut self, route: Route) {
        self.stack.clear();
        self.stack.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_home() {
        let nav = Navigator::default();
        assert_eq!(nav.current(), Route::Home);
        assert_eq!(nav.depth(), 1);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn home_to_workout_and_back() {
        let mut nav = Navigator::default();
        assert!(nav.navigate(Route::Workout));
        assert_eq!(nav.current(), Route::Workout);
        assert!(nav.go_back());
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn navigate_to_active_route_is_noop() {
        let mut nav = Navigator::default();
        assert!(!nav.navigate(Route::Home));
        assert_eq!(nav.depth(), 1);

        nav.navigate(Route::Workout);
        assert!(!nav.navigate(Route::Workout));
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn navigate_to_earlier_route_pops_back() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Workout);
        assert!(nav.navigate(Route::Home));
        assert_eq!(nav.current(), Route::Home);
        assert_eq!(nav.depth(), 1);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn alternating_routes_keep_stack_bounded() {
        let mut nav = Navigator::default();
        for _ in 0..50 {
            assert!(nav.navigate(Route::Workout));
            assert!(nav.navigate(Route::Home));
        }
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current(), Route::Home);

        nav.navigate(Route::Workout);
        assert_eq!(nav.depth(), 2);
        assert!(nav.go_back());
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn navigate_from_workout_root_pushes_home() {
        let mut nav = Navigator::new(Route::Workout);
        assert!(nav.navigate(Route::Home));
        assert_eq!(nav.depth(), 2);
        assert!(nav.go_back());
        assert_eq!(nav.current(), Route::Workout);
    }

    #[test]
    fn back_at_root_keeps_home() {
        let mut nav = Navigator::default();
        assert!(!nav.go_back());
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn navigate_by_name() {
        let mut nav = Navigator::default();
        assert!(nav.navigate_by_name("Workout").unwrap());
        assert_eq!(nav.current(), Route::Workout);
        assert!(nav.navigate_by_name("Settings").is_err());
        assert_eq!(nav.current(), Route::Workout);
    }

    #[test]
    fn reset_replaces_stack() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Workout);
        nav.reset(Route::Home);
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn route_names_round_trip() {
        for route in Route::ALL {
            assert_eq!(route.name().parse::<Route>().unwrap(), route);
        }
    }
}
