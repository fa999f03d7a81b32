//! Client routes and the navigation seam.

use std::fmt;
use std::sync::Mutex;

/// A view the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    PlanSessions { plan_id: i64 },
    SessionExercises { plan_id: i64, session_id: i64 },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/login"),
            Self::Dashboard => f.write_str("/dashboard"),
            Self::PlanSessions { plan_id } => write!(f, "/plans/{plan_id}/sessions"),
            Self::SessionExercises {
                plan_id,
                session_id,
            } => write!(f, "/plans/{plan_id}/sessions/{session_id}/exercises"),
        }
    }
}

/// Receives navigation requests (redirects, forced logout).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Remembers every requested route.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recent navigation, if any.
    pub fn last(&self) -> Option<Route> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_paths() {
        assert_eq!(Route::Login.to_string(), "/login");
        assert_eq!(Route::Dashboard.to_string(), "/dashboard");
        assert_eq!(
            Route::PlanSessions { plan_id: 3 }.to_string(),
            "/plans/3/sessions"
        );
        assert_eq!(
            Route::SessionExercises {
                plan_id: 3,
                session_id: 9
            }
            .to_string(),
            "/plans/3/sessions/9/exercises"
        );
    }

    #[test]
    fn recording_navigator_keeps_history() {
        let nav = RecordingNavigator::new();
        assert_eq!(nav.last(), None);
        nav.navigate(Route::Dashboard);
        nav.navigate(Route::Login);
        assert_eq!(nav.history(), vec![Route::Dashboard, Route::Login]);
        assert_eq!(nav.last(), Some(Route::Login));
    }
}
