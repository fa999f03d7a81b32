//! Page controllers.
//!
//! Each page fetches what it needs on mount, owns its dialog state and busy
//! flags, and re-fetches the authoritative data after every successful
//! mutation instead of patching local state.

pub mod dashboard;
pub mod plan_sessions;
pub mod session_exercises;

use std::sync::Arc;

use workout_api::WorkoutApi;

use crate::navigation::{Navigator, Route};
use crate::notify::Notifier;

pub use dashboard::{DashboardPage, PlanDialog};
pub use plan_sessions::{PlanSessionsPage, SessionDialog};
pub use session_exercises::SessionExercisesPage;

/// Collaborators shared by every page.
#[derive(Clone)]
pub struct PageContext {
    pub api: Arc<dyn WorkoutApi>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl PageContext {
    pub fn new(
        api: Arc<dyn WorkoutApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
        }
    }

    pub(crate) fn redirect(&self, route: Route) {
        tracing::debug!(%route, "redirecting");
        self.navigator.navigate(route);
    }
}

/// Confirmation prompt shown before deleting `name`.
pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete \"{name}\"? This action cannot be undone.")
}
