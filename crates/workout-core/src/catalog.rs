//! Read-only exercise catalog backing the editor's selection and labels.

use tracing::{debug, warn};

use workout_api::WorkoutApi;
use workout_api::models::Exercise;

/// Label shown when a line item's exercise id matches nothing in the catalog.
pub const PLACEHOLDER_NAME: &str = "Select exercise";

/// The fetched catalog plus its loading flag.
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
    loading: bool,
}

impl ExerciseCatalog {
    /// A catalog whose fetch has not completed yet.
    pub fn pending() -> Self {
        Self {
            exercises: Vec::new(),
            loading: true,
        }
    }

    pub fn from_exercises(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises,
            loading: false,
        }
    }

    /// Fetch the full catalog once.
    ///
    /// A failed fetch yields an empty, loaded catalog. Nothing is surfaced
    /// here; user-facing reporting is the interceptor's job.
    pub async fn load(api: &dyn WorkoutApi) -> Self {
        match api.list_exercises().await {
            Ok(exercises) => {
                debug!(count = exercises.len(), "exercise catalog loaded");
                Self::from_exercises(exercises)
            }
            Err(e) => {
                warn!(error = %e, "exercise catalog unavailable");
                Self::from_exercises(Vec::new())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn find(&self, exercise_id: i64) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    /// Display name for `exercise_id`, or [`PLACEHOLDER_NAME`].
    pub fn name(&self, exercise_id: i64) -> &str {
        self.find(exercise_id)
            .map(|e| e.name.as_str())
            .unwrap_or(PLACEHOLDER_NAME)
    }

    pub fn category(&self, exercise_id: i64) -> Option<&str> {
        self.find(exercise_id)
            .map(|e| e.category.as_str())
            .filter(|c| !c.is_empty())
    }
}
