//! Exercise assignment for one session: hosts the list editor and saves it.

use tracing::{info, warn};

use workout_api::models::{SessionExerciseInput, WorkoutPlan, WorkoutSession, WorkoutSessionInput};

use super::PageContext;
use crate::catalog::ExerciseCatalog;
use crate::editor::ExerciseListEditor;
use crate::navigation::Route;
use crate::validation::validate_exercise_selection;

pub struct SessionExercisesPage {
    ctx: PageContext,
    plan_id: i64,
    session_id: i64,
    plan: Option<WorkoutPlan>,
    session: Option<WorkoutSession>,
    exercises: Vec<SessionExerciseInput>,
    catalog: ExerciseCatalog,
    is_loading: bool,
    is_saving: bool,
}

impl SessionExercisesPage {
    pub fn new(ctx: PageContext, plan_id: i64, session_id: i64) -> Self {
        Self {
            ctx,
            plan_id,
            session_id,
            plan: None,
            session: None,
            exercises: Vec::new(),
            catalog: ExerciseCatalog::pending(),
            is_loading: true,
            is_saving: false,
        }
    }

    pub fn plan(&self) -> Option<&WorkoutPlan> {
        self.plan.as_ref()
    }

    pub fn session(&self) -> Option<&WorkoutSession> {
        self.session.as_ref()
    }

    /// The unsaved line items, in order.
    pub fn exercises(&self) -> &[SessionExerciseInput] {
        &self.exercises
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// Borrow the line items for editing.
    pub fn editor(&mut self) -> ExerciseListEditor<'_> {
        ExerciseListEditor::new(&mut self.exercises)
    }

    /// Load plan, session, and then the editor's catalog.
    ///
    /// Redirects to the plan's session list if the session does not exist,
    /// or to the dashboard if fetching fails. Returns `false` on redirect.
    pub async fn mount(&mut self) -> bool {
        if !self.fetch_data().await {
            return false;
        }
        self.catalog = ExerciseCatalog::load(self.ctx.api.as_ref()).await;
        true
    }

    async fn fetch_data(&mut self) -> bool {
        let api = &self.ctx.api;
        let result = futures::try_join!(api.get_plan(self.plan_id), api.list_sessions(self.plan_id));
        self.is_loading = false;

        let (plan, sessions) = match result {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, plan_id = self.plan_id, "failed to load session");
                self.ctx.redirect(Route::Dashboard);
                return false;
            }
        };
        self.plan = Some(plan);

        match sessions.into_iter().find(|s| s.id == self.session_id) {
            Some(session) => {
                self.exercises = session.exercise_inputs();
                self.session = Some(session);
                true
            }
            None => {
                warn!(
                    plan_id = self.plan_id,
                    session_id = self.session_id,
                    "session not found in plan"
                );
                self.ctx.redirect(Route::PlanSessions {
                    plan_id: self.plan_id,
                });
                false
            }
        }
    }

    /// Persist the edited line items.
    ///
    /// Rejected locally, with a single notification and no request, when
    /// any item has no exercise selected. Returns `true` on success.
    pub async fn save(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        if self.is_saving {
            return false;
        }
        if let Err(e) = validate_exercise_selection(&self.exercises) {
            self.ctx.notifier.error(&e.to_string());
            return false;
        }

        let input = WorkoutSessionInput {
            name: session.name.clone(),
            notes: session.notes.clone(),
            workout_date: session.workout_date,
            status: session.status,
            workout_plan_id: self.plan_id,
            session_exercises: self.exercises.clone(),
        };

        self.is_saving = true;
        let ok = match self.ctx.api.update_session(self.session_id, &input).await {
            Ok(saved) => {
                info!(
                    session_id = saved.id,
                    items = saved.session_exercises.len(),
                    "session exercises saved"
                );
                self.ctx.notifier.success("Exercises saved successfully");
                self.fetch_data().await;
                true
            }
            Err(e) => {
                warn!(error = %e, session_id = self.session_id, "failed to save exercises");
                false
            }
        };
        self.is_saving = false;
        ok
    }

    pub fn back(&self) {
        self.ctx.redirect(Route::PlanSessions {
            plan_id: self.plan_id,
        });
    }
}
