//! Sessions scheduled under one plan.

use chrono::NaiveDate;
use tracing::{info, warn};

use workout_api::models::{WorkoutPlan, WorkoutSession};

use super::PageContext;
use crate::forms::SessionForm;
use crate::navigation::Route;

/// State of the create/edit session dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionDialog {
    #[default]
    Closed,
    Create,
    Edit(WorkoutSession),
}

pub struct PlanSessionsPage {
    ctx: PageContext,
    plan_id: i64,
    plan: Option<WorkoutPlan>,
    sessions: Vec<WorkoutSession>,
    is_loading: bool,
    dialog: SessionDialog,
    pending_delete: Option<WorkoutSession>,
    is_deleting: bool,
}

impl PlanSessionsPage {
    pub fn new(ctx: PageContext, plan_id: i64) -> Self {
        Self {
            ctx,
            plan_id,
            plan: None,
            sessions: Vec::new(),
            is_loading: true,
            dialog: SessionDialog::Closed,
            pending_delete: None,
            is_deleting: false,
        }
    }

    pub fn plan_id(&self) -> i64 {
        self.plan_id
    }

    pub fn plan(&self) -> Option<&WorkoutPlan> {
        self.plan.as_ref()
    }

    pub fn sessions(&self) -> &[WorkoutSession] {
        &self.sessions
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    pub fn dialog(&self) -> &SessionDialog {
        &self.dialog
    }

    pub fn pending_delete(&self) -> Option<&WorkoutSession> {
        self.pending_delete.as_ref()
    }

    pub fn find_session(&self, session_id: i64) -> Option<&WorkoutSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Load the plan and its sessions. Returns `false` if the page
    /// redirected to the dashboard instead.
    pub async fn mount(&mut self) -> bool {
        self.fetch_data().await
    }

    pub async fn fetch_data(&mut self) -> bool {
        let api = &self.ctx.api;
        let result = futures::try_join!(api.get_plan(self.plan_id), api.list_sessions(self.plan_id));
        self.is_loading = false;
        match result {
            Ok((plan, sessions)) => {
                self.plan = Some(plan);
                self.sessions = sessions;
                true
            }
            Err(e) => {
                warn!(error = %e, plan_id = self.plan_id, "failed to load plan sessions");
                self.ctx.redirect(Route::Dashboard);
                false
            }
        }
    }

    // -- create / edit ----------------------------------------------------

    pub fn open_create(&mut self) {
        self.dialog = SessionDialog::Create;
    }

    pub fn open_edit(&mut self, session: WorkoutSession) {
        self.dialog = SessionDialog::Edit(session);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = SessionDialog::Closed;
    }

    /// Form contents the dialog opens with; new sessions default to `today`.
    pub fn form(&self, today: NaiveDate) -> SessionForm {
        match &self.dialog {
            SessionDialog::Edit(session) => SessionForm::from_session(session),
            _ => SessionForm::new(today),
        }
    }

    /// Submit the open dialog, then refetch.
    ///
    /// Editing keeps the session's existing line items; creating starts
    /// with none. Returns `true` on success, which also closes the dialog.
    pub async fn submit(&mut self, form: &SessionForm) -> bool {
        let exercises = match &self.dialog {
            SessionDialog::Edit(session) => session.exercise_inputs(),
            _ => Vec::new(),
        };
        let input = match form.to_input(self.plan_id, exercises) {
            Ok(input) => input,
            Err(e) => {
                self.ctx.notifier.error(&e.to_string());
                return false;
            }
        };

        let result = match &self.dialog {
            SessionDialog::Edit(session) => self
                .ctx
                .api
                .update_session(session.id, &input)
                .await
                .map(|s| (s, "Session updated successfully")),
            _ => self
                .ctx
                .api
                .create_session(&input)
                .await
                .map(|s| (s, "Session created successfully")),
        };

        match result {
            Ok((session, message)) => {
                info!(session_id = session.id, plan_id = self.plan_id, "session saved");
                self.ctx.notifier.success(message);
                self.dialog = SessionDialog::Closed;
                self.fetch_data().await;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to save session");
                false
            }
        }
    }

    // -- delete -----------------------------------------------------------

    pub fn request_delete(&mut self, session: WorkoutSession) {
        self.pending_delete = Some(session);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(session) = self.pending_delete.clone() else {
            return false;
        };
        if self.is_deleting {
            return false;
        }
        self.is_deleting = true;
        let ok = match self.ctx.api.delete_session(session.id).await {
            Ok(()) => {
                info!(session_id = session.id, "session deleted");
                self.ctx.notifier.success("Session deleted successfully");
                self.pending_delete = None;
                self.fetch_data().await;
                true
            }
            Err(e) => {
                warn!(error = %e, session_id = session.id, "failed to delete session");
                false
            }
        };
        self.is_deleting = false;
        ok
    }

    // -- navigation -------------------------------------------------------

    pub fn open_exercises(&self, session_id: i64) {
        self.ctx.redirect(Route::SessionExercises {
            plan_id: self.plan_id,
            session_id,
        });
    }

    pub fn back(&self) {
        self.ctx.redirect(Route::Dashboard);
    }
}
