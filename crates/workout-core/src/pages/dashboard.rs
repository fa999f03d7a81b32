//! The plan list.

use tracing::{info, warn};

use workout_api::models::WorkoutPlan;

use super::PageContext;
use crate::forms::PlanForm;

/// State of the create/edit plan dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlanDialog {
    #[default]
    Closed,
    Create,
    Edit(WorkoutPlan),
}

pub struct DashboardPage {
    ctx: PageContext,
    plans: Vec<WorkoutPlan>,
    is_loading: bool,
    dialog: PlanDialog,
    pending_delete: Option<WorkoutPlan>,
    delete_all_open: bool,
    is_deleting: bool,
}

impl DashboardPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            plans: Vec::new(),
            is_loading: true,
            dialog: PlanDialog::Closed,
            pending_delete: None,
            delete_all_open: false,
            is_deleting: false,
        }
    }

    pub fn plans(&self) -> &[WorkoutPlan] {
        &self.plans
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    pub fn dialog(&self) -> &PlanDialog {
        &self.dialog
    }

    pub fn pending_delete(&self) -> Option<&WorkoutPlan> {
        self.pending_delete.as_ref()
    }

    pub fn is_delete_all_open(&self) -> bool {
        self.delete_all_open
    }

    /// "Delete all" is only offered when there is something to delete.
    pub fn can_delete_all(&self) -> bool {
        !self.plans.is_empty()
    }

    pub async fn mount(&mut self) -> bool {
        self.fetch_plans().await
    }

    /// Reload the plan list. A failure keeps the previous list; the
    /// interceptor has already told the user. Returns whether it succeeded.
    pub async fn fetch_plans(&mut self) -> bool {
        let ok = match self.ctx.api.list_plans().await {
            Ok(plans) => {
                self.plans = plans;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to load plans");
                false
            }
        };
        self.is_loading = false;
        ok
    }

    // -- create / edit ----------------------------------------------------

    pub fn open_create(&mut self) {
        self.dialog = PlanDialog::Create;
    }

    pub fn open_edit(&mut self, plan: WorkoutPlan) {
        self.dialog = PlanDialog::Edit(plan);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = PlanDialog::Closed;
    }

    /// Form contents the dialog opens with.
    pub fn form(&self) -> PlanForm {
        match &self.dialog {
            PlanDialog::Edit(plan) => PlanForm::from_plan(plan),
            _ => PlanForm::default(),
        }
    }

    /// Submit the open dialog: create or update, then refetch.
    ///
    /// Returns the plan as the backend saved it; success also closes the
    /// dialog. On failure the dialog stays open and `None` is returned.
    pub async fn submit(&mut self, form: &PlanForm) -> Option<WorkoutPlan> {
        let input = match form.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.ctx.notifier.error(&e.to_string());
                return None;
            }
        };

        let result = match &self.dialog {
            PlanDialog::Edit(plan) => self
                .ctx
                .api
                .update_plan(plan.id, &input)
                .await
                .map(|p| (p, "Updated successfully")),
            _ => self
                .ctx
                .api
                .create_plan(&input)
                .await
                .map(|p| (p, "Created successfully")),
        };

        match result {
            Ok((plan, message)) => {
                info!(plan_id = plan.id, "plan saved");
                self.ctx.notifier.success(message);
                self.dialog = PlanDialog::Closed;
                self.fetch_plans().await;
                Some(plan)
            }
            Err(e) => {
                warn!(error = %e, "failed to save plan");
                None
            }
        }
    }

    // -- delete -----------------------------------------------------------

    pub fn request_delete(&mut self, plan: WorkoutPlan) {
        self.pending_delete = Some(plan);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.delete_all_open = false;
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(plan) = self.pending_delete.clone() else {
            return false;
        };
        if self.is_deleting {
            return false;
        }
        self.is_deleting = true;
        let ok = match self.ctx.api.delete_plan(plan.id).await {
            Ok(()) => {
                info!(plan_id = plan.id, "plan deleted");
                self.ctx.notifier.success("Deleted successfully");
                self.pending_delete = None;
                self.fetch_plans().await;
                true
            }
            Err(e) => {
                warn!(error = %e, plan_id = plan.id, "failed to delete plan");
                false
            }
        };
        self.is_deleting = false;
        ok
    }

    pub fn open_delete_all(&mut self) {
        if self.can_delete_all() {
            self.delete_all_open = true;
        }
    }

    pub async fn confirm_delete_all(&mut self) -> bool {
        if !self.delete_all_open || self.is_deleting {
            return false;
        }
        self.is_deleting = true;
        let ok = match self.ctx.api.delete_all_plans().await {
            Ok(()) => {
                info!("all plans deleted");
                self.ctx.notifier.success("All plans deleted successfully");
                self.delete_all_open = false;
                self.fetch_plans().await;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to delete all plans");
                false
            }
        };
        self.is_deleting = false;
        ok
    }
}
