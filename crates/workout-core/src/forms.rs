//! Local form state for the plan and session dialogs.

use chrono::NaiveDate;

use workout_api::models::{
    PlanInput, SessionExerciseInput, SessionStatus, WorkoutPlan, WorkoutSession,
    WorkoutSessionInput,
};

use crate::validation::{ValidationError, validate_plan, validate_session};

/// Empty text means "absent" on the wire.
fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanForm {
    pub name: String,
    pub description: String,
}

impl PlanForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Prefill from an existing plan (edit dialog).
    pub fn from_plan(plan: &WorkoutPlan) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone().unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> Result<PlanInput, ValidationError> {
        let description = non_empty(&self.description);
        validate_plan(&self.name, description.as_deref())?;
        Ok(PlanInput {
            name: self.name.clone(),
            description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionForm {
    pub name: String,
    pub notes: String,
    pub workout_date: NaiveDate,
    pub status: SessionStatus,
}

impl SessionForm {
    /// Defaults for a new session: scheduled `today`, pending.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            notes: String::new(),
            workout_date: today,
            status: SessionStatus::Pending,
        }
    }

    /// Prefill from an existing session (edit dialog).
    pub fn from_session(session: &WorkoutSession) -> Self {
        Self {
            name: session.name.clone(),
            notes: session.notes.clone().unwrap_or_default(),
            workout_date: session.workout_date,
            status: session.status,
        }
    }

    /// Build the request payload carrying `exercises` as the line items.
    pub fn to_input(
        &self,
        plan_id: i64,
        exercises: Vec<SessionExerciseInput>,
    ) -> Result<WorkoutSessionInput, ValidationError> {
        let notes = non_empty(&self.notes);
        validate_session(&self.name, notes.as_deref())?;
        Ok(WorkoutSessionInput {
            name: self.name.clone(),
            notes,
            workout_date: self.workout_date,
            status: self.status,
            workout_plan_id: plan_id,
            session_exercises: exercises,
        })
    }
}
