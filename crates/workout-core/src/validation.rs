//! Local precondition checks run before anything is sent.

use thiserror::Error;

use workout_api::models::SessionExerciseInput;

/// Maximum length of plan and session names.
pub const NAME_MAX_CHARS: usize = 100;

/// Maximum length of plan descriptions and session notes.
pub const TEXT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an exercise for all items")]
    ExerciseNotSelected { count: usize },

    #[error("Plan name is required")]
    PlanNameRequired,

    #[error("Plan name must not exceed 100 characters")]
    PlanNameTooLong,

    #[error("Description must not exceed 500 characters")]
    DescriptionTooLong,

    #[error("Session name is required")]
    SessionNameRequired,

    #[error("Session name must not exceed 100 characters")]
    SessionNameTooLong,

    #[error("Notes must not exceed 500 characters")]
    NotesTooLong,
}

/// Every line item must reference a catalog exercise.
pub fn validate_exercise_selection(items: &[SessionExerciseInput]) -> Result<(), ValidationError> {
    let count = items.iter().filter(|i| !i.has_exercise()).count();
    if count > 0 {
        return Err(ValidationError::ExerciseNotSelected { count });
    }
    Ok(())
}

pub fn validate_plan(name: &str, description: Option<&str>) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::PlanNameRequired);
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(ValidationError::PlanNameTooLong);
    }
    if description.is_some_and(|d| d.chars().count() > TEXT_MAX_CHARS) {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

pub fn validate_session(name: &str, notes: Option<&str>) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::SessionNameRequired);
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(ValidationError::SessionNameTooLong);
    }
    if notes.is_some_and(|n| n.chars().count() > TEXT_MAX_CHARS) {
        return Err(ValidationError::NotesTooLong);
    }
    Ok(())
}
