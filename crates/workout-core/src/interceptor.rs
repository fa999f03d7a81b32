//! Centralized error-to-notification mapping.
//!
//! [`Intercepted`] wraps any [`WorkoutApi`] and, for every failed call:
//! - `401`: signs the user out, shows "Session expired, please login again",
//!   and navigates to [`Route::Login`];
//! - a top-level message: shows it;
//! - otherwise a field-error map: shows one notification per field;
//! - no response at all: shows nothing.
//!
//! The error is always handed back to the caller unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use workout_api::models::{
    AuthResponse, Exercise, LoginRequest, PlanInput, RegisterRequest, WorkoutPlan, WorkoutSession,
    WorkoutSessionInput,
};
use workout_api::{ApiError, ApiResult, SessionContext, WorkoutApi};

use crate::navigation::{Navigator, Route};
use crate::notify::Notifier;

pub const SESSION_EXPIRED: &str = "Session expired, please login again";

/// A [`WorkoutApi`] decorator applying the global failure policy.
pub struct Intercepted {
    inner: Arc<dyn WorkoutApi>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl Intercepted {
    pub fn new(
        inner: Arc<dyn WorkoutApi>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner,
            session,
            notifier,
            navigator,
        }
    }

    fn intercept<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(e) = &result {
            self.on_error(e);
        }
        result
    }

    fn on_error(&self, error: &ApiError) {
        if error.is_unauthorized() {
            debug!("unauthorized response, signing out");
            if let Err(e) = self.session.sign_out() {
                warn!(error = %e, "failed to clear stored credentials");
            }
            self.notifier.error(SESSION_EXPIRED);
            self.navigator.navigate(Route::Login);
            return;
        }
        for message in error.user_messages() {
            self.notifier.error(&message);
        }
    }
}

#[async_trait]
impl WorkoutApi for Intercepted {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.intercept(self.inner.login(request).await)
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.intercept(self.inner.register(request).await)
    }

    async fn list_plans(&self) -> ApiResult<Vec<WorkoutPlan>> {
        self.intercept(self.inner.list_plans().await)
    }

    async fn get_plan(&self, id: i64) -> ApiResult<WorkoutPlan> {
        self.intercept(self.inner.get_plan(id).await)
    }

    async fn create_plan(&self, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.intercept(self.inner.create_plan(input).await)
    }

    async fn update_plan(&self, id: i64, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.intercept(self.inner.update_plan(id, input).await)
    }

    async fn delete_plan(&self, id: i64) -> ApiResult<()> {
        self.intercept(self.inner.delete_plan(id).await)
    }

    async fn delete_all_plans(&self) -> ApiResult<()> {
        self.intercept(self.inner.delete_all_plans().await)
    }

    async fn list_sessions(&self, plan_id: i64) -> ApiResult<Vec<WorkoutSession>> {
        self.intercept(self.inner.list_sessions(plan_id).await)
    }

    async fn create_session(&self, input: &WorkoutSessionInput) -> ApiResult<WorkoutSession> {
        self.intercept(self.inner.create_session(input).await)
    }

    async fn update_session(
        &self,
        id: i64,
        input: &WorkoutSessionInput,
    ) -> ApiResult<WorkoutSession> {
        self.intercept(self.inner.update_session(id, input).await)
    }

    async fn delete_session(&self, id: i64) -> ApiResult<()> {
        self.intercept(self.inner.delete_session(id).await)
    }

    async fn list_exercises(&self) -> ApiResult<Vec<Exercise>> {
        self.intercept(self.inner.list_exercises().await)
    }
}
