//! The `WorkoutApi` trait -- the resource interface every backend implements.
//!
//! Page controllers hold an `Arc<dyn WorkoutApi>` and never know whether the
//! calls go over HTTP ([`crate::HttpApi`]) or to the in-memory store
//! ([`crate::MemoryApi`]).

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{
    AuthResponse, Exercise, LoginRequest, PlanInput, RegisterRequest, WorkoutPlan, WorkoutSession,
    WorkoutSessionInput,
};

/// Uniform request/response interface over the auth, plan, session and
/// exercise resource groups.
///
/// The trait is object-safe so it can be stored as `Arc<dyn WorkoutApi>`
/// and wrapped by decorators such as the notification interceptor.
#[async_trait]
pub trait WorkoutApi: Send + Sync {
    // -- auth -------------------------------------------------------------

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    // -- plans ------------------------------------------------------------

    async fn list_plans(&self) -> ApiResult<Vec<WorkoutPlan>>;

    async fn get_plan(&self, id: i64) -> ApiResult<WorkoutPlan>;

    async fn create_plan(&self, input: &PlanInput) -> ApiResult<WorkoutPlan>;

    async fn update_plan(&self, id: i64, input: &PlanInput) -> ApiResult<WorkoutPlan>;

    /// Delete a plan. The backend cascades to the plan's sessions.
    async fn delete_plan(&self, id: i64) -> ApiResult<()>;

    async fn delete_all_plans(&self) -> ApiResult<()>;

    // -- sessions ---------------------------------------------------------

    async fn list_sessions(&self, plan_id: i64) -> ApiResult<Vec<WorkoutSession>>;

    async fn create_session(&self, input: &WorkoutSessionInput) -> ApiResult<WorkoutSession>;

    async fn update_session(
        &self,
        id: i64,
        input: &WorkoutSessionInput,
    ) -> ApiResult<WorkoutSession>;

    async fn delete_session(&self, id: i64) -> ApiResult<()>;

    // -- exercises --------------------------------------------------------

    /// The read-only exercise catalog.
    async fn list_exercises(&self) -> ApiResult<Vec<Exercise>>;
}

// Compile-time assertion: WorkoutApi must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn WorkoutApi) {}
};
