//! Shared test utilities for workout integration tests.
//!
//! [`Fixture`] wires a seeded [`MemoryApi`] behind the interceptor, with
//! recording notifier and navigator, the same way the CLI wires the real
//! backend. [`FailingApi`] answers every call with one canned failure;
//! [`CatalogOutageApi`] fails only the exercise catalog.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use workout_api::models::{
    AuthResponse, Exercise, LoginRequest, PlanInput, RegisterRequest, WorkoutPlan, WorkoutSession,
    WorkoutSessionInput,
};
use workout_api::{
    ApiError, ApiResult, Credentials, MemoryApi, MemoryCredentialStore, SessionContext, WorkoutApi,
};
use workout_core::{Intercepted, PageContext, RecordingNavigator, RecordingNotifier};

/// Token stored in a fixture's signed-in session.
pub const TEST_TOKEN: &str = "test-token";

/// Everything a page test needs, with handles kept for assertions.
pub struct Fixture {
    pub backend: Arc<dyn WorkoutApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: Arc<SessionContext>,
    pub ctx: PageContext,
}

impl Fixture {
    /// Seeded in-memory backend and a signed-in session.
    pub fn seeded() -> (Self, Arc<MemoryApi>) {
        let api = Arc::new(MemoryApi::seeded());
        (Self::with_backend(api.clone()), api)
    }

    /// Route every call through `backend`.
    pub fn with_backend(backend: Arc<dyn WorkoutApi>) -> Self {
        let store = MemoryCredentialStore::with_credentials(Credentials {
            token: TEST_TOKEN.to_string(),
            user: None,
        });
        let session = Arc::new(SessionContext::new(Arc::new(store)));
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let intercepted = Intercepted::new(
            backend.clone(),
            session.clone(),
            notifier.clone(),
            navigator.clone(),
        );
        let ctx = PageContext::new(Arc::new(intercepted), notifier.clone(), navigator.clone());
        Self {
            backend,
            notifier,
            navigator,
            session,
            ctx,
        }
    }
}

/// A backend whose every call fails with the same error.
pub struct FailingApi {
    status: Option<u16>,
    message: Option<String>,
    errors: BTreeMap<String, String>,
    calls: AtomicUsize,
}

impl FailingApi {
    /// Fail with `status` and a top-level `message`.
    pub fn with_message(status: u16, message: &str) -> Self {
        Self {
            status: Some(status),
            message: Some(message.to_string()),
            errors: BTreeMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail with `status` and a field-error map.
    pub fn with_field_errors(status: u16, errors: &[(&str, &str)]) -> Self {
        Self {
            status: Some(status),
            message: None,
            errors: errors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail without any response: no status, no message.
    pub fn silent() -> Self {
        Self {
            status: None,
            message: None,
            errors: BTreeMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> ApiResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ApiError::Response {
            status: self.status,
            message: self.message.clone(),
            errors: self.errors.clone(),
        })
    }
}

#[async_trait]
impl WorkoutApi for FailingApi {
    async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.fail()
    }

    async fn register(&self, _request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.fail()
    }

    async fn list_plans(&self) -> ApiResult<Vec<WorkoutPlan>> {
        self.fail()
    }

    async fn get_plan(&self, _id: i64) -> ApiResult<WorkoutPlan> {
        self.fail()
    }

    async fn create_plan(&self, _input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.fail()
    }

    async fn update_plan(&self, _id: i64, _input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.fail()
    }

    async fn delete_plan(&self, _id: i64) -> ApiResult<()> {
        self.fail()
    }

    async fn delete_all_plans(&self) -> ApiResult<()> {
        self.fail()
    }

    async fn list_sessions(&self, _plan_id: i64) -> ApiResult<Vec<WorkoutSession>> {
        self.fail()
    }

    async fn create_session(&self, _input: &WorkoutSessionInput) -> ApiResult<WorkoutSession> {
        self.fail()
    }

    async fn update_session(
        &self,
        _id: i64,
        _input: &WorkoutSessionInput,
    ) -> ApiResult<WorkoutSession> {
        self.fail()
    }

    async fn delete_session(&self, _id: i64) -> ApiResult<()> {
        self.fail()
    }

    async fn list_exercises(&self) -> ApiResult<Vec<Exercise>> {
        self.fail()
    }
}

/// Seeded in-memory backend whose exercise catalog is unavailable.
pub struct CatalogOutageApi {
    inner: MemoryApi,
    status: u16,
    message: String,
}

impl CatalogOutageApi {
    pub fn new(status: u16, message: &str) -> Self {
        Self {
            inner: MemoryApi::seeded(),
            status,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl WorkoutApi for CatalogOutageApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.inner.login(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.inner.register(request).await
    }

    async fn list_plans(&self) -> ApiResult<Vec<WorkoutPlan>> {
        self.inner.list_plans().await
    }

    async fn get_plan(&self, id: i64) -> ApiResult<WorkoutPlan> {
        self.inner.get_plan(id).await
    }

    async fn create_plan(&self, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.inner.create_plan(input).await
    }

    async fn update_plan(&self, id: i64, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.inner.update_plan(id, input).await
    }

    async fn delete_plan(&self, id: i64) -> ApiResult<()> {
        self.inner.delete_plan(id).await
    }

    async fn delete_all_plans(&self) -> ApiResult<()> {
        self.inner.delete_all_plans().await
    }

    async fn list_sessions(&self, plan_id: i64) -> ApiResult<Vec<WorkoutSession>> {
        self.inner.list_sessions(plan_id).await
    }

    async fn create_session(&self, input: &WorkoutSessionInput) -> ApiResult<WorkoutSession> {
        self.inner.create_session(input).await
    }

    async fn update_session(
        &self,
        id: i64,
        input: &WorkoutSessionInput,
    ) -> ApiResult<WorkoutSession> {
        self.inner.update_session(id, input).await
    }

    async fn delete_session(&self, id: i64) -> ApiResult<()> {
        self.inner.delete_session(id).await
    }

    async fn list_exercises(&self) -> ApiResult<Vec<Exercise>> {
        Err(ApiError::with_message(Some(self.status), self.message.clone()))
    }
}
