//! [`WorkoutApi`] over HTTP, talking JSON to the REST backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::WorkoutApi;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::models::{
    AuthResponse, Exercise, LoginRequest, PlanInput, RegisterRequest, WorkoutPlan, WorkoutSession,
    WorkoutSessionInput,
};
use crate::session::SessionContext;

/// REST client for the workout service.
///
/// Every request carries `Authorization: Bearer <token>` when the injected
/// [`SessionContext`] holds a token. Non-2xx responses are decoded into
/// [`ApiError::Response`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
    session: Arc<SessionContext>,
}

impl HttpApi {
    pub fn new(config: ApiConfig, session: Arc<SessionContext>) -> ApiResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a JSON success body.
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = check(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose success body is ignored.
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<()> {
        check(builder.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-success response into an [`ApiError`].
async fn check(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let bytes = response.bytes().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
    debug!(status = status.as_u16(), message = ?body.message, "api request rejected");
    Err(ApiError::from_body(status.as_u16(), body))
}

#[async_trait]
impl WorkoutApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.fetch(self.request(Method::POST, "/auth/login").json(request))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.fetch(self.request(Method::POST, "/auth/register").json(request))
            .await
    }

    async fn list_plans(&self) -> ApiResult<Vec<WorkoutPlan>> {
        self.fetch(self.request(Method::GET, "/workout-plans")).await
    }

    async fn get_plan(&self, id: i64) -> ApiResult<WorkoutPlan> {
        self.fetch(self.request(Method::GET, &format!("/workout-plans/{id}")))
            .await
    }

    async fn create_plan(&self, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.fetch(self.request(Method::POST, "/workout-plans").json(input))
            .await
    }

    async fn update_plan(&self, id: i64, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.fetch(
            self.request(Method::PUT, &format!("/workout-plans/{id}"))
                .json(input),
        )
        .await
    }

    async fn delete_plan(&self, id: i64) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/workout-plans/{id}")))
            .await
    }

    async fn delete_all_plans(&self) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, "/workout-plans"))
            .await
    }

    async fn list_sessions(&self, plan_id: i64) -> ApiResult<Vec<WorkoutSession>> {
        self.fetch(self.request(Method::GET, &format!("/workout-plans/{plan_id}/sessions")))
            .await
    }

    async fn create_session(&self, input: &WorkoutSessionInput) -> ApiResult<WorkoutSession> {
        self.fetch(self.request(Method::POST, "/sessions").json(input))
            .await
    }

    async fn update_session(
        &self,
        id: i64,
        input: &WorkoutSessionInput,
    ) -> ApiResult<WorkoutSession> {
        self.fetch(self.request(Method::PUT, &format!("/sessions/{id}")).json(input))
            .await
    }

    async fn delete_session(&self, id: i64) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/sessions/{id}")))
            .await
    }

    async fn list_exercises(&self) -> ApiResult<Vec<Exercise>> {
        self.fetch(self.request(Method::GET, "/exercises")).await
    }
}
