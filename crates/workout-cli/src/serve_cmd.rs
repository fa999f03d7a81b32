//! `workout serve-mock`: the in-memory backend served over the REST routes
//! the HTTP client speaks, under `/api`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use workout_api::models::{
    AuthResponse, Exercise, LoginRequest, PlanInput, RegisterRequest, WorkoutPlan, WorkoutSession,
    WorkoutSessionInput,
};
use workout_api::{ApiError, ErrorBody, WorkoutApi};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    body: ErrorBody,
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorBody {
                message: Some(msg.into()),
                ..ErrorBody::default()
            },
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let status = err
            .status()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::BAD_REQUEST);
        Self {
            status,
            body: err.to_body(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

type ApiResponse<T> = Result<Json<T>, AppError>;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ServeOptions {
    /// Reject requests outside `/api/auth` that carry no bearer token.
    pub require_auth: bool,
}

type SharedApi = Arc<dyn WorkoutApi>;

pub fn build_router(api: SharedApi, options: ServeOptions) -> Router {
    let auth = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register));

    let mut resources = Router::new()
        .route(
            "/workout-plans",
            get(list_plans).post(create_plan).delete(delete_all_plans),
        )
        .route(
            "/workout-plans/{id}",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
        .route("/workout-plans/{id}/sessions", get(list_sessions))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", put(update_session).delete(delete_session))
        .route("/exercises", get(list_exercises));
    if options.require_auth {
        resources = resources.route_layer(middleware::from_fn(require_bearer));
    }

    Router::new()
        .nest("/api", auth.merge(resources))
        .layer(CorsLayer::permissive())
        .with_state(api)
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let has_token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !has_token {
        return AppError::unauthorized("Unauthorized").into_response();
    }
    next.run(request).await
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(
    api: SharedApi,
    options: ServeOptions,
    bind: &str,
    port: u16,
) -> Result<()> {
    let app = build_router(api, options);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!(
        require_auth = options.require_auth,
        "workout mock API listening on http://{addr}/api"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("workout mock API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn login(
    State(api): State<SharedApi>,
    Json(req): Json<LoginRequest>,
) -> ApiResponse<AuthResponse> {
    Ok(Json(api.login(&req).await?))
}

async fn register(
    State(api): State<SharedApi>,
    Json(req): Json<RegisterRequest>,
) -> ApiResponse<AuthResponse> {
    Ok(Json(api.register(&req).await?))
}

async fn list_plans(State(api): State<SharedApi>) -> ApiResponse<Vec<WorkoutPlan>> {
    Ok(Json(api.list_plans().await?))
}

async fn get_plan(State(api): State<SharedApi>, Path(id): Path<i64>) -> ApiResponse<WorkoutPlan> {
    Ok(Json(api.get_plan(id).await?))
}

async fn create_plan(
    State(api): State<SharedApi>,
    Json(input): Json<PlanInput>,
) -> Result<(StatusCode, Json<WorkoutPlan>), AppError> {
    Ok((StatusCode::CREATED, Json(api.create_plan(&input).await?)))
}

async fn update_plan(
    State(api): State<SharedApi>,
    Path(id): Path<i64>,
    Json(input): Json<PlanInput>,
) -> ApiResponse<WorkoutPlan> {
    Ok(Json(api.update_plan(id, &input).await?))
}

async fn delete_plan(
    State(api): State<SharedApi>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    api.delete_plan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_all_plans(State(api): State<SharedApi>) -> Result<StatusCode, AppError> {
    api.delete_all_plans().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_sessions(
    State(api): State<SharedApi>,
    Path(plan_id): Path<i64>,
) -> ApiResponse<Vec<WorkoutSession>> {
    Ok(Json(api.list_sessions(plan_id).await?))
}

async fn create_session(
    State(api): State<SharedApi>,
    Json(input): Json<WorkoutSessionInput>,
) -> Result<(StatusCode, Json<WorkoutSession>), AppError> {
    Ok((StatusCode::CREATED, Json(api.create_session(&input).await?)))
}

async fn update_session(
    State(api): State<SharedApi>,
    Path(id): Path<i64>,
    Json(input): Json<WorkoutSessionInput>,
) -> ApiResponse<WorkoutSession> {
    Ok(Json(api.update_session(id, &input).await?))
}

async fn delete_session(
    State(api): State<SharedApi>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    api.delete_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_exercises(State(api): State<SharedApi>) -> ApiResponse<Vec<Exercise>> {
    Ok(Json(api.list_exercises().await?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
