//! In-memory [`WorkoutApi`] implementation.
//!
//! Stands in for the backend in offline mode and in tests. Data lives in a
//! mutex-guarded store seeded with a small demo data set; every operation is
//! a linear scan. The mutex is never held across an `.await`.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::WorkoutApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuthResponse, Exercise, LoginRequest, PlanInput, RegisterRequest, SessionExercise,
    SessionExerciseInput, SessionStatus, User, WorkoutPlan, WorkoutSession, WorkoutSessionInput,
};

/// User id assigned to everything the mock creates.
const MOCK_USER_ID: i64 = 1;

struct Store {
    exercises: Vec<Exercise>,
    plans: Vec<WorkoutPlan>,
    sessions: Vec<WorkoutSession>,
    next_plan_id: i64,
    next_session_id: i64,
    next_line_id: i64,
}

impl Store {
    fn find_exercise(&self, id: i64) -> ApiResult<Exercise> {
        self.exercises
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::bad_request(format!("Exercise {id} not found")))
    }

    /// Materialize line items: fresh ids, positional `order_index`, and the
    /// catalog snapshot embedded.
    fn materialize(&mut self, inputs: &[SessionExerciseInput]) -> ApiResult<Vec<SessionExercise>> {
        let mut out = Vec::with_capacity(inputs.len());
        for (idx, se) in inputs.iter().enumerate() {
            let exercise = self.find_exercise(se.exercise_id)?;
            out.push(SessionExercise {
                id: 0,
                exercise_id: se.exercise_id,
                exercise,
                sets: se.sets,
                reps: se.reps,
                weight: se.weight,
                duration: se.duration,
                order_index: idx,
            });
        }
        // Ids are only consumed once every exercise has resolved.
        for item in &mut out {
            item.id = self.next_line_id;
            self.next_line_id += 1;
        }
        Ok(out)
    }
}

/// The in-memory backend.
pub struct MemoryApi {
    store: Mutex<Store>,
    latency: Duration,
    calls: AtomicUsize,
}

impl MemoryApi {
    /// A backend seeded with the demo catalog, plans, and sessions.
    pub fn seeded() -> Self {
        let exercises = demo_exercises();
        let plans = demo_plans();
        let sessions = demo_sessions(&exercises);
        Self::from_store(Store {
            exercises,
            plans,
            sessions,
            next_plan_id: 4,
            next_session_id: 5,
            next_line_id: 5,
        })
    }

    /// A backend with the given catalog and no plans or sessions.
    pub fn with_catalog(exercises: Vec<Exercise>) -> Self {
        Self::from_store(Store {
            exercises,
            plans: Vec::new(),
            sessions: Vec::new(),
            next_plan_id: 1,
            next_session_id: 1,
            next_line_id: 1,
        })
    }

    fn from_store(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call by `latency`, simulating a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of API calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn plans_snapshot(&self) -> Vec<WorkoutPlan> {
        self.lock().plans.clone()
    }

    pub fn sessions_snapshot(&self) -> Vec<WorkoutSession> {
        self.lock().sessions.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn enter(&self, op: &'static str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(op, "mock api call");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::seeded()
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn mock_token() -> String {
    format!("mock-jwt-token-{}", Uuid::new_v4().simple())
}

#[async_trait]
impl WorkoutApi for MemoryApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.enter("login").await;
        if request.username.is_empty() || request.password.is_empty() {
            return Err(ApiError::with_message(None, "Invalid credentials"));
        }
        Ok(AuthResponse {
            token: mock_token(),
            authenticated: true,
            user: Some(User {
                id: MOCK_USER_ID,
                full_name: "Test User".to_string(),
                username: request.username.clone(),
                email: format!("{}@test.com", request.username),
            }),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.enter("register").await;
        Ok(AuthResponse {
            token: mock_token(),
            authenticated: true,
            user: Some(User {
                id: MOCK_USER_ID,
                full_name: request.full_name.clone(),
                username: request.username.clone(),
                email: request.email.clone(),
            }),
        })
    }

    async fn list_plans(&self) -> ApiResult<Vec<WorkoutPlan>> {
        self.enter("list_plans").await;
        Ok(self.lock().plans.clone())
    }

    async fn get_plan(&self, id: i64) -> ApiResult<WorkoutPlan> {
        self.enter("get_plan").await;
        self.lock()
            .plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Plan not found"))
    }

    async fn create_plan(&self, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.enter("create_plan").await;
        let mut store = self.lock();
        let ts = now();
        let plan = WorkoutPlan {
            id: store.next_plan_id,
            name: input.name.clone(),
            description: input.description.clone(),
            user_id: MOCK_USER_ID,
            created_at: ts.clone(),
            updated_at: ts,
        };
        store.next_plan_id += 1;
        store.plans.push(plan.clone());
        info!(plan_id = plan.id, "mock plan created");
        Ok(plan)
    }

    async fn update_plan(&self, id: i64, input: &PlanInput) -> ApiResult<WorkoutPlan> {
        self.enter("update_plan").await;
        let mut store = self.lock();
        let plan = store
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found("Plan not found"))?;
        plan.name = input.name.clone();
        plan.description = input.description.clone();
        plan.updated_at = now();
        Ok(plan.clone())
    }

    async fn delete_plan(&self, id: i64) -> ApiResult<()> {
        self.enter("delete_plan").await;
        let mut store = self.lock();
        store.plans.retain(|p| p.id != id);
        store.sessions.retain(|s| s.workout_plan_id != id);
        info!(plan_id = id, "mock plan deleted");
        Ok(())
    }

    async fn delete_all_plans(&self) -> ApiResult<()> {
        self.enter("delete_all_plans").await;
        let mut store = self.lock();
        store.plans.clear();
        store.sessions.clear();
        info!("mock plans cleared");
        Ok(())
    }

    async fn list_sessions(&self, plan_id: i64) -> ApiResult<Vec<WorkoutSession>> {
        self.enter("list_sessions").await;
        Ok(self
            .lock()
            .sessions
            .iter()
            .filter(|s| s.workout_plan_id == plan_id)
            .cloned()
            .collect())
    }

    async fn create_session(&self, input: &WorkoutSessionInput) -> ApiResult<WorkoutSession> {
        self.enter("create_session").await;
        let mut store = self.lock();
        if !store.plans.iter().any(|p| p.id == input.workout_plan_id) {
            return Err(ApiError::not_found("Plan not found"));
        }
        let session_exercises = store.materialize(&input.session_exercises)?;
        let session = WorkoutSession {
            id: store.next_session_id,
            name: input.name.clone(),
            notes: input.notes.clone(),
            workout_date: input.workout_date,
            status: input.status,
            workout_plan_id: input.workout_plan_id,
            session_exercises,
        };
        store.next_session_id += 1;
        store.sessions.push(session.clone());
        info!(session_id = session.id, plan_id = session.workout_plan_id, "mock session created");
        Ok(session)
    }

    async fn update_session(
        &self,
        id: i64,
        input: &WorkoutSessionInput,
    ) -> ApiResult<WorkoutSession> {
        self.enter("update_session").await;
        let mut store = self.lock();
        let index = store
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ApiError::not_found("Session not found"))?;
        let session_exercises = store.materialize(&input.session_exercises)?;
        let session = &mut store.sessions[index];
        session.name = input.name.clone();
        session.notes = input.notes.clone();
        session.workout_date = input.workout_date;
        session.status = input.status;
        session.session_exercises = session_exercises;
        info!(session_id = id, "mock session updated");
        Ok(session.clone())
    }

    async fn delete_session(&self, id: i64) -> ApiResult<()> {
        self.enter("delete_session").await;
        self.lock().sessions.retain(|s| s.id != id);
        Ok(())
    }

    async fn list_exercises(&self) -> ApiResult<Vec<Exercise>> {
        self.enter("list_exercises").await;
        Ok(self.lock().exercises.clone())
    }
}

// ---------------------------------------------------------------------------
// Demo data
// ---------------------------------------------------------------------------

/// The demo exercise catalog.
pub fn demo_exercises() -> Vec<Exercise> {
    [
        (1, "Bench Press", "Chest"),
        (2, "Squat", "Legs"),
        (3, "Deadlift", "Back"),
        (4, "Overhead Press", "Shoulders"),
        (5, "Barbell Row", "Back"),
        (6, "Pull-ups", "Back"),
        (7, "Lunges", "Legs"),
        (8, "Bicep Curls", "Arms"),
        (9, "Tricep Dips", "Arms"),
        (10, "Plank", "Core"),
        (11, "Leg Press", "Legs"),
        (12, "Lat Pulldown", "Back"),
    ]
    .into_iter()
    .map(|(id, name, category)| Exercise {
        id,
        name: name.to_string(),
        category: category.to_string(),
    })
    .collect()
}

fn demo_plans() -> Vec<WorkoutPlan> {
    [
        (1, "Push Day", "Chest, shoulders, and triceps workout", "2024-01-15"),
        (2, "Pull Day", "Back and biceps focused training", "2024-01-16"),
        (3, "Leg Day", "Lower body strength and conditioning", "2024-01-17"),
    ]
    .into_iter()
    .map(|(id, name, description, date)| WorkoutPlan {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        user_id: MOCK_USER_ID,
        created_at: date.to_string(),
        updated_at: date.to_string(),
    })
    .collect()
}

fn demo_sessions(exercises: &[Exercise]) -> Vec<WorkoutSession> {
    let line = |id: i64, exercise_id: i64, sets: u32, reps: u32, weight: u32, order_index| {
        SessionExercise {
            id,
            exercise_id,
            exercise: exercises[(exercise_id - 1) as usize].clone(),
            sets: Some(sets),
            reps: Some(reps),
            weight: Some(weight),
            duration: None,
            order_index,
        }
    };
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    vec![
        WorkoutSession {
            id: 1,
            name: "Morning Push".to_string(),
            notes: Some("Felt strong today".to_string()),
            workout_date: date(2024, 1, 20),
            status: SessionStatus::Completed,
            workout_plan_id: 1,
            session_exercises: vec![line(1, 1, 4, 8, 135, 0), line(2, 4, 3, 10, 95, 1)],
        },
        WorkoutSession {
            id: 2,
            name: "Evening Push".to_string(),
            notes: None,
            workout_date: date(2024, 1, 22),
            status: SessionStatus::Pending,
            workout_plan_id: 1,
            session_exercises: Vec::new(),
        },
        WorkoutSession {
            id: 3,
            name: "Back Workout".to_string(),
            notes: Some("Focus on form".to_string()),
            workout_date: date(2024, 1, 21),
            status: SessionStatus::Completed,
            workout_plan_id: 2,
            session_exercises: vec![line(3, 3, 5, 5, 225, 0), line(4, 5, 4, 8, 135, 1)],
        },
        WorkoutSession {
            id: 4,
            name: "Leg Session".to_string(),
            notes: Some("Skipped due to injury".to_string()),
            workout_date: date(2024, 1, 19),
            status: SessionStatus::Skipped,
            workout_plan_id: 3,
            session_exercises: Vec::new(),
        },
    ]
}
