use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Status of a workout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    #[default]
    Pending,
    Completed,
    Skipped,
}

impl SessionStatus {
    /// All statuses, in the order they are offered to the user.
    pub const ALL: [SessionStatus; 3] = [Self::Pending, Self::Completed, Self::Skipped];

    /// Human-readable badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Skipped => "SKIPPED",
        };
        f.write_str(s)
    }
}

impl FromStr for SessionStatus {
    type Err = SessionStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "SKIPPED" => Ok(Self::Skipped),
            _ => Err(SessionStatusParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`SessionStatus`] string.
#[derive(Debug, Clone)]
pub struct SessionStatusParseError(pub String);

impl fmt::Display for SessionStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid session status: {:?} (expected pending, completed, or skipped)",
            self.0
        )
    }
}

impl std::error::Error for SessionStatusParseError {}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// An account as reported by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Result of a successful login or registration.
///
/// The real backend omits `user` and the mock backend omits
/// `authenticated`, so both are optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default = "default_authenticated")]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

fn default_authenticated() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A catalog exercise. Reference data: never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub category: String,
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// A workout plan -- the top-level grouping of sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Payload for creating or updating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Sentinel `exercise_id` meaning "no exercise chosen yet".
pub const UNSELECTED_EXERCISE: i64 = 0;

/// Editable, unsaved form of a session line item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExerciseInput {
    #[serde(default)]
    pub exercise_id: i64,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default)]
    pub order_index: usize,
}

impl SessionExerciseInput {
    /// An empty line item at the given position.
    pub fn blank(order_index: usize) -> Self {
        Self {
            exercise_id: UNSELECTED_EXERCISE,
            order_index,
            ..Self::default()
        }
    }

    /// Whether a catalog exercise has been chosen.
    pub fn has_exercise(&self) -> bool {
        self.exercise_id != UNSELECTED_EXERCISE
    }
}

/// Persisted session line item, with the catalog snapshot embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExercise {
    pub id: i64,
    pub exercise_id: i64,
    pub exercise: Exercise,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, deserialize_with = "measure::deserialize", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub order_index: usize,
}

impl From<&SessionExercise> for SessionExerciseInput {
    fn from(se: &SessionExercise) -> Self {
        Self {
            exercise_id: se.exercise_id,
            sets: se.sets,
            reps: se.reps,
            weight: se.weight,
            duration: se.duration,
            order_index: se.order_index,
        }
    }
}

/// A scheduled workout under a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "iso_date")]
    pub workout_date: NaiveDate,
    pub status: SessionStatus,
    pub workout_plan_id: i64,
    #[serde(default)]
    pub session_exercises: Vec<SessionExercise>,
}

impl WorkoutSession {
    /// Line items converted back into their editable form.
    ///
    /// Items come back in `order_index` order, renumbered from zero.
    pub fn exercise_inputs(&self) -> Vec<SessionExerciseInput> {
        let mut inputs: Vec<SessionExerciseInput> = self
            .session_exercises
            .iter()
            .map(SessionExerciseInput::from)
            .collect();
        inputs.sort_by_key(|input| input.order_index);
        for (position, input) in inputs.iter_mut().enumerate() {
            input.order_index = position;
        }
        inputs
    }
}

/// Payload for creating or updating a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSessionInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "iso_date")]
    pub workout_date: NaiveDate,
    pub status: SessionStatus,
    pub workout_plan_id: i64,
    #[serde(default)]
    pub session_exercises: Vec<SessionExerciseInput>,
}

// ---------------------------------------------------------------------------
// Date serialization
// ---------------------------------------------------------------------------

/// `YYYY-MM-DD` on the way out; on the way in, also accepts a full ISO
/// datetime and keeps only its date part.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    /// Parse a date or datetime string into its calendar date.
    pub fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        let date_part = raw.split('T').next().unwrap_or(raw);
        NaiveDate::parse_from_str(date_part.trim(), FORMAT)
    }
}

// ---------------------------------------------------------------------------
// Measure deserialization
// ---------------------------------------------------------------------------

/// Lenient reader for sets, reps, weight and duration.
///
/// The backend stores weight as a decimal, so whole numbers may arrive as
/// `135.00`. Anything that is not a whole, non-negative `u32` reads as unset.
pub mod measure {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let raw = Option::<f64>::deserialize(deserializer)?;
        Ok(raw.and_then(from_number))
    }

    pub fn from_number(value: f64) -> Option<u32> {
        let whole = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
        (whole && value <= f64::from(u32::MAX)).then(|| value as u32)
    }
}
