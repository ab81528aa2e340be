use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{
    AuthToken, Exercise, NewUser, PaginatedResult, Pagination, PlanExerciseInput, PlanInput,
    ScheduledWorkout, User, WorkoutPlan, WorkoutPlanExercise,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub muscle_group: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PlanExerciseReq {
    pub exercise_id: String,
    pub sets: i32,
    pub reps: i32,
    #[serde(default)]
    pub weight: f64,
    /// Position in the plan; defaults to the array position.
    #[serde(default)]
    pub order_index: Option<i32>,
}

/// Body of both create and full update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PlanReq {
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub exercises: Vec<PlanExerciseReq>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanExerciseDto {
    pub id: String,
    pub exercise_id: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanDto {
    pub id: String,
    pub name: String,
    pub notes: String,
    pub exercises: Vec<PlanExerciseDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ScheduleReq {
    pub workout_plan_id: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp; only the UTC date is kept.
    pub scheduled_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleDto {
    pub id: String,
    pub workout_plan_id: String,
    /// `YYYY-MM-DD`
    #[schema(value_type = String, format = Date)]
    pub scheduled_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanPageDto {
    pub data: Vec<PlanDto>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchedulePageDto {
    pub data: Vec<ScheduleDto>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPlansQuery {
    /// Page number, starting at 1.
    pub page: Option<i64>,
    /// Page size, 1..=100 (default 10).
    pub limit: Option<i64>,
    /// Case-insensitive substring of the plan name.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSchedulesQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Exact date, `YYYY-MM-DD` or RFC 3339.
    pub date: Option<String>,
}

impl ListPlansQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_optional(self.page, self.limit)
    }
}

impl ListSchedulesQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_optional(self.page, self.limit)
    }
}

/// Parse a calendar day or a timestamp into a UTC instant.
pub fn parse_date_input(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("invalid date '{raw}': expected YYYY-MM-DD or RFC 3339"))
}

// Conversion implementations between REST DTOs and contract models

impl From<RegisterReq> for NewUser {
    fn from(req: RegisterReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

impl From<AuthToken> for TokenDto {
    fn from(t: AuthToken) -> Self {
        Self {
            access_token: t.access_token,
            token_type: "Bearer".to_string(),
            expires_at: t.expires_at,
        }
    }
}

impl From<Exercise> for ExerciseDto {
    fn from(e: Exercise) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            category: e.category,
            muscle_group: e.muscle_group,
        }
    }
}

impl From<PlanReq> for PlanInput {
    fn from(req: PlanReq) -> Self {
        Self {
            name: req.name,
            notes: req.notes,
            exercises: req
                .exercises
                .into_iter()
                .map(|e| PlanExerciseInput {
                    exercise_id: e.exercise_id,
                    sets: e.sets,
                    reps: e.reps,
                    weight: e.weight,
                    order_index: e.order_index,
                })
                .collect(),
        }
    }
}

impl From<WorkoutPlanExercise> for PlanExerciseDto {
    fn from(e: WorkoutPlanExercise) -> Self {
        Self {
            id: e.id,
            exercise_id: e.exercise_id,
            sets: e.sets,
            reps: e.reps,
            weight: e.weight,
            order_index: e.order_index,
        }
    }
}

impl From<WorkoutPlan> for PlanDto {
    fn from(p: WorkoutPlan) -> Self {
        Self {
            id: p.id,
            name: p.name,
            notes: p.notes,
            exercises: p.exercises.into_iter().map(Into::into).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<ScheduledWorkout> for ScheduleDto {
    fn from(s: ScheduledWorkout) -> Self {
        Self {
            id: s.id,
            workout_plan_id: s.workout_plan_id,
            scheduled_date: s.scheduled_date,
            created_at: s.created_at,
        }
    }
}

fn meta<T>(page: &PaginatedResult<T>) -> PaginationMeta {
    PaginationMeta {
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

impl From<PaginatedResult<WorkoutPlan>> for PlanPageDto {
    fn from(page: PaginatedResult<WorkoutPlan>) -> Self {
        let meta = meta(&page);
        Self {
            data: page.data.into_iter().map(Into::into).collect(),
            meta,
        }
    }
}

impl From<PaginatedResult<ScheduledWorkout>> for SchedulePageDto {
    fn from(page: PaginatedResult<ScheduledWorkout>) -> Self {
        let meta = meta(&page);
        Self {
            data: page.data.into_iter().map(Into::into).collect(),
            meta,
        }
    }
}
