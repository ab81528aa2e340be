use chrono::{DateTime, NaiveDate, Utc};

pub use crate::domain::pagination::{PaginatedResult, Pagination};

/// Account as exposed to other modules (the password hash never leaves storage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub muscle_group: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub notes: String,
    /// Ordered by `order_index`.
    pub exercises: Vec<WorkoutPlanExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlanExercise {
    pub id: String,
    pub exercise_id: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub order_index: i32,
}

/// One exercise line of a create/update request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanExerciseInput {
    pub exercise_id: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    /// Position in the plan; `None` keeps the input order.
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    pub name: String,
    pub notes: String,
    pub exercises: Vec<PlanExerciseInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    /// Case-insensitive substring of the plan name.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledWorkout {
    pub id: String,
    pub user_id: String,
    pub workout_plan_id: String,
    pub scheduled_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub date: Option<NaiveDate>,
}
