use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::{
    error::WorkoutTrackerError,
    model::{
        AuthToken, Exercise, NewUser, PaginatedResult, Pagination, PlanFilter, PlanInput,
        ScheduleFilter, ScheduledWorkout, User, WorkoutPlan,
    },
};

/// Public API of the workout_tracker module for in-process consumers.
#[async_trait]
pub trait WorkoutTrackerApi: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User, WorkoutTrackerError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, WorkoutTrackerError>;

    /// Resolve an access token to its user id.
    fn authenticate(&self, token: &str) -> Result<String, WorkoutTrackerError>;

    async fn get_user(&self, user_id: &str) -> Result<User, WorkoutTrackerError>;

    async fn list_exercises(&self) -> Result<Vec<Exercise>, WorkoutTrackerError>;

    async fn get_exercise(&self, id: &str) -> Result<Exercise, WorkoutTrackerError>;

    async fn create_plan(
        &self,
        user_id: &str,
        input: PlanInput,
    ) -> Result<WorkoutPlan, WorkoutTrackerError>;

    async fn update_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        input: PlanInput,
    ) -> Result<WorkoutPlan, WorkoutTrackerError>;

    async fn get_plans(
        &self,
        user_id: &str,
        pagination: Pagination,
        filter: PlanFilter,
    ) -> Result<PaginatedResult<WorkoutPlan>, WorkoutTrackerError>;

    async fn get_plan(&self, user_id: &str, plan_id: &str)
        -> Result<WorkoutPlan, WorkoutTrackerError>;

    async fn delete_plan(&self, user_id: &str, plan_id: &str) -> Result<(), WorkoutTrackerError>;

    async fn schedule_workout(
        &self,
        user_id: &str,
        plan_id: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledWorkout, WorkoutTrackerError>;

    async fn get_schedules(
        &self,
        user_id: &str,
        pagination: Pagination,
        filter: ScheduleFilter,
    ) -> Result<PaginatedResult<ScheduledWorkout>, WorkoutTrackerError>;

    async fn delete_schedule(&self, id: &str, user_id: &str) -> Result<(), WorkoutTrackerError>;
}
