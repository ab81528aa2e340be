use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::contract::{
    client::WorkoutTrackerApi,
    error::WorkoutTrackerError,
    model::{
        AuthToken, Exercise, NewUser, PaginatedResult, Pagination, PlanFilter, PlanInput,
        ScheduleFilter, ScheduledWorkout, User, WorkoutPlan,
    },
};
use crate::domain::service::Services;

/// Local implementation of the WorkoutTrackerApi trait that delegates to the domain services
pub struct WorkoutTrackerLocalClient {
    services: Arc<Services>,
}

impl WorkoutTrackerLocalClient {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl WorkoutTrackerApi for WorkoutTrackerLocalClient {
    async fn register(&self, new_user: NewUser) -> Result<User, WorkoutTrackerError> {
        self.services.auth.register(new_user).await.map_err(Into::into)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, WorkoutTrackerError> {
        self.services
            .auth
            .login(email, password)
            .await
            .map_err(Into::into)
    }

    fn authenticate(&self, token: &str) -> Result<String, WorkoutTrackerError> {
        self.services.auth.authenticate(token).map_err(Into::into)
    }

    async fn get_user(&self, user_id: &str) -> Result<User, WorkoutTrackerError> {
        self.services.auth.get_user(user_id).await.map_err(Into::into)
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, WorkoutTrackerError> {
        self.services
            .exercises
            .list_exercises()
            .await
            .map_err(Into::into)
    }

    async fn get_exercise(&self, id: &str) -> Result<Exercise, WorkoutTrackerError> {
        self.services
            .exercises
            .get_exercise(id)
            .await
            .map_err(Into::into)
    }

    async fn create_plan(
        &self,
        user_id: &str,
        input: PlanInput,
    ) -> Result<WorkoutPlan, WorkoutTrackerError> {
        self.services
            .plans
            .create_plan(user_id, input)
            .await
            .map_err(Into::into)
    }

    async fn update_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        input: PlanInput,
    ) -> Result<WorkoutPlan, WorkoutTrackerError> {
        self.services
            .plans
            .update_plan(user_id, plan_id, input)
            .await
            .map_err(Into::into)
    }

    async fn get_plans(
        &self,
        user_id: &str,
        pagination: Pagination,
        filter: PlanFilter,
    ) -> Result<PaginatedResult<WorkoutPlan>, WorkoutTrackerError> {
        self.services
            .plans
            .get_plans(user_id, pagination, filter)
            .await
            .map_err(Into::into)
    }

    async fn get_plan(
        &self,
        user_id: &str,
        plan_id: &str,
    ) -> Result<WorkoutPlan, WorkoutTrackerError> {
        self.services
            .plans
            .get_plan(user_id, plan_id)
            .await
            .map_err(Into::into)
    }

    async fn delete_plan(&self, user_id: &str, plan_id: &str) -> Result<(), WorkoutTrackerError> {
        self.services
            .plans
            .delete_plan(user_id, plan_id)
            .await
            .map_err(Into::into)
    }

    async fn schedule_workout(
        &self,
        user_id: &str,
        plan_id: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledWorkout, WorkoutTrackerError> {
        self.services
            .schedules
            .schedule_workout(user_id, plan_id, scheduled_at)
            .await
            .map_err(Into::into)
    }

    async fn get_schedules(
        &self,
        user_id: &str,
        pagination: Pagination,
        filter: ScheduleFilter,
    ) -> Result<PaginatedResult<ScheduledWorkout>, WorkoutTrackerError> {
        self.services
            .schedules
            .get_schedules(user_id, pagination, filter)
            .await
            .map_err(Into::into)
    }

    async fn delete_schedule(&self, id: &str, user_id: &str) -> Result<(), WorkoutTrackerError> {
        self.services
            .schedules
            .delete_schedule(id, user_id)
            .await
            .map_err(Into::into)
    }
}
