use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{PaginatedResult, Pagination, ScheduleFilter, ScheduledWorkout};
use crate::domain::error::DomainError;
use crate::domain::pagination::paginate;
use crate::domain::repo::{PlanOwnerLookup, RepoError, SchedulesRepository};
use crate::domain::service::plans::require;

/// Puts plans on the calendar. A (user, plan, date) triple exists at most once.
#[derive(Clone)]
pub struct ScheduleService {
    schedules: Arc<dyn SchedulesRepository>,
    plans: Arc<dyn PlanOwnerLookup>,
}

impl ScheduleService {
    pub fn new(schedules: Arc<dyn SchedulesRepository>, plans: Arc<dyn PlanOwnerLookup>) -> Self {
        Self { schedules, plans }
    }

    #[instrument(
        name = "workout_tracker.schedules.schedule_workout",
        skip(self, scheduled_at),
        fields(user_id = %user_id.trim(), plan_id = %plan_id.trim(), date = %scheduled_at.date_naive())
    )]
    pub async fn schedule_workout(
        &self,
        user_id: &str,
        plan_id: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledWorkout, DomainError> {
        info!("Scheduling workout");

        let user_id = require(user_id, "user id")?;
        let plan_id = require(plan_id, "workout plan id")?;

        let date = scheduled_at.date_naive();
        let today = Utc::now().date_naive();
        if date < today {
            return Err(DomainError::invalid_input(format!(
                "cannot schedule a workout in the past ({date} is before {today})"
            )));
        }

        let owner = self
            .plans
            .owner_of(&plan_id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found("workout plan", plan_id.clone()))?;
        if owner != user_id {
            warn!("Workout plan belongs to another user");
            return Err(DomainError::forbidden("workout plan belongs to another user"));
        }

        let same_day = self
            .schedules
            .find_by_user_and_date(&user_id, date)
            .await
            .map_err(DomainError::storage)?;
        if same_day.iter().any(|s| s.workout_plan_id == plan_id) {
            warn!("Workout plan already scheduled for this date");
            return Err(already_scheduled(date));
        }

        let schedule = ScheduledWorkout {
            id: Uuid::new_v4().to_string(),
            user_id,
            workout_plan_id: plan_id,
            scheduled_date: date,
            created_at: Utc::now(),
        };

        self.schedules.insert(&schedule).await.map_err(|e| match e {
            RepoError::Duplicate => {
                warn!("Concurrent schedule for the same date rejected by storage");
                already_scheduled(date)
            }
            RepoError::DanglingReference => {
                DomainError::not_found("workout plan", schedule.workout_plan_id.clone())
            }
            other => DomainError::storage(other),
        })?;

        info!(schedule_id = %schedule.id, "Successfully scheduled workout");
        Ok(schedule)
    }

    #[instrument(
        name = "workout_tracker.schedules.get_schedules",
        skip(self, filter),
        fields(user_id = %user_id.trim(), page = pagination.page, limit = pagination.limit)
    )]
    pub async fn get_schedules(
        &self,
        user_id: &str,
        pagination: Pagination,
        filter: ScheduleFilter,
    ) -> Result<PaginatedResult<ScheduledWorkout>, DomainError> {
        debug!(date = ?filter.date, "Listing scheduled workouts");

        let user_id = require(user_id, "user id")?;
        let (items, total) = self
            .schedules
            .list_by_user(&user_id, &filter, pagination)
            .await
            .map_err(DomainError::storage)?;

        Ok(paginate(items, total, pagination))
    }

    #[instrument(
        name = "workout_tracker.schedules.delete_schedule",
        skip(self),
        fields(schedule_id = %id.trim(), user_id = %user_id.trim())
    )]
    pub async fn delete_schedule(&self, id: &str, user_id: &str) -> Result<(), DomainError> {
        info!("Deleting scheduled workout");

        let id = require(id, "schedule id")?;
        let user_id = require(user_id, "user id")?;

        let deleted = self
            .schedules
            .delete(&id, &user_id)
            .await
            .map_err(DomainError::storage)?;
        if !deleted {
            return Err(DomainError::not_found("scheduled workout", id));
        }

        info!("Successfully deleted scheduled workout");
        Ok(())
    }
}

fn already_scheduled(date: NaiveDate) -> DomainError {
    DomainError::conflict(format!("workout plan is already scheduled on {date}"))
}
