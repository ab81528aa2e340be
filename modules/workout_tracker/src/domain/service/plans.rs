use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{
    PaginatedResult, Pagination, PlanExerciseInput, PlanFilter, PlanInput, WorkoutPlan,
    WorkoutPlanExercise,
};
use crate::domain::error::DomainError;
use crate::domain::pagination::paginate;
use crate::domain::repo::{PlansRepository, RepoError};

/// Workout plan rules: validation, ownership scoping, listing.
#[derive(Clone)]
pub struct PlanService {
    repo: Arc<dyn PlansRepository>,
}

impl PlanService {
    pub fn new(repo: Arc<dyn PlansRepository>) -> Self {
        Self { repo }
    }

    #[instrument(
        name = "workout_tracker.plans.create_plan",
        skip(self, input),
        fields(user_id = %user_id.trim(), exercises = input.exercises.len())
    )]
    pub async fn create_plan(
        &self,
        user_id: &str,
        input: PlanInput,
    ) -> Result<WorkoutPlan, DomainError> {
        info!("Creating workout plan");

        let user_id = require(user_id, "user id")?;
        let (name, notes, exercises) = validate_plan(input)?;

        let now = Utc::now();
        let plan = WorkoutPlan {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            notes,
            exercises,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .create(&plan)
            .await
            .map_err(|e| map_write_error(e, &plan.id))?;

        info!(plan_id = %plan.id, "Successfully created workout plan");
        Ok(plan)
    }

    #[instrument(
        name = "workout_tracker.plans.update_plan",
        skip(self, input),
        fields(user_id = %user_id.trim(), plan_id = %plan_id.trim())
    )]
    pub async fn update_plan(
        &self,
        user_id: &str,
        plan_id: &str,
        input: PlanInput,
    ) -> Result<WorkoutPlan, DomainError> {
        info!("Updating workout plan");

        let user_id = require(user_id, "user id")?;
        let plan_id = require(plan_id, "plan id")?;
        let (name, notes, exercises) = validate_plan(input)?;

        let now = Utc::now();
        let candidate = WorkoutPlan {
            id: plan_id.clone(),
            user_id,
            name,
            notes,
            exercises,
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .repo
            .update(&candidate)
            .await
            .map_err(|e| map_write_error(e, &plan_id))?
            .ok_or_else(|| DomainError::not_found("workout plan", plan_id))?;

        info!("Successfully updated workout plan");
        Ok(stored)
    }

    #[instrument(
        name = "workout_tracker.plans.get_plans",
        skip(self, filter),
        fields(user_id = %user_id.trim(), page = pagination.page, limit = pagination.limit)
    )]
    pub async fn get_plans(
        &self,
        user_id: &str,
        pagination: Pagination,
        filter: PlanFilter,
    ) -> Result<PaginatedResult<WorkoutPlan>, DomainError> {
        debug!("Listing workout plans");

        let user_id = require(user_id, "user id")?;
        let filter = PlanFilter {
            name: filter
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };

        let (plans, total) = self
            .repo
            .list_by_user(&user_id, &filter, pagination)
            .await
            .map_err(DomainError::storage)?;

        debug!(returned = plans.len(), total, "Listed workout plans");
        Ok(paginate(plans, total, pagination))
    }

    #[instrument(
        name = "workout_tracker.plans.get_plan",
        skip(self),
        fields(user_id = %user_id.trim(), plan_id = %plan_id.trim())
    )]
    pub async fn get_plan(&self, user_id: &str, plan_id: &str) -> Result<WorkoutPlan, DomainError> {
        debug!("Getting workout plan");

        let user_id = require(user_id, "user id")?;
        let plan_id = require(plan_id, "plan id")?;

        self.repo
            .find_by_id(&user_id, &plan_id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found("workout plan", plan_id))
    }

    #[instrument(
        name = "workout_tracker.plans.delete_plan",
        skip(self),
        fields(user_id = %user_id.trim(), plan_id = %plan_id.trim())
    )]
    pub async fn delete_plan(&self, user_id: &str, plan_id: &str) -> Result<(), DomainError> {
        info!("Deleting workout plan");

        let user_id = require(user_id, "user id")?;
        let plan_id = require(plan_id, "plan id")?;

        let deleted = self
            .repo
            .delete(&user_id, &plan_id)
            .await
            .map_err(DomainError::storage)?;

        if deleted {
            info!("Successfully deleted workout plan");
        } else {
            debug!("Workout plan already absent");
        }
        Ok(())
    }
}

pub(crate) fn require(value: &str, what: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::invalid_input(format!("{what} is required")));
    }
    Ok(value.to_string())
}

fn validate_plan(
    input: PlanInput,
) -> Result<(String, String, Vec<WorkoutPlanExercise>), DomainError> {
    let name = require(&input.name, "plan name")?;
    let notes = input.notes.trim().to_string();

    if input.exercises.is_empty() {
        return Err(DomainError::invalid_input(
            "a workout plan needs at least one exercise",
        ));
    }

    let mut exercises = input
        .exercises
        .into_iter()
        .enumerate()
        .map(|(i, ex)| validate_exercise(i, ex))
        .collect::<Result<Vec<_>, _>>()?;
    exercises.sort_by_key(|e| e.order_index);

    Ok((name, notes, exercises))
}

fn validate_exercise(
    position: usize,
    ex: PlanExerciseInput,
) -> Result<WorkoutPlanExercise, DomainError> {
    let exercise_id = ex.exercise_id.trim();
    if exercise_id.is_empty() {
        return Err(DomainError::invalid_input(format!(
            "exercises[{position}]: exercise id is required"
        )));
    }
    if ex.sets <= 0 {
        return Err(DomainError::invalid_input(format!(
            "exercises[{position}]: sets must be positive"
        )));
    }
    if ex.reps <= 0 {
        return Err(DomainError::invalid_input(format!(
            "exercises[{position}]: reps must be positive"
        )));
    }
    if !ex.weight.is_finite() || ex.weight < 0.0 {
        return Err(DomainError::invalid_input(format!(
            "exercises[{position}]: weight must be a non-negative number"
        )));
    }

    Ok(WorkoutPlanExercise {
        id: Uuid::new_v4().to_string(),
        exercise_id: exercise_id.to_string(),
        sets: ex.sets,
        reps: ex.reps,
        weight: ex.weight,
        order_index: ex.order_index.unwrap_or(position as i32),
    })
}

fn map_write_error(err: RepoError, plan_id: &str) -> DomainError {
    match err {
        RepoError::DanglingReference => {
            warn!(plan_id, "Workout plan references an unknown exercise");
            DomainError::invalid_input("unknown exercise id")
        }
        RepoError::Duplicate => DomainError::conflict(format!("workout plan {plan_id} already exists")),
        other => DomainError::storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;

    fn line(exercise_id: &str, sets: i32, reps: i32) -> PlanExerciseInput {
        PlanExerciseInput {
            exercise_id: exercise_id.to_string(),
            sets,
            reps,
            weight: 20.0,
            order_index: None,
        }
    }

    fn input(exercises: Vec<PlanExerciseInput>) -> PlanInput {
        PlanInput {
            name: "  Push day ".to_string(),
            notes: " heavy ".to_string(),
            exercises,
        }
    }

    #[test]
    fn validation_trims_and_orders() {
        let mut second = line(" squat ", 5, 5);
        second.order_index = Some(0);
        let mut first = line("bench", 3, 10);
        first.order_index = Some(1);

        let (name, notes, exercises) = validate_plan(input(vec![first, second])).unwrap();
        assert_eq!(name, "Push day");
        assert_eq!(notes, "heavy");
        assert_eq!(exercises[0].exercise_id, "squat");
        assert_eq!(exercises[1].exercise_id, "bench");
    }

    #[test]
    fn default_order_follows_input_position() {
        let (_, _, exercises) =
            validate_plan(input(vec![line("a", 1, 1), line("b", 1, 1)])).unwrap();
        assert_eq!(exercises[0].order_index, 0);
        assert_eq!(exercises[1].order_index, 1);
    }

    #[test]
    fn rejects_bad_lines() {
        for bad in [line("", 3, 10), line("x", 0, 10), line("x", 3, 0), line("x", -1, 5)] {
            let err = validate_plan(input(vec![bad])).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
        let err = validate_plan(input(vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn rejects_blank_name() {
        let mut i = input(vec![line("x", 1, 1)]);
        i.name = "   ".to_string();
        assert_eq!(validate_plan(i).unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn dangling_reference_is_invalid_input() {
        let err = map_write_error(RepoError::DanglingReference, "p1");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
