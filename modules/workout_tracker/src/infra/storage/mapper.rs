use sea_orm::{DbErr, SqlErr};

use crate::contract::model::{Exercise, ScheduledWorkout, User, WorkoutPlan, WorkoutPlanExercise};
use crate::domain::repo::{RepoError, UserRecord};
use crate::infra::storage::entity::{
    exercises, scheduled_workouts, users, workout_plan_exercises, workout_plans,
};

impl From<DbErr> for RepoError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RepoError::Duplicate,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => RepoError::DanglingReference,
            _ => RepoError::Other(anyhow::Error::new(err)),
        }
    }
}

pub fn user_to_contract(m: users::Model) -> User {
    User {
        id: m.id,
        name: m.name,
        email: m.email,
        created_at: m.created_at,
    }
}

pub fn user_to_record(m: users::Model) -> UserRecord {
    let password_hash = m.password_hash.clone();
    UserRecord {
        user: user_to_contract(m),
        password_hash,
    }
}

pub fn exercise_to_contract(m: exercises::Model) -> Exercise {
    Exercise {
        id: m.id,
        name: m.name,
        description: m.description.unwrap_or_default(),
        category: m.category.unwrap_or_default(),
        muscle_group: m.muscle_group.unwrap_or_default(),
    }
}

pub fn plan_to_contract(
    m: workout_plans::Model,
    exercises: Vec<workout_plan_exercises::Model>,
) -> WorkoutPlan {
    WorkoutPlan {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        notes: m.notes.unwrap_or_default(),
        exercises: exercises.into_iter().map(plan_exercise_to_contract).collect(),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub fn plan_exercise_to_contract(m: workout_plan_exercises::Model) -> WorkoutPlanExercise {
    WorkoutPlanExercise {
        id: m.id,
        exercise_id: m.exercise_id,
        sets: m.sets,
        reps: m.reps,
        weight: m.weight,
        order_index: m.order_index,
    }
}

pub fn schedule_to_contract(m: scheduled_workouts::Model) -> ScheduledWorkout {
    ScheduledWorkout {
        id: m.id,
        user_id: m.user_id,
        workout_plan_id: m.workout_plan_id,
        scheduled_date: m.scheduled_date,
        created_at: m.created_at,
    }
}

/// Empty notes are stored as NULL.
pub fn notes_to_column(notes: &str) -> Option<String> {
    if notes.is_empty() {
        None
    } else {
        Some(notes.to_string())
    }
}
