use std::sync::Arc;

use tracing::{debug, instrument};

use crate::contract::model::Exercise;
use crate::domain::error::DomainError;
use crate::domain::repo::ExercisesRepository;
use crate::domain::service::plans::require;

/// Read-only access to the exercise catalog.
#[derive(Clone)]
pub struct ExerciseService {
    repo: Arc<dyn ExercisesRepository>,
}

impl ExerciseService {
    pub fn new(repo: Arc<dyn ExercisesRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "workout_tracker.exercises.list_exercises", skip(self))]
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, DomainError> {
        let items = self.repo.list_all().await.map_err(DomainError::storage)?;
        debug!(count = items.len(), "Listed exercises");
        Ok(items)
    }

    #[instrument(name = "workout_tracker.exercises.get_exercise", skip(self), fields(exercise_id = %id.trim()))]
    pub async fn get_exercise(&self, id: &str) -> Result<Exercise, DomainError> {
        let id = require(id, "exercise id")?;
        self.repo
            .find_by_id(&id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found("exercise", id))
    }
}
