use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutTrackerError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error")]
    Internal,
}

impl From<DomainError> for WorkoutTrackerError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput { message } => Self::InvalidInput { message },
            DomainError::Unauthorized { .. } => Self::Unauthorized,
            DomainError::Forbidden { .. } => Self::Forbidden,
            DomainError::NotFound { entity, id } => Self::NotFound {
                entity: entity.to_string(),
                id,
            },
            DomainError::Conflict { message } => Self::Conflict { message },
            DomainError::Internal { .. } => Self::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_details_are_dropped() {
        let e: WorkoutTrackerError = DomainError::internal("connection refused").into();
        assert_eq!(e, WorkoutTrackerError::Internal);
        assert!(!e.to_string().contains("refused"));
    }

    #[test]
    fn not_found_keeps_the_entity() {
        let e: WorkoutTrackerError = DomainError::not_found("workout plan", "p1").into();
        assert_eq!(
            e,
            WorkoutTrackerError::NotFound {
                entity: "workout plan".into(),
                id: "p1".into()
            }
        );
    }
}
