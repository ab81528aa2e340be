use thiserror::Error;

use crate::domain::repo::RepoError;

/// Closed set of failure classes every domain error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Storage or infrastructure failure; the message is for logs only.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Storage failure with no domain meaning at the call site.
    pub fn storage(err: RepoError) -> Self {
        Self::internal(format!("storage: {err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(DomainError::invalid_input("x").kind(), ErrorKind::InvalidInput);
        assert_eq!(DomainError::unauthorized("x").kind(), ErrorKind::Unauthorized);
        assert_eq!(DomainError::forbidden("x").kind(), ErrorKind::Forbidden);
        assert_eq!(DomainError::not_found("plan", "p1").kind(), ErrorKind::NotFound);
        assert_eq!(DomainError::conflict("x").kind(), ErrorKind::Conflict);
        assert_eq!(DomainError::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn storage_errors_become_internal() {
        let err = DomainError::storage(RepoError::Other(anyhow::anyhow!("disk full")));
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("disk full"));
    }
}
