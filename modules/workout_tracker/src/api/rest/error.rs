use axum::http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse};

use crate::domain::error::{DomainError, ErrorKind};

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
    request_id: Option<&str>,
) -> ProblemResponse {
    let mut problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.workout-tracker.dev/{code}"))
        .with_code(code)
        .with_instance(instance);
    if let Some(id) = request_id {
        problem = problem.with_request_id(id);
    }
    ProblemResponse(problem)
}

pub fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str, &'static str) {
    match kind {
        ErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, "WORKOUTS_INVALID_INPUT", "Invalid input"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "WORKOUTS_UNAUTHORIZED", "Unauthorized"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "WORKOUTS_FORBIDDEN", "Forbidden"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "WORKOUTS_NOT_FOUND", "Not found"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "WORKOUTS_CONFLICT", "Conflict"),
        ErrorKind::Internal => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "WORKOUTS_INTERNAL",
            "Internal error",
        ),
    }
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str, request_id: Option<&str>) -> ProblemResponse {
    let (status, code, title) = status_and_code(e.kind());
    let detail = match e {
        DomainError::Internal { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = %e, "Internal error while handling request");
            "An internal error occurred".to_string()
        }
        DomainError::Forbidden { message } | DomainError::Unauthorized { message } => {
            message.clone()
        }
        other => other.to_string(),
    };
    from_parts(status, code, title, detail, instance, request_id)
}

/// 400 for bodies or query strings that could not be decoded.
pub fn malformed_request(detail: impl Into<String>, instance: &str, request_id: Option<&str>) -> ProblemResponse {
    let (status, code, title) = status_and_code(ErrorKind::InvalidInput);
    from_parts(status, code, title, detail, instance, request_id)
}
