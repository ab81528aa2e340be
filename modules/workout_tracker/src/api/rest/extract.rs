//! Request extractors shared by the handlers.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use modkit::api::problem::ProblemResponse;

use crate::api::rest::error::{from_parts, map_domain_error};
use crate::domain::error::DomainError;
use crate::domain::service::Services;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Path and request id of the current request, for problem responses.
#[derive(Debug, Clone)]
pub struct ReqMeta {
    pub path: String,
    pub request_id: Option<String>,
}

impl ReqMeta {
    fn from_parts(parts: &Parts) -> Self {
        Self {
            path: parts.uri.path().to_string(),
            request_id: parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        }
    }

    pub fn problem(&self, e: &DomainError) -> ProblemResponse {
        map_domain_error(e, &self.path, self.request_id.as_deref())
    }

    pub fn malformed(&self, detail: impl Into<String>) -> ProblemResponse {
        crate::api::rest::error::malformed_request(detail, &self.path, self.request_id.as_deref())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ReqMeta {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Id of the user behind a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let meta = ReqMeta::from_parts(parts);

        let Some(services) = parts.extensions.get::<Arc<Services>>().cloned() else {
            tracing::error!("Services extension missing on an authenticated route");
            return Err(meta.problem(&DomainError::internal("services not wired")));
        };

        let Some(token) = bearer_token(parts) else {
            return Err(from_parts(
                axum::http::StatusCode::UNAUTHORIZED,
                "WORKOUTS_UNAUTHORIZED",
                "Unauthorized",
                "missing bearer token",
                &meta.path,
                meta.request_id.as_deref(),
            ));
        };

        services
            .auth
            .authenticate(token)
            .map(AuthUser)
            .map_err(|e| meta.problem(&e))
    }
}
