use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use modkit::api::problem::{Problem, ValidationError};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::rest::{dto, handlers};
use crate::domain::service::Services;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::register,
        handlers::login,
        handlers::me,
        handlers::list_exercises,
        handlers::get_exercise,
        handlers::list_plans,
        handlers::create_plan,
        handlers::get_plan,
        handlers::update_plan,
        handlers::delete_plan,
        handlers::list_schedules,
        handlers::schedule_workout,
        handlers::delete_schedule,
    ),
    components(schemas(
        Problem,
        ValidationError,
        dto::RegisterReq,
        dto::LoginReq,
        dto::UserDto,
        dto::TokenDto,
        dto::ExerciseDto,
        dto::PlanExerciseReq,
        dto::PlanReq,
        dto::PlanExerciseDto,
        dto::PlanDto,
        dto::PlanPageDto,
        dto::ScheduleReq,
        dto::ScheduleDto,
        dto::SchedulePageDto,
        dto::PaginationMeta,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and the current user"),
        (name = "exercises", description = "Exercise catalog"),
        (name = "workouts", description = "Workout plans"),
        (name = "schedules", description = "Scheduled workouts"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn register_routes(
    router: Router,
    openapi: &mut utoipa::openapi::OpenApi,
    services: Arc<Services>,
) -> anyhow::Result<Router> {
    let api = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/api/me", get(handlers::me))
        .route("/api/exercises", get(handlers::list_exercises))
        .route("/api/exercises/{id}", get(handlers::get_exercise))
        .route(
            "/api/workouts",
            get(handlers::list_plans).post(handlers::create_plan),
        )
        .route(
            "/api/workouts/{id}",
            get(handlers::get_plan)
                .put(handlers::update_plan)
                .delete(handlers::delete_plan),
        )
        .route(
            "/api/schedules",
            get(handlers::list_schedules).post(handlers::schedule_workout),
        )
        .route("/api/schedules/{id}", axum::routing::delete(handlers::delete_schedule))
        .layer(Extension(services));

    openapi.merge(ApiDoc::openapi());
    tracing::debug!(paths = openapi.paths.paths.len(), "workout_tracker routes registered");

    Ok(router.merge(api))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/register",
            "/auth/login",
            "/api/me",
            "/api/exercises",
            "/api/exercises/{id}",
            "/api/workouts",
            "/api/workouts/{id}",
            "/api/schedules",
            "/api/schedules/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = doc.components.as_ref().map(|c| c.security_schemes.len());
        assert_eq!(schemes, Some(1));
    }
}
