use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use modkit::api::problem::{Problem, ProblemResponse};
use tracing::{debug, info};

use crate::api::rest::dto::{
    parse_date_input, ExerciseDto, ListPlansQuery, ListSchedulesQuery, LoginReq, PlanDto,
    PlanPageDto, PlanReq, RegisterReq, ScheduleDto, SchedulePageDto, ScheduleReq, TokenDto,
    UserDto,
};
use crate::api::rest::extract::{AuthUser, ReqMeta};
use crate::contract::model::{PlanFilter, ScheduleFilter};
use crate::domain::service::Services;

type Svc = Extension<Arc<Services>>;

fn body<T>(meta: &ReqMeta, req: Result<Json<T>, JsonRejection>) -> Result<T, ProblemResponse> {
    req.map(|Json(v)| v).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        meta.malformed(e.body_text())
    })
}

fn query<T>(meta: &ReqMeta, q: Result<Query<T>, QueryRejection>) -> Result<T, ProblemResponse> {
    q.map(|Query(v)| v).map_err(|e| {
        debug!(error = %e, "Rejected query string");
        meta.malformed(e.body_text())
    })
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    operation_id = "workout_tracker.register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Email already registered", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn register(
    Extension(svc): Svc,
    meta: ReqMeta,
    req: Result<Json<RegisterReq>, JsonRejection>,
) -> Result<impl IntoResponse, ProblemResponse> {
    let req = body(&meta, req)?;
    let user = svc
        .auth
        .register(req.into())
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Exchange email and password for an access token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    operation_id = "workout_tracker.login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Access token", body = TokenDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Invalid credentials", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn login(
    Extension(svc): Svc,
    meta: ReqMeta,
    req: Result<Json<LoginReq>, JsonRejection>,
) -> Result<Json<TokenDto>, ProblemResponse> {
    let req = body(&meta, req)?;
    let token = svc
        .auth
        .login(&req.email, &req.password)
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(token.into()))
}

/// Current user
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "auth",
    operation_id = "workout_tracker.me",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserDto),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn me(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
) -> Result<Json<UserDto>, ProblemResponse> {
    let user = svc
        .auth
        .get_user(&user_id)
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(user.into()))
}

/// List the exercise catalog
#[utoipa::path(
    get,
    path = "/api/exercises",
    tag = "exercises",
    operation_id = "workout_tracker.list_exercises",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All exercises by name", body = [ExerciseDto]),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_exercises(
    Extension(svc): Svc,
    _user: AuthUser,
    meta: ReqMeta,
) -> Result<Json<Vec<ExerciseDto>>, ProblemResponse> {
    let items = svc
        .exercises
        .list_exercises()
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Get one exercise
#[utoipa::path(
    get,
    path = "/api/exercises/{id}",
    tag = "exercises",
    operation_id = "workout_tracker.get_exercise",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Exercise id")),
    responses(
        (status = 200, description = "Exercise found", body = ExerciseDto),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_exercise(
    Extension(svc): Svc,
    _user: AuthUser,
    meta: ReqMeta,
    Path(id): Path<String>,
) -> Result<Json<ExerciseDto>, ProblemResponse> {
    let ex = svc
        .exercises
        .get_exercise(&id)
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(ex.into()))
}

/// List the caller's workout plans, newest first
#[utoipa::path(
    get,
    path = "/api/workouts",
    tag = "workouts",
    operation_id = "workout_tracker.list_plans",
    security(("bearer" = [])),
    params(ListPlansQuery),
    responses(
        (status = 200, description = "Page of plans", body = PlanPageDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_plans(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    q: Result<Query<ListPlansQuery>, QueryRejection>,
) -> Result<Json<PlanPageDto>, ProblemResponse> {
    let q = query(&meta, q)?;
    let page = svc
        .plans
        .get_plans(&user_id, q.pagination(), PlanFilter { name: q.name })
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(page.into()))
}

/// Create a workout plan
#[utoipa::path(
    post,
    path = "/api/workouts",
    tag = "workouts",
    operation_id = "workout_tracker.create_plan",
    security(("bearer" = [])),
    request_body = PlanReq,
    responses(
        (status = 201, description = "Created plan", body = PlanDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_plan(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    req: Result<Json<PlanReq>, JsonRejection>,
) -> Result<impl IntoResponse, ProblemResponse> {
    let req = body(&meta, req)?;
    let plan = svc
        .plans
        .create_plan(&user_id, req.into())
        .await
        .map_err(|e| meta.problem(&e))?;
    info!(plan_id = %plan.id, "Workout plan created via REST");
    Ok((StatusCode::CREATED, Json(PlanDto::from(plan))))
}

/// Get one of the caller's plans
#[utoipa::path(
    get,
    path = "/api/workouts/{id}",
    tag = "workouts",
    operation_id = "workout_tracker.get_plan",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Workout plan id")),
    responses(
        (status = 200, description = "Plan found", body = PlanDto),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_plan(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    Path(id): Path<String>,
) -> Result<Json<PlanDto>, ProblemResponse> {
    let plan = svc
        .plans
        .get_plan(&user_id, &id)
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(plan.into()))
}

/// Replace name, notes and exercises of a plan
#[utoipa::path(
    put,
    path = "/api/workouts/{id}",
    tag = "workouts",
    operation_id = "workout_tracker.update_plan",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Workout plan id")),
    request_body = PlanReq,
    responses(
        (status = 200, description = "Updated plan", body = PlanDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_plan(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    Path(id): Path<String>,
    req: Result<Json<PlanReq>, JsonRejection>,
) -> Result<Json<PlanDto>, ProblemResponse> {
    let req = body(&meta, req)?;
    let plan = svc
        .plans
        .update_plan(&user_id, &id, req.into())
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(plan.into()))
}

/// Delete a plan together with its schedules
#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    tag = "workouts",
    operation_id = "workout_tracker.delete_plan",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Workout plan id")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_plan(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    Path(id): Path<String>,
) -> Result<StatusCode, ProblemResponse> {
    svc.plans
        .delete_plan(&user_id, &id)
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the caller's scheduled workouts
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "schedules",
    operation_id = "workout_tracker.list_schedules",
    security(("bearer" = [])),
    params(ListSchedulesQuery),
    responses(
        (status = 200, description = "Page of scheduled workouts", body = SchedulePageDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_schedules(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    q: Result<Query<ListSchedulesQuery>, QueryRejection>,
) -> Result<Json<SchedulePageDto>, ProblemResponse> {
    let q = query(&meta, q)?;
    let date = match q.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => Some(parse_date_input(raw).map_err(|e| meta.malformed(e))?.date_naive()),
        None => None,
    };
    let page = svc
        .schedules
        .get_schedules(&user_id, q.pagination(), ScheduleFilter { date })
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(Json(page.into()))
}

/// Schedule one of the caller's plans on a date
#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "schedules",
    operation_id = "workout_tracker.schedule_workout",
    security(("bearer" = [])),
    request_body = ScheduleReq,
    responses(
        (status = 201, description = "Scheduled", body = ScheduleDto),
        (status = 400, description = "Bad Request or date in the past", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Plan belongs to another user", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Plan not found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Already scheduled on that date", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn schedule_workout(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    req: Result<Json<ScheduleReq>, JsonRejection>,
) -> Result<impl IntoResponse, ProblemResponse> {
    let req = body(&meta, req)?;
    let when = parse_date_input(&req.scheduled_date).map_err(|e| meta.malformed(e))?;
    let schedule = svc
        .schedules
        .schedule_workout(&user_id, &req.workout_plan_id, when)
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok((StatusCode::CREATED, Json(ScheduleDto::from(schedule))))
}

/// Remove a scheduled workout
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "schedules",
    operation_id = "workout_tracker.delete_schedule",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Scheduled workout id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorized", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_schedule(
    Extension(svc): Svc,
    AuthUser(user_id): AuthUser,
    meta: ReqMeta,
    Path(id): Path<String>,
) -> Result<StatusCode, ProblemResponse> {
    svc.schedules
        .delete_schedule(&id, &user_id)
        .await
        .map_err(|e| meta.problem(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
