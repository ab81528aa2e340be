use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::contract::model::{
    Exercise, Pagination, PlanFilter, ScheduleFilter, ScheduledWorkout, User, WorkoutPlan,
};

/// Storage failures the domain distinguishes; everything else is `Other`.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("unique constraint violated")]
    Duplicate,

    #[error("referenced row does not exist")]
    DanglingReference,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// A user row together with its password hash. Never leaves the domain.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a new account. `Duplicate` when the email is taken.
    async fn insert(&self, user: User, password_hash: String) -> RepoResult<()>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;
    /// `email` is expected lowercased.
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>>;
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;
}

#[async_trait]
pub trait ExercisesRepository: Send + Sync {
    /// All catalog entries ordered by name.
    async fn list_all(&self) -> RepoResult<Vec<Exercise>>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Exercise>>;
}

/// Persistence port for workout plans.
///
/// Every read and write is scoped to the owning user; a plan owned by
/// someone else behaves exactly like a missing one.
#[async_trait]
pub trait PlansRepository: Send + Sync {
    /// Insert the plan and all of its exercise rows atomically.
    async fn create(&self, plan: &WorkoutPlan) -> RepoResult<()>;

    /// Replace name, notes and the whole exercise list of a plan owned by
    /// `plan.user_id`, in one transaction. Returns the stored plan, or `None`
    /// when no such plan is owned by that user.
    async fn update(&self, plan: &WorkoutPlan) -> RepoResult<Option<WorkoutPlan>>;

    /// Page of the user's plans, newest first, plus the total match count.
    async fn list_by_user(
        &self,
        user_id: &str,
        filter: &PlanFilter,
        page: Pagination,
    ) -> RepoResult<(Vec<WorkoutPlan>, i64)>;

    async fn find_by_id(&self, user_id: &str, plan_id: &str) -> RepoResult<Option<WorkoutPlan>>;

    /// Remove the plan with its exercises and schedules. Returns whether a row was deleted.
    async fn delete(&self, user_id: &str, plan_id: &str) -> RepoResult<bool>;
}

/// Resolves which user owns a plan, regardless of who is asking.
#[async_trait]
pub trait PlanOwnerLookup: Send + Sync {
    async fn owner_of(&self, plan_id: &str) -> RepoResult<Option<String>>;
}

#[async_trait]
pub trait SchedulesRepository: Send + Sync {
    /// `Duplicate` when (user, plan, date) already exists.
    async fn insert(&self, schedule: &ScheduledWorkout) -> RepoResult<()>;

    async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> RepoResult<Vec<ScheduledWorkout>>;

    /// Page ordered by scheduled date then creation time, both descending.
    async fn list_by_user(
        &self,
        user_id: &str,
        filter: &ScheduleFilter,
        page: Pagination,
    ) -> RepoResult<(Vec<ScheduledWorkout>, i64)>;

    /// Returns whether a row owned by `user_id` was deleted.
    async fn delete(&self, id: &str, user_id: &str) -> RepoResult<bool>;
}
