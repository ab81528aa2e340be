//! In-memory fakes of the repository ports plus helpers shared by the
//! integration test binaries.
#![allow(dead_code)]

#[cfg(feature = "integration")]
pub mod postgres;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use parking_lot::Mutex;

use workout_tracker::contract::model::{
    AuthToken, Exercise, Pagination, PlanExerciseInput, PlanFilter, PlanInput, ScheduleFilter,
    ScheduledWorkout, User, WorkoutPlan,
};
use workout_tracker::domain::ports::{CredentialService, PasswordHasher};
use workout_tracker::domain::repo::{
    ExercisesRepository, PlanOwnerLookup, PlansRepository, RepoError, RepoResult,
    SchedulesRepository, UserRecord, UsersRepository,
};
use workout_tracker::domain::service::{
    AuthService, ExerciseService, PlanService, ScheduleService, Services,
};

fn page<T: Clone>(items: &[T], p: Pagination) -> Vec<T> {
    items
        .iter()
        .skip(p.offset() as usize)
        .take(p.limit as usize)
        .cloned()
        .collect()
}

// ---------- users ----------

#[derive(Default)]
pub struct FakeUsers {
    rows: Mutex<HashMap<String, UserRecord>>,
}

#[async_trait]
impl UsersRepository for FakeUsers {
    async fn insert(&self, user: User, password_hash: String) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        if rows.values().any(|r| r.user.email == user.email) {
            return Err(RepoError::Duplicate);
        }
        rows.insert(
            user.id.clone(),
            UserRecord {
                user,
                password_hash,
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.rows.lock().get(id).map(|r| r.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        Ok(self
            .rows
            .lock()
            .values()
            .find(|r| r.user.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.rows.lock().values().any(|r| r.user.email == email))
    }
}

// ---------- exercises ----------

pub struct FakeExercises {
    rows: Vec<Exercise>,
}

impl FakeExercises {
    pub fn with(names: &[(&str, &str)]) -> Self {
        let mut rows: Vec<Exercise> = names
            .iter()
            .map(|(id, name)| Exercise {
                id: id.to_string(),
                name: name.to_string(),
                description: String::new(),
                category: "strength".to_string(),
                muscle_group: String::new(),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Self { rows }
    }
}

#[async_trait]
impl ExercisesRepository for FakeExercises {
    async fn list_all(&self) -> RepoResult<Vec<Exercise>> {
        Ok(self.rows.clone())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Exercise>> {
        Ok(self.rows.iter().find(|e| e.id == id).cloned())
    }
}

// ---------- plans ----------

#[derive(Default)]
pub struct FakePlans {
    rows: Mutex<Vec<WorkoutPlan>>,
    /// When set, exercise ids outside this set behave like a foreign key failure.
    known_exercises: Option<HashSet<String>>,
    /// Schedules store to cascade into on delete.
    schedules: Option<Arc<FakeSchedules>>,
}

impl FakePlans {
    pub fn with_catalog(ids: &[&str]) -> Self {
        Self {
            known_exercises: Some(ids.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn cascading_to(mut self, schedules: Arc<FakeSchedules>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    /// Seed a plan directly, bypassing validation.
    pub fn seed(&self, id: &str, user_id: &str, name: &str) {
        let now = Utc::now();
        self.rows.lock().push(WorkoutPlan {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            notes: String::new(),
            exercises: vec![],
            created_at: now,
            updated_at: now,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    fn check_refs(&self, plan: &WorkoutPlan) -> RepoResult<()> {
        if let Some(known) = &self.known_exercises {
            if plan.exercises.iter().any(|e| !known.contains(&e.exercise_id)) {
                return Err(RepoError::DanglingReference);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PlansRepository for FakePlans {
    async fn create(&self, plan: &WorkoutPlan) -> RepoResult<()> {
        self.check_refs(plan)?;
        let mut rows = self.rows.lock();
        if rows.iter().any(|p| p.id == plan.id) {
            return Err(RepoError::Duplicate);
        }
        rows.push(plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &WorkoutPlan) -> RepoResult<Option<WorkoutPlan>> {
        self.check_refs(plan)?;
        let mut rows = self.rows.lock();
        let Some(existing) = rows
            .iter_mut()
            .find(|p| p.id == plan.id && p.user_id == plan.user_id)
        else {
            return Ok(None);
        };
        existing.name = plan.name.clone();
        existing.notes = plan.notes.clone();
        existing.exercises = plan.exercises.clone();
        existing.updated_at = plan.updated_at;
        Ok(Some(existing.clone()))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        filter: &PlanFilter,
        p: Pagination,
    ) -> RepoResult<(Vec<WorkoutPlan>, i64)> {
        let needle = filter.name.as_deref().map(str::to_lowercase);
        let mut matching: Vec<WorkoutPlan> = self
            .rows
            .lock()
            .iter()
            .filter(|plan| plan.user_id == user_id)
            .filter(|plan| match &needle {
                Some(n) => plan.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        // Newest first; equal timestamps keep latest-inserted first.
        matching.reverse();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matching.len() as i64;
        Ok((page(&matching, p), total))
    }

    async fn find_by_id(&self, user_id: &str, plan_id: &str) -> RepoResult<Option<WorkoutPlan>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|p| p.id == plan_id && p.user_id == user_id)
            .cloned())
    }

    async fn delete(&self, user_id: &str, plan_id: &str) -> RepoResult<bool> {
        let removed = {
            let mut rows = self.rows.lock();
            let before = rows.len();
            rows.retain(|p| !(p.id == plan_id && p.user_id == user_id));
            rows.len() != before
        };
        if removed {
            if let Some(schedules) = &self.schedules {
                schedules.remove_plan(plan_id);
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl PlanOwnerLookup for FakePlans {
    async fn owner_of(&self, plan_id: &str) -> RepoResult<Option<String>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|p| p.id == plan_id)
            .map(|p| p.user_id.clone()))
    }
}

// ---------- schedules ----------

/// Enforces (user, plan, date) uniqueness at insert, like the unique index.
#[derive(Default)]
pub struct FakeSchedules {
    rows: Mutex<Vec<ScheduledWorkout>>,
}

impl FakeSchedules {
    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    fn remove_plan(&self, plan_id: &str) {
        self.rows.lock().retain(|s| s.workout_plan_id != plan_id);
    }
}

#[async_trait]
impl SchedulesRepository for FakeSchedules {
    async fn insert(&self, schedule: &ScheduledWorkout) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|s| {
            s.user_id == schedule.user_id
                && s.workout_plan_id == schedule.workout_plan_id
                && s.scheduled_date == schedule.scheduled_date
        }) {
            return Err(RepoError::Duplicate);
        }
        rows.push(schedule.clone());
        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> RepoResult<Vec<ScheduledWorkout>> {
        let found = self
            .rows
            .lock()
            .iter()
            .filter(|s| s.user_id == user_id && s.scheduled_date == date)
            .cloned()
            .collect();
        // Let a concurrent caller interleave between check and insert.
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        filter: &ScheduleFilter,
        p: Pagination,
    ) -> RepoResult<(Vec<ScheduledWorkout>, i64)> {
        let mut matching: Vec<ScheduledWorkout> = self
            .rows
            .lock()
            .iter()
            .filter(|s| s.user_id == user_id)
            .filter(|s| filter.date.map_or(true, |d| s.scheduled_date == d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.scheduled_date
                .cmp(&a.scheduled_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        let total = matching.len() as i64;
        Ok((page(&matching, p), total))
    }

    async fn delete(&self, id: &str, user_id: &str) -> RepoResult<bool> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|s| !(s.id == id && s.user_id == user_id));
        Ok(rows.len() != before)
    }
}

// ---------- credentials ----------

/// Tokens are `token:<user id>`.
pub struct FakeCredentials;

impl CredentialService for FakeCredentials {
    fn issue(&self, user_id: &str) -> anyhow::Result<AuthToken> {
        Ok(AuthToken {
            access_token: format!("token:{user_id}"),
            expires_at: Utc::now() + Duration::hours(1),
        })
    }

    fn validate(&self, token: &str) -> anyhow::Result<String> {
        token
            .strip_prefix("token:")
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("unknown token"))
    }
}

pub struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash == format!("hashed:{password}")
    }
}

// ---------- wiring ----------

pub struct Fixture {
    pub users: Arc<FakeUsers>,
    pub plans: Arc<FakePlans>,
    pub schedules: Arc<FakeSchedules>,
    pub services: Services,
}

pub fn fixture() -> Fixture {
    let users = Arc::new(FakeUsers::default());
    let schedules = Arc::new(FakeSchedules::default());
    let plans = Arc::new(
        FakePlans::with_catalog(&["squat", "bench-press", "deadlift"]).cascading_to(schedules.clone()),
    );
    let exercises = Arc::new(FakeExercises::with(&[
        ("squat", "Squat"),
        ("bench-press", "Bench Press"),
        ("deadlift", "Deadlift"),
    ]));

    let services = Services {
        auth: AuthService::new(users.clone(), Arc::new(FakeCredentials), Arc::new(FakeHasher)),
        exercises: ExerciseService::new(exercises),
        plans: PlanService::new(plans.clone()),
        schedules: ScheduleService::new(schedules.clone(), plans.clone()),
    };

    Fixture {
        users,
        plans,
        schedules,
        services,
    }
}

pub fn line(exercise_id: &str, sets: i32, reps: i32) -> PlanExerciseInput {
    PlanExerciseInput {
        exercise_id: exercise_id.to_string(),
        sets,
        reps,
        weight: 0.0,
        order_index: None,
    }
}

pub fn plan_input(name: &str, exercises: Vec<PlanExerciseInput>) -> PlanInput {
    PlanInput {
        name: name.to_string(),
        notes: String::new(),
        exercises,
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(days: i64) -> chrono::DateTime<Utc> {
    (today() + Duration::days(days))
        .and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}
