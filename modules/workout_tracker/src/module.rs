use std::sync::Arc;

use async_trait::async_trait;
use modkit::{DbModule, Module, ModuleCtx, RestfulModule};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::WorkoutTrackerConfig;
use crate::contract::client::WorkoutTrackerApi;
use crate::domain::service::{AuthService, ExerciseService, PlanService, ScheduleService, Services};
use crate::gateways::local::WorkoutTrackerLocalClient;
use crate::infra::auth::{Argon2PasswordHasher, JwtCredentialService};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::{
    SeaOrmExercisesRepository, SeaOrmPlansRepository, SeaOrmSchedulesRepository,
    SeaOrmUsersRepository,
};

/// Wire SeaORM repositories and the credential adapters into the domain services.
pub fn build_services(conn: DatabaseConnection, cfg: &WorkoutTrackerConfig) -> Services {
    let plans = Arc::new(SeaOrmPlansRepository::new(conn.clone()));
    let credentials = Arc::new(JwtCredentialService::new(
        &cfg.jwt_secret,
        cfg.jwt_issuer.clone(),
        cfg.token_ttl_secs,
    ));

    Services {
        auth: AuthService::new(
            Arc::new(SeaOrmUsersRepository::new(conn.clone())),
            credentials,
            Arc::new(Argon2PasswordHasher::default()),
        )
        .with_min_password_len(cfg.min_password_len),
        exercises: ExerciseService::new(Arc::new(SeaOrmExercisesRepository::new(conn.clone()))),
        plans: PlanService::new(plans.clone()),
        schedules: ScheduleService::new(Arc::new(SeaOrmSchedulesRepository::new(conn)), plans),
    }
}

/// Workout plans, scheduling, exercise catalog and local accounts.
#[derive(Default)]
pub struct WorkoutTracker {
    services: arc_swap::ArcSwapOption<Services>,
}

impl WorkoutTracker {
    /// In-process client, available once `init` has run.
    pub fn client(&self) -> Option<Arc<dyn WorkoutTrackerApi>> {
        self.services
            .load_full()
            .map(|s| Arc::new(WorkoutTrackerLocalClient::new(s)) as Arc<dyn WorkoutTrackerApi>)
    }
}

#[async_trait]
impl Module for WorkoutTracker {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing workout_tracker module");

        let cfg: WorkoutTrackerConfig = ctx.module_config()?;
        cfg.validate()?;
        debug!(
            issuer = %cfg.jwt_issuer,
            token_ttl_secs = cfg.token_ttl_secs,
            min_password_len = cfg.min_password_len,
            "Loaded workout_tracker config"
        );

        let db = ctx.db_required()?;
        let services = build_services(db.sea(), &cfg);
        self.services.store(Some(Arc::new(services)));

        info!("workout_tracker services wired");
        Ok(())
    }
}

#[async_trait]
impl DbModule for WorkoutTracker {
    async fn migrate(&self, db: &modkit_db::DbHandle) -> anyhow::Result<()> {
        info!("Running workout_tracker database migrations");
        Migrator::up(db.seaorm(), None).await?;
        info!("workout_tracker database migrations completed successfully");
        Ok(())
    }
}

impl RestfulModule for WorkoutTracker {
    fn register_rest(
        &self,
        _ctx: &ModuleCtx,
        router: axum::Router,
        openapi: &mut utoipa::openapi::OpenApi,
    ) -> anyhow::Result<axum::Router> {
        info!("Registering workout_tracker REST routes");

        let services = self
            .services
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Services not initialized"))?;

        routes::register_routes(router, openapi, services)
    }
}
