//! Repository behavior against a real Postgres. Needs Docker:
//! `cargo test -p workout_tracker --features integration`.
#![cfg(feature = "integration")]

mod common;

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use sea_orm_migration::MigratorTrait;

use common::postgres::bring_up_postgres;
use workout_tracker::{
    build_services,
    config::WorkoutTrackerConfig,
    contract::model::{NewUser, Pagination, PlanExerciseInput, PlanFilter, PlanInput, ScheduleFilter},
    domain::error::ErrorKind,
    infra::storage::migrations::Migrator,
};

fn plan(name: &str) -> PlanInput {
    PlanInput {
        name: name.into(),
        notes: String::new(),
        exercises: vec![PlanExerciseInput {
            exercise_id: "squat".into(),
            sets: 5,
            reps: 5,
            weight: 100.0,
            order_index: None,
        }],
    }
}

#[tokio::test]
async fn postgres_end_to_end() -> Result<()> {
    let pg = bring_up_postgres().await?;
    let db = modkit_db::DbHandle::connect(&pg.url, modkit_db::ConnectOpts::default()).await?;
    Migrator::up(db.seaorm(), None).await?;
    // Second run is a no-op.
    Migrator::up(db.seaorm(), None).await?;

    let cfg = WorkoutTrackerConfig {
        jwt_secret: "pg-secret".into(),
        ..Default::default()
    };
    let services = Arc::new(build_services(db.sea(), &cfg));
    assert_eq!(services.exercises.list_exercises().await?.len(), 20);

    let user = services
        .auth
        .register(NewUser {
            name: "Pg".into(),
            email: "pg@example.com".into(),
            password: "secret123".into(),
        })
        .await?;
    let p = services.plans.create_plan(&user.id, plan("Legs")).await?;
    services.plans.create_plan(&user.id, plan("legs two")).await?;

    let found = services
        .plans
        .get_plans(&user.id, Pagination::default(), PlanFilter { name: Some("LEGS".into()) })
        .await?;
    assert_eq!(found.total, 2);

    let mut bad = plan("Bad");
    bad.exercises[0].exercise_id = "unknown".into();
    let err = services.plans.create_plan(&user.id, bad).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let day = Utc::now() + Duration::days(3);
    services.schedules.schedule_workout(&user.id, &p.id, day).await?;

    // Two callers racing for the same slot: exactly one wins.
    let a = {
        let s = services.clone();
        let (u, id) = (user.id.clone(), p.id.clone());
        tokio::spawn(async move { s.schedules.schedule_workout(&u, &id, day + Duration::days(1)).await })
    };
    let b = {
        let s = services.clone();
        let (u, id) = (user.id.clone(), p.id.clone());
        tokio::spawn(async move { s.schedules.schedule_workout(&u, &id, day + Duration::days(1)).await })
    };
    let results = [a.await?, b.await?];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = results.iter().find_map(|r| r.as_ref().err()).map(|e| e.kind());
    assert_eq!(loser, Some(ErrorKind::Conflict));

    let listed = services
        .schedules
        .get_schedules(&user.id, Pagination::default(), ScheduleFilter::default())
        .await?;
    assert_eq!(listed.total, 2);
    assert!(listed.data[0].scheduled_date > listed.data[1].scheduled_date);

    services.plans.delete_plan(&user.id, &p.id).await?;
    let after = services
        .schedules
        .get_schedules(&user.id, Pagination::default(), ScheduleFilter::default())
        .await?;
    assert_eq!(after.total, 0);
    Ok(())
}
