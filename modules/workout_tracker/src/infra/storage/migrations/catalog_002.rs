//! Built-in exercise catalog. Ids are stable slugs so plans stay portable
//! between databases.

use sea_orm_migration::prelude::*;

use super::initial_001::Exercises;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("bench-press", "Bench Press", "strength", "chest"),
    ("squat", "Squat", "strength", "legs"),
    ("deadlift", "Deadlift", "strength", "back"),
    ("pull-up", "Pull Up", "strength", "back"),
    ("push-up", "Push Up", "strength", "chest"),
    ("lunges", "Lunges", "strength", "legs"),
    ("plank", "Plank", "strength", "core"),
    ("shoulder-press", "Shoulder Press", "strength", "shoulders"),
    ("bicep-curl", "Bicep Curl", "strength", "arms"),
    ("tricep-dip", "Tricep Dip", "strength", "arms"),
    ("running", "Running", "cardio", "legs"),
    ("cycling", "Cycling", "cardio", "legs"),
    ("jump-rope", "Jump Rope", "cardio", "core"),
    ("leg-press", "Leg Press", "strength", "legs"),
    ("lat-pulldown", "Lat Pulldown", "strength", "back"),
    ("chest-fly", "Chest Fly", "strength", "chest"),
    ("leg-curl", "Leg Curl", "strength", "legs"),
    ("leg-extension", "Leg Extension", "strength", "legs"),
    ("russian-twist", "Russian Twist", "flexibility", "core"),
    ("mountain-climbers", "Mountain Climbers", "cardio", "core"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Exercises::Table)
            .columns([
                Exercises::Id,
                Exercises::Name,
                Exercises::Category,
                Exercises::MuscleGroup,
            ])
            .on_conflict(OnConflict::column(Exercises::Name).do_nothing().to_owned());
        for (id, name, category, muscle_group) in CATALOG {
            insert
                .values([
                    (*id).into(),
                    (*name).into(),
                    (*category).into(),
                    (*muscle_group).into(),
                ])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids = CATALOG.iter().map(|(id, ..)| *id);
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Exercises::Table)
                    .and_where(Expr::col(Exercises::Id).is_in(ids))
                    .to_owned(),
            )
            .await
    }
}
