use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Exercises {
    Table,
    Id,
    Name,
    Description,
    Category,
    MuscleGroup,
}

#[derive(DeriveIden)]
enum WorkoutPlans {
    Table,
    Id,
    UserId,
    Name,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WorkoutPlanExercises {
    Table,
    Id,
    WorkoutPlanId,
    ExerciseId,
    Sets,
    Reps,
    Weight,
    OrderIndex,
}

#[derive(DeriveIden)]
enum ScheduledWorkouts {
    Table,
    Id,
    UserId,
    WorkoutPlanId,
    ScheduledDate,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Exercises::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Exercises::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Exercises::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Exercises::Description).text().null())
                    .col(ColumnDef::new(Exercises::Category).string().null())
                    .col(ColumnDef::new(Exercises::MuscleGroup).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkoutPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkoutPlans::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkoutPlans::UserId).string().not_null())
                    .col(ColumnDef::new(WorkoutPlans::Name).string().not_null())
                    .col(ColumnDef::new(WorkoutPlans::Notes).text().null())
                    .col(
                        ColumnDef::new(WorkoutPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkoutPlans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workout_plans_user")
                            .from(WorkoutPlans::Table, WorkoutPlans::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workout_plans_user_created")
                    .table(WorkoutPlans::Table)
                    .col(WorkoutPlans::UserId)
                    .col(WorkoutPlans::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkoutPlanExercises::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkoutPlanExercises::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkoutPlanExercises::WorkoutPlanId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkoutPlanExercises::ExerciseId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkoutPlanExercises::Sets).integer().not_null())
                    .col(ColumnDef::new(WorkoutPlanExercises::Reps).integer().not_null())
                    .col(
                        ColumnDef::new(WorkoutPlanExercises::Weight)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(WorkoutPlanExercises::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plan_exercises_plan")
                            .from(WorkoutPlanExercises::Table, WorkoutPlanExercises::WorkoutPlanId)
                            .to(WorkoutPlans::Table, WorkoutPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plan_exercises_exercise")
                            .from(WorkoutPlanExercises::Table, WorkoutPlanExercises::ExerciseId)
                            .to(Exercises::Table, Exercises::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plan_exercises_plan")
                    .table(WorkoutPlanExercises::Table)
                    .col(WorkoutPlanExercises::WorkoutPlanId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScheduledWorkouts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledWorkouts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduledWorkouts::UserId).string().not_null())
                    .col(
                        ColumnDef::new(ScheduledWorkouts::WorkoutPlanId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduledWorkouts::ScheduledDate).date().not_null())
                    .col(
                        ColumnDef::new(ScheduledWorkouts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scheduled_workouts_user")
                            .from(ScheduledWorkouts::Table, ScheduledWorkouts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scheduled_workouts_plan")
                            .from(ScheduledWorkouts::Table, ScheduledWorkouts::WorkoutPlanId)
                            .to(WorkoutPlans::Table, WorkoutPlans::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_scheduled_workouts_user_plan_date")
                    .table(ScheduledWorkouts::Table)
                    .col(ScheduledWorkouts::UserId)
                    .col(ScheduledWorkouts::WorkoutPlanId)
                    .col(ScheduledWorkouts::ScheduledDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scheduled_workouts_user_date")
                    .table(ScheduledWorkouts::Table)
                    .col(ScheduledWorkouts::UserId)
                    .col(ScheduledWorkouts::ScheduledDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledWorkouts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkoutPlanExercises::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkoutPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exercises::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
