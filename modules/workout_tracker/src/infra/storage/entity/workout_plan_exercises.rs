use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "workout_plan_exercises")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub workout_plan_id: String,
    pub exercise_id: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub order_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workout_plans::Entity",
        from = "Column::WorkoutPlanId",
        to = "super::workout_plans::Column::Id",
        on_delete = "Cascade"
    )]
    Plan,
}

impl Related<super::workout_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
