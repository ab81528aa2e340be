use std::collections::HashMap;

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::contract::model::{Pagination, PlanFilter, WorkoutPlan};
use crate::domain::repo::{PlanOwnerLookup, PlansRepository, RepoResult};
use crate::infra::storage::entity::{scheduled_workouts, workout_plan_exercises, workout_plans};
use crate::infra::storage::mapper::{notes_to_column, plan_to_contract};

pub struct SeaOrmPlansRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmPlansRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn exercises_for<T: ConnectionTrait>(
        conn: &T,
        plan_ids: Vec<String>,
    ) -> RepoResult<HashMap<String, Vec<workout_plan_exercises::Model>>> {
        if plan_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = workout_plan_exercises::Entity::find()
            .filter(workout_plan_exercises::Column::WorkoutPlanId.is_in(plan_ids))
            .order_by_asc(workout_plan_exercises::Column::OrderIndex)
            .order_by_asc(workout_plan_exercises::Column::Id)
            .all(conn)
            .await?;

        let mut by_plan: HashMap<String, Vec<_>> = HashMap::new();
        for row in rows {
            by_plan.entry(row.workout_plan_id.clone()).or_default().push(row);
        }
        Ok(by_plan)
    }

    async fn insert_exercises<T: ConnectionTrait>(conn: &T, plan: &WorkoutPlan) -> RepoResult<()> {
        if plan.exercises.is_empty() {
            return Ok(());
        }
        let rows = plan
            .exercises
            .iter()
            .map(|e| workout_plan_exercises::ActiveModel {
                id: Set(e.id.clone()),
                workout_plan_id: Set(plan.id.clone()),
                exercise_id: Set(e.exercise_id.clone()),
                sets: Set(e.sets),
                reps: Set(e.reps),
                weight: Set(e.weight),
                order_index: Set(e.order_index),
            });
        workout_plan_exercises::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }
}

/// `%`, `_` and `\` in user input match literally.
fn like_contains(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait::async_trait]
impl<C> PlansRepository for SeaOrmPlansRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn create(&self, plan: &WorkoutPlan) -> RepoResult<()> {
        let txn = self.conn.begin().await?;

        let m = workout_plans::ActiveModel {
            id: Set(plan.id.clone()),
            user_id: Set(plan.user_id.clone()),
            name: Set(plan.name.clone()),
            notes: Set(notes_to_column(&plan.notes)),
            created_at: Set(plan.created_at),
            updated_at: Set(plan.updated_at),
        };
        workout_plans::Entity::insert(m)
            .exec_without_returning(&txn)
            .await?;
        Self::insert_exercises(&txn, plan).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn update(&self, plan: &WorkoutPlan) -> RepoResult<Option<WorkoutPlan>> {
        let txn = self.conn.begin().await?;

        let existing = workout_plans::Entity::find_by_id(plan.id.clone())
            .filter(workout_plans::Column::UserId.eq(plan.user_id.as_str()))
            .one(&txn)
            .await?;
        let Some(existing) = existing else {
            txn.rollback().await?;
            return Ok(None);
        };

        let created_at = existing.created_at;
        let mut am: workout_plans::ActiveModel = existing.into();
        am.name = Set(plan.name.clone());
        am.notes = Set(notes_to_column(&plan.notes));
        am.updated_at = Set(plan.updated_at);
        am.update(&txn).await?;

        workout_plan_exercises::Entity::delete_many()
            .filter(workout_plan_exercises::Column::WorkoutPlanId.eq(plan.id.as_str()))
            .exec(&txn)
            .await?;
        Self::insert_exercises(&txn, plan).await?;

        txn.commit().await?;

        Ok(Some(WorkoutPlan {
            created_at,
            ..plan.clone()
        }))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        filter: &PlanFilter,
        page: Pagination,
    ) -> RepoResult<(Vec<WorkoutPlan>, i64)> {
        let mut query =
            workout_plans::Entity::find().filter(workout_plans::Column::UserId.eq(user_id));
        if let Some(name) = filter.name.as_deref() {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(workout_plans::Column::Name)))
                    .like(LikeExpr::new(like_contains(name)).escape('\\')),
            );
        }

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_desc(workout_plans::Column::CreatedAt)
            .order_by_desc(workout_plans::Column::Id)
            .limit(page.limit as u64)
            .offset(page.offset())
            .all(&self.conn)
            .await?;

        let ids = rows.iter().map(|r| r.id.clone()).collect();
        let mut exercises = Self::exercises_for(&self.conn, ids).await?;
        let plans = rows
            .into_iter()
            .map(|r| {
                let lines = exercises.remove(&r.id).unwrap_or_default();
                plan_to_contract(r, lines)
            })
            .collect();

        Ok((plans, total as i64))
    }

    async fn find_by_id(&self, user_id: &str, plan_id: &str) -> RepoResult<Option<WorkoutPlan>> {
        let found = workout_plans::Entity::find_by_id(plan_id.to_string())
            .filter(workout_plans::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?;
        let Some(found) = found else {
            return Ok(None);
        };
        let mut exercises = Self::exercises_for(&self.conn, vec![found.id.clone()]).await?;
        let lines = exercises.remove(&found.id).unwrap_or_default();
        Ok(Some(plan_to_contract(found, lines)))
    }

    async fn delete(&self, user_id: &str, plan_id: &str) -> RepoResult<bool> {
        let txn = self.conn.begin().await?;

        let owned = workout_plans::Entity::find_by_id(plan_id.to_string())
            .filter(workout_plans::Column::UserId.eq(user_id))
            .count(&txn)
            .await?;
        if owned == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        scheduled_workouts::Entity::delete_many()
            .filter(scheduled_workouts::Column::WorkoutPlanId.eq(plan_id))
            .exec(&txn)
            .await?;
        workout_plan_exercises::Entity::delete_many()
            .filter(workout_plan_exercises::Column::WorkoutPlanId.eq(plan_id))
            .exec(&txn)
            .await?;
        let res = workout_plans::Entity::delete_many()
            .filter(workout_plans::Column::Id.eq(plan_id))
            .filter(workout_plans::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait::async_trait]
impl<C> PlanOwnerLookup for SeaOrmPlansRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn owner_of(&self, plan_id: &str) -> RepoResult<Option<String>> {
        let owner = workout_plans::Entity::find_by_id(plan_id.to_string())
            .select_only()
            .column(workout_plans::Column::UserId)
            .into_tuple::<String>()
            .one(&self.conn)
            .await?;
        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::like_contains;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_contains("Push"), "%push%");
        assert_eq!(like_contains("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_contains("a\\b"), "%a\\\\b%");
    }
}
