use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::contract::model::{Pagination, ScheduleFilter, ScheduledWorkout};
use crate::domain::repo::{RepoResult, SchedulesRepository};
use crate::infra::storage::entity::scheduled_workouts::{
    ActiveModel as ScheduleAM, Column, Entity as ScheduleEntity,
};
use crate::infra::storage::mapper::schedule_to_contract;

/// Uniqueness of (user, plan, date) comes from the
/// `uq_scheduled_workouts_user_plan_date` index.
pub struct SeaOrmSchedulesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmSchedulesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> SchedulesRepository for SeaOrmSchedulesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, schedule: &ScheduledWorkout) -> RepoResult<()> {
        let m = ScheduleAM {
            id: Set(schedule.id.clone()),
            user_id: Set(schedule.user_id.clone()),
            workout_plan_id: Set(schedule.workout_plan_id.clone()),
            scheduled_date: Set(schedule.scheduled_date),
            created_at: Set(schedule.created_at),
        };
        ScheduleEntity::insert(m)
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> RepoResult<Vec<ScheduledWorkout>> {
        let rows = ScheduleEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::ScheduledDate.eq(date))
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(schedule_to_contract).collect())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        filter: &ScheduleFilter,
        page: Pagination,
    ) -> RepoResult<(Vec<ScheduledWorkout>, i64)> {
        let mut query = ScheduleEntity::find().filter(Column::UserId.eq(user_id));
        if let Some(date) = filter.date {
            query = query.filter(Column::ScheduledDate.eq(date));
        }

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_desc(Column::ScheduledDate)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(page.limit as u64)
            .offset(page.offset())
            .all(&self.conn)
            .await?;

        Ok((
            rows.into_iter().map(schedule_to_contract).collect(),
            total as i64,
        ))
    }

    async fn delete(&self, id: &str, user_id: &str) -> RepoResult<bool> {
        let res = ScheduleEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
