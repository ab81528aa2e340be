use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::contract::model::Exercise;
use crate::domain::repo::{ExercisesRepository, RepoResult};
use crate::infra::storage::entity::exercises::{Column, Entity as ExerciseEntity};
use crate::infra::storage::mapper::exercise_to_contract;

pub struct SeaOrmExercisesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmExercisesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> ExercisesRepository for SeaOrmExercisesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list_all(&self) -> RepoResult<Vec<Exercise>> {
        let rows = ExerciseEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(exercise_to_contract).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Exercise>> {
        let found = ExerciseEntity::find_by_id(id.to_string())
            .one(&self.conn)
            .await?;
        Ok(found.map(exercise_to_contract))
    }
}
