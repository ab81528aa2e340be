use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::contract::model::User;
use crate::domain::repo::{RepoResult, UserRecord, UsersRepository};
use crate::infra::storage::entity::users::{ActiveModel as UserAM, Column, Entity as UserEntity};
use crate::infra::storage::mapper::{user_to_contract, user_to_record};

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, user: User, password_hash: String) -> RepoResult<()> {
        let m = UserAM {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(password_hash),
            created_at: Set(user.created_at),
        };
        UserEntity::insert(m).exec_without_returning(&self.conn).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let found = UserEntity::find_by_id(id.to_string()).one(&self.conn).await?;
        Ok(found.map(user_to_contract))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.conn)
            .await?;
        Ok(found.map(user_to_record))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }
}
