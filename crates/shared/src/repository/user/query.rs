use crate::{
    abstract_trait::user::repository::query::UserQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::user::UserModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct UserQueryRepository {
    db_pool: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db_pool.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_one_by(
        &self,
        sql: &str,
        value: &str,
        label: &str,
    ) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>(sql)
            .bind(value)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Database error in find user by {label}: {e:?}");
                RepositoryError::Sqlx(e)
            })
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self) -> Result<Vec<UserModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        // No ORDER BY: callers see the store's own ordering.
        sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, full_name, email, phone_no, image, created_at, updated_at
            FROM users
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error in find_all users: {e:?}");
            RepositoryError::Sqlx(e)
        })
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, full_name, email, phone_no, image, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error in find user by id {user_id}: {e:?}");
            RepositoryError::Sqlx(e)
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        self.find_one_by(
            r#"
            SELECT id, full_name, email, phone_no, image, created_at, updated_at
            FROM users
            WHERE email = $1
            ORDER BY id
            LIMIT 1
            "#,
            email,
            "email",
        )
        .await
    }

    async fn find_by_phone(&self, phone_no: &str) -> Result<Option<UserModel>, RepositoryError> {
        self.find_one_by(
            r#"
            SELECT id, full_name, email, phone_no, image, created_at, updated_at
            FROM users
            WHERE phone_no = $1
            ORDER BY id
            LIMIT 1
            "#,
            phone_no,
            "phone",
        )
        .await
    }
}
