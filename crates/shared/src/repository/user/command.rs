use crate::{
    abstract_trait::user::repository::command::UserCommandRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::user::{NewUser, UserModel},
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct UserCommandRepository {
    db_pool: ConnectionPool,
}

impl UserCommandRepository {
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
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create(&self, user: &NewUser) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let record = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (
                full_name,
                email,
                phone_no,
                image,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id,
                full_name,
                email,
                phone_no,
                image,
                created_at,
                updated_at
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone_no)
        .bind(&user.image)
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error in create user: {e:?}");
            RepositoryError::from_write(e)
        })?;

        Ok(record)
    }

    async fn save(&self, user: &UserModel) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let record = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (
                id,
                full_name,
                email,
                phone_no,
                image,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                phone_no = EXCLUDED.phone_no,
                image = EXCLUDED.image,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            RETURNING
                id,
                full_name,
                email,
                phone_no,
                image,
                created_at,
                updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone_no)
        .bind(&user.image)
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error in save user {}: {e:?}", user.id);
            RepositoryError::from_write(e)
        })?;

        Ok(record)
    }

    async fn delete(&self, user_id: i64) -> Result<bool, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error in delete user {user_id}: {e:?}");
            RepositoryError::Sqlx(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
