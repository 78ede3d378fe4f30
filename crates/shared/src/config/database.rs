use anyhow::{Context, Result};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use tracing::info;

pub type ConnectionPool = Pool<Postgres>;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    full_name VARCHAR(45) NOT NULL,
    email VARCHAR(45) NOT NULL,
    phone_no VARCHAR(45) NOT NULL,
    image TEXT NOT NULL,
    created_at VARCHAR(45) NOT NULL,
    updated_at VARCHAR(45) NOT NULL DEFAULT '',
    CONSTRAINT users_email_key UNIQUE (email),
    CONSTRAINT users_phone_no_key UNIQUE (phone_no)
)
"#;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(
        database_url: &str,
        run_migrations: bool,
        max_connections: u32,
    ) -> Result<ConnectionPool> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to Postgres")?;

        info!("🗄️ Connected to Postgres (max_connections={max_connections})");

        if run_migrations {
            Self::ensure_schema(&pool).await?;
        }

        Ok(pool)
    }

    async fn ensure_schema(pool: &ConnectionPool) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(pool)
            .await
            .context("Failed to create users table")?;

        info!("📐 users table is ready");
        Ok(())
    }
}
