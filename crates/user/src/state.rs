use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use shared::config::ConnectionPool;

#[derive(Debug, Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
}

impl AppState {
    pub async fn new(db_pool: ConnectionPool) -> Result<Self> {
        let di_container = DependenciesInject::new(db_pool)
            .await
            .context("Failed to initialize dependency injection container")?;

        Ok(Self { di_container })
    }

    pub fn from_container(di_container: DependenciesInject) -> Self {
        Self { di_container }
    }
}
