use anyhow::Result;
use shared::{
    abstract_trait::user::{
        repository::{command::DynUserCommandRepository, query::DynUserQueryRepository},
        service::{command::DynUserCommandService, query::DynUserQueryService},
    },
    config::ConnectionPool,
    repository::user::{command::UserCommandRepository, query::UserQueryRepository},
    service::user::{command::UserCommandService, query::UserQueryService},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub user_command: DynUserCommandService,
    pub user_query: DynUserQueryService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("user_command", &"UserCommandService")
            .field("user_query", &"UserQueryService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(db: ConnectionPool) -> Result<Self> {
        let query = Arc::new(UserQueryRepository::new(db.clone())) as DynUserQueryRepository;
        let command = Arc::new(UserCommandRepository::new(db)) as DynUserCommandRepository;

        Self::from_repositories(query, command).await
    }

    /// Wires the services over any store implementation.
    pub async fn from_repositories(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
    ) -> Result<Self> {
        let user_command = Arc::new(UserCommandService::new(query.clone(), command).await)
            as DynUserCommandService;
        let user_query = Arc::new(UserQueryService::new(query).await) as DynUserQueryService;

        Ok(Self {
            user_command,
            user_query,
        })
    }
}
