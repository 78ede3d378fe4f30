use crate::{
    domain::responses::{ApiResponse, UserResponse},
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryService = Arc<dyn UserQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError>;

    /// Ordinal lookup into `find_all`, 1-based. This is not a primary key lookup.
    async fn find_by_position(
        &self,
        position: u64,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
