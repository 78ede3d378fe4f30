use crate::{errors::RepositoryError, model::user::UserModel};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    /// Every user, in whatever order the store returns them.
    async fn find_all(&self) -> Result<Vec<UserModel>, RepositoryError>;

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserModel>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;

    async fn find_by_phone(&self, phone_no: &str) -> Result<Option<UserModel>, RepositoryError>;
}
