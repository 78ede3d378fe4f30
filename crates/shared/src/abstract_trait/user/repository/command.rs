use crate::{
    errors::RepositoryError,
    model::user::{NewUser, UserModel},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create(&self, user: &NewUser) -> Result<UserModel, RepositoryError>;

    /// Writes every column of `user`, keyed on its id.
    async fn save(&self, user: &UserModel) -> Result<UserModel, RepositoryError>;

    /// Returns `false` when no row matched `user_id`.
    async fn delete(&self, user_id: i64) -> Result<bool, RepositoryError>;
}
