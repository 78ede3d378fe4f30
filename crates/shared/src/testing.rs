//! In-memory stand-in for the Postgres repositories.

use crate::{
    abstract_trait::user::repository::{
        command::{DynUserCommandRepository, UserCommandRepositoryTrait},
        query::{DynUserQueryRepository, UserQueryRepositoryTrait},
    },
    errors::{RepositoryError, UniqueField},
    model::user::{NewUser, UserModel},
};
use async_trait::async_trait;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

#[derive(Default)]
struct Table {
    rows: Vec<UserModel>,
    next_id: i64,
}

/// Keeps rows in insertion order and hands out ids from 1.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
    unique_constraints: bool,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Rejects writes that would duplicate an email or phone number, the way
    /// the bootstrapped Postgres schema does.
    pub fn with_unique_constraints() -> Arc<Self> {
        Arc::new(Self {
            unique_constraints: true,
            ..Self::default()
        })
    }

    pub fn as_query(self: &Arc<Self>) -> DynUserQueryRepository {
        self.clone() as DynUserQueryRepository
    }

    pub fn as_command(self: &Arc<Self>) -> DynUserCommandRepository {
        self.clone() as DynUserCommandRepository
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Inserts directly, skipping every check.
    pub fn seed(&self, user: NewUser) -> UserModel {
        let mut table = self.lock();
        table.next_id += 1;
        let model = user.into_model(table.next_id);
        table.rows.push(model.clone());
        model
    }

    pub fn rows(&self) -> Vec<UserModel> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_read(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("read failure".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("write failure".into()));
        }
        Ok(())
    }

    fn check_unique(
        &self,
        table: &Table,
        id: Option<i64>,
        email: &str,
        phone_no: &str,
    ) -> Result<(), RepositoryError> {
        if !self.unique_constraints {
            return Ok(());
        }
        let others = table.rows.iter().filter(|row| Some(row.id) != id);
        for row in others {
            if row.email == email {
                return Err(RepositoryError::AlreadyExists(UniqueField::Email));
            }
            if row.phone_no == phone_no {
                return Err(RepositoryError::AlreadyExists(UniqueField::PhoneNo));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<UserModel>, RepositoryError> {
        self.check_read()?;
        Ok(self.rows())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserModel>, RepositoryError> {
        self.check_read()?;
        Ok(self.lock().rows.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        self.check_read()?;
        Ok(self.lock().rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_phone(&self, phone_no: &str) -> Result<Option<UserModel>, RepositoryError> {
        self.check_read()?;
        Ok(self
            .lock()
            .rows
            .iter()
            .find(|u| u.phone_no == phone_no)
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserModel, RepositoryError> {
        self.check_write()?;
        let mut table = self.lock();
        self.check_unique(&table, None, &user.email, &user.phone_no)?;
        table.next_id += 1;
        let model = user.clone().into_model(table.next_id);
        table.rows.push(model.clone());
        Ok(model)
    }

    async fn save(&self, user: &UserModel) -> Result<UserModel, RepositoryError> {
        self.check_write()?;
        let mut table = self.lock();
        self.check_unique(&table, Some(user.id), &user.email, &user.phone_no)?;
        match table.rows.iter_mut().find(|row| row.id == user.id) {
            Some(row) => *row = user.clone(),
            None => table.rows.push(user.clone()),
        }
        Ok(user.clone())
    }

    async fn delete(&self, user_id: i64) -> Result<bool, RepositoryError> {
        self.check_write()?;
        let mut table = self.lock();
        let before = table.rows.len();
        table.rows.retain(|row| row.id != user_id);
        Ok(table.rows.len() != before)
    }
}

/// A valid row for seeding.
pub fn sample_user(full_name: &str, email: &str, phone_no: &str) -> NewUser {
    NewUser {
        full_name: full_name.into(),
        email: email.into(),
        phone_no: phone_no.into(),
        image: "aW1hZ2U=".into(),
        created_at: "01-02-2026 15:04:05".into(),
        updated_at: String::new(),
    }
}
