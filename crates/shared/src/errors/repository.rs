use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Unique constraint violated on {0}")]
    AlreadyExists(UniqueField),

    #[error("{0}")]
    Custom(String),
}

/// Columns that the store keeps unique across every live user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    PhoneNo,
}

impl UniqueField {
    pub fn column(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::PhoneNo => "phone_no",
        }
    }

    pub fn from_constraint(name: &str) -> Option<Self> {
        match name {
            "users_email_key" => Some(UniqueField::Email),
            "users_phone_no_key" => Some(UniqueField::PhoneNo),
            _ => None,
        }
    }
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl RepositoryError {
    /// Turns a unique-constraint violation on the users table into
    /// [`RepositoryError::AlreadyExists`], leaving every other error as is.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                if let Some(field) = db_err.constraint().and_then(UniqueField::from_constraint) {
                    return RepositoryError::AlreadyExists(field);
                }
            }
        }
        RepositoryError::Sqlx(err)
    }
}
