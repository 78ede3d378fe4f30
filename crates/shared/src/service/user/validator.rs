use crate::{
    abstract_trait::user::repository::query::DynUserQueryRepository,
    errors::{ServiceError, UniqueField},
    model::user::UserModel,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{error, warn};
use validator::{ValidateEmail, ValidateLength};

pub const FULL_NAME_LENGTH_INVALID: &str = "Full name should be more than two characters. note: Full name length range should be two to thirty characters";
pub const FULL_NAME_INVALID: &str = "Fullname is invalid. Example of fullname is 'abcd xyz'";
pub const EMAIL_DUPLICATE: &str = "Email Id is already used by someone. please try with another emailid. Example of emailId is 'abc@example.com'";
pub const EMAIL_INVALID: &str = "Email Id is invalid. Example of emailId is 'abc@example.com'";
pub const PHONE_DUPLICATE: &str =
    "This phone number is already used by someone. please try with another phone number";
pub const PHONE_INVALID: &str = "Phone number is invalid";

const FULL_NAME_MIN: u64 = 2;
const FULL_NAME_MAX: u64 = 30;

/// One to three alphabetic words separated by single spaces.
static FULL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]+(?: [a-zA-Z]+){0,2}$").expect("full name pattern compiles")
});

/// Optional country code, digit groups with `-`, `.`, space, `\` or `/`
/// separators, and an optional `#`/`ext`/`extension`/`x` suffix.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:\(?(?:00|\+)([1-4]\d\d|[1-9]\d?)\)?)?[\-\.\ \\\/]?)?((?:\(?\d{1,}\)?[\-\.\ \\\/]?){0,})(?:[\-\.\ \\\/]?(?:#|ext\.?|extension|x)[\-\.\ \\\/]?(\d+))?$",
    )
    .expect("phone pattern compiles")
});

/// The values a create or update wants to write. `id` is `None` on create.
#[derive(Debug, Clone, Copy)]
pub struct UserCandidate<'a> {
    pub id: Option<i64>,
    pub email: &'a str,
    pub phone_no: &'a str,
}

pub fn duplicate_message(field: UniqueField) -> &'static str {
    match field {
        UniqueField::Email => EMAIL_DUPLICATE,
        UniqueField::PhoneNo => PHONE_DUPLICATE,
    }
}

pub fn validate_full_name(full_name: &str) -> Result<(), ServiceError> {
    if !full_name.validate_length(Some(FULL_NAME_MIN), Some(FULL_NAME_MAX), None) {
        warn!("📝 Full name length out of range: {}", full_name.chars().count());
        return Err(ServiceError::Validation(FULL_NAME_LENGTH_INVALID.into()));
    }

    if !FULL_NAME_PATTERN.is_match(full_name) {
        warn!("📝 Full name does not match pattern: {full_name:?}");
        return Err(ServiceError::Validation(FULL_NAME_INVALID.into()));
    }

    Ok(())
}

pub fn is_valid_phone(phone_no: &str) -> bool {
    PHONE_PATTERN.is_match(phone_no)
}

/// Field checks that need to look at other users.
#[derive(Clone)]
pub struct UserValidator {
    query: DynUserQueryRepository,
}

impl UserValidator {
    pub fn new(query: DynUserQueryRepository) -> Self {
        Self { query }
    }

    /// Duplicate check first, then syntax.
    pub async fn validate_email(&self, candidate: &UserCandidate<'_>) -> Result<(), ServiceError> {
        self.ensure_unique(UniqueField::Email, candidate.email, candidate.id)
            .await?;

        if !candidate.email.validate_email() {
            warn!("📧 Invalid email format: {}", candidate.email);
            return Err(ServiceError::Validation(EMAIL_INVALID.into()));
        }

        Ok(())
    }

    /// Duplicate check first, then the phone pattern.
    pub async fn validate_phone(&self, candidate: &UserCandidate<'_>) -> Result<(), ServiceError> {
        self.ensure_unique(UniqueField::PhoneNo, candidate.phone_no, candidate.id)
            .await?;

        if !is_valid_phone(candidate.phone_no) {
            warn!("📞 Invalid phone number: {}", candidate.phone_no);
            return Err(ServiceError::Validation(PHONE_INVALID.into()));
        }

        Ok(())
    }

    /// Fails when another user already holds `value` in `field`. A match on
    /// `candidate_id` itself is not a duplicate.
    ///
    /// This is a read before a separate write, so two concurrent requests can
    /// both pass. The schema's unique constraints catch that case and the
    /// command service maps the violation back to [`duplicate_message`].
    pub async fn ensure_unique(
        &self,
        field: UniqueField,
        value: &str,
        candidate_id: Option<i64>,
    ) -> Result<(), ServiceError> {
        let existing = match field {
            UniqueField::Email => self.query.find_by_email(value).await,
            UniqueField::PhoneNo => self.query.find_by_phone(value).await,
        }
        .map_err(|e| {
            error!("💥 Failed to check existing {field} {value}: {e:?}");
            ServiceError::Repo(e)
        })?;

        if let Some(other) = existing {
            if !stored_value(&other, field).is_empty() && Some(other.id) != candidate_id {
                warn!("🔁 {field} {value} already used by user id={}", other.id);
                return Err(ServiceError::Validation(duplicate_message(field).into()));
            }
        }

        Ok(())
    }
}

fn stored_value(user: &UserModel, field: UniqueField) -> &str {
    match field {
        UniqueField::Email => &user.email,
        UniqueField::PhoneNo => &user.phone_no,
    }
}
