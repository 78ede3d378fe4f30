use crate::{
    abstract_trait::user::{
        repository::{command::DynUserCommandRepository, query::DynUserQueryRepository},
        service::command::UserCommandServiceTrait,
    },
    domain::{
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::user::NewUser,
    service::user::validator::{
        UserCandidate, UserValidator, duplicate_message, validate_full_name,
    },
    utils::{TracingContext, encode_image, now_timestamp},
};
use anyhow::Result;
use async_trait::async_trait;
use opentelemetry::{
    KeyValue,
    global::{self, BoxedTracer},
};
use tracing::{error, info, warn};

pub const USER_NOT_FOUND: &str = "Userid is not found";
const CREATE_FAILED: &str = "Getting an error while inserting the user data into the user table";
const UPDATE_FAILED: &str = "Getting an error while updating the user data into the user table";
const DELETE_FAILED: &str = "Getting an error while deleting the user data from the user table";

pub struct UserCommandService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    validator: UserValidator,
}

impl UserCommandService {
    pub async fn new(query: DynUserQueryRepository, command: DynUserCommandRepository) -> Self {
        let validator = UserValidator::new(query.clone());
        Self {
            query,
            command,
            validator,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("user-command-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        TracingContext::start(&self.get_tracer(), operation_name, attributes)
    }

    fn complete_tracing<T>(
        &self,
        tracing_ctx: &TracingContext,
        result: &Result<T, ServiceError>,
        success_message: &str,
    ) {
        match result {
            Ok(_) => tracing_ctx.complete(true, success_message),
            Err(e) => tracing_ctx.complete(false, &e.to_string()),
        }
    }

    /// Name, email, phone, in that order. The first failure wins.
    async fn validate_fields(
        &self,
        full_name: &str,
        candidate: UserCandidate<'_>,
    ) -> Result<(), ServiceError> {
        validate_full_name(full_name)?;
        self.validator.validate_email(&candidate).await?;
        self.validator.validate_phone(&candidate).await?;
        Ok(())
    }
}

/// Maps a write failure to the caller-facing error. Unique violations that
/// slipped past the pre-check surface with the same duplicate message.
fn write_error(err: RepositoryError, opaque: &str) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(field) => {
            warn!("🔁 Store rejected duplicate {field}");
            ServiceError::Validation(duplicate_message(field).into())
        }
        other => {
            error!("💥 {opaque}: {other:?}");
            ServiceError::Internal(opaque.into())
        }
    }
}

/// Path ids arrive as `u64`; anything beyond the column range cannot exist.
fn to_row_id(user_id: u64) -> Option<i64> {
    i64::try_from(user_id).ok()
}

impl UserCommandService {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🆕 Creating user: {}", req.full_name);

        let candidate = UserCandidate {
            id: None,
            email: &req.email,
            phone_no: &req.phone_no,
        };
        self.validate_fields(&req.full_name, candidate).await?;

        let image = encode_image(&req.image)?;

        let new_user = NewUser {
            full_name: req.full_name.clone(),
            email: req.email.clone(),
            phone_no: req.phone_no.clone(),
            image,
            created_at: now_timestamp(),
            updated_at: String::new(),
        };

        let created = self
            .command
            .create(&new_user)
            .await
            .map_err(|e| write_error(e, CREATE_FAILED))?;

        info!("✅ User created successfully with id={}", created.id);

        Ok(ApiResponse::created(
            "Successfully created the user",
            UserResponse::from(created),
        ))
    }

    async fn update_user(
        &self,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🔄 Updating user id={}", req.id);

        let not_found = || {
            warn!("👤 User not found with id {}", req.id);
            ServiceError::NotFound(USER_NOT_FOUND.into())
        };

        let user_id = to_row_id(req.id).ok_or_else(not_found)?;

        let mut user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| {
                error!("💥 Failed to load user {user_id}: {e:?}");
                ServiceError::Internal(UPDATE_FAILED.into())
            })?
            .ok_or_else(not_found)?;

        user.full_name = req.full_name.clone();
        user.email = req.email.clone();
        user.phone_no = req.phone_no.clone();

        let candidate = UserCandidate {
            id: Some(user.id),
            email: &user.email,
            phone_no: &user.phone_no,
        };
        self.validate_fields(&user.full_name, candidate).await?;

        user.image = encode_image(&req.image)?;
        user.updated_at = now_timestamp();

        let saved = self
            .command
            .save(&user)
            .await
            .map_err(|e| write_error(e, UPDATE_FAILED))?;

        info!("✅ User updated successfully with id={}", saved.id);

        Ok(ApiResponse::ok(
            "Successfully updated",
            UserResponse::from(saved),
        ))
    }

    async fn delete_user(&self, user_id: u64) -> Result<ApiResponse<u64>, ServiceError> {
        info!("🗑️ Deleting user id={user_id}");

        let deleted = match to_row_id(user_id) {
            Some(id) => self.command.delete(id).await.map_err(|e| {
                error!("💥 Failed to delete user {user_id}: {e:?}");
                ServiceError::Internal(DELETE_FAILED.into())
            })?,
            None => false,
        };

        if !deleted {
            warn!("👤 User not found with id {user_id}");
            return Err(ServiceError::NotFound(USER_NOT_FOUND.into()));
        }

        info!("✅ User deleted permanently with id={user_id}");

        Ok(ApiResponse::ok("Successfully deleted", user_id))
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn create(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "create_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "create"),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        let result = self.create_user(req).await;
        self.complete_tracing(&tracing_ctx, &result, "User created");

        result
    }

    async fn update(
        &self,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "update_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "update"),
                KeyValue::new("user.id", req.id.to_string()),
            ],
        );

        let result = self.update_user(req).await;
        self.complete_tracing(&tracing_ctx, &result, "User updated");

        result
    }

    async fn delete(&self, user_id: u64) -> Result<ApiResponse<u64>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "delete_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = self.delete_user(user_id).await;
        self.complete_tracing(&tracing_ctx, &result, "User deleted");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::requests::ImageUpload,
        service::user::validator::{
            EMAIL_DUPLICATE, FULL_NAME_INVALID, PHONE_DUPLICATE, PHONE_INVALID,
        },
        testing::{InMemoryUserRepository, sample_user},
        utils::{IMAGE_MISSING, IMAGE_TOO_LARGE, TIMESTAMP_FORMAT},
    };
    use chrono::NaiveDateTime;
    use std::sync::Arc;

    async fn service(repo: &Arc<InMemoryUserRepository>) -> UserCommandService {
        UserCommandService::new(repo.as_query(), repo.as_command()).await
    }

    fn jane() -> CreateUserRequest {
        CreateUserRequest {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone_no: "+1 555 123 4567".into(),
            image: ImageUpload::Bytes(b"0123456789".to_vec()),
        }
    }

    fn rejected_with(result: Result<impl std::fmt::Debug, ServiceError>) -> String {
        match result {
            Err(ServiceError::Validation(msg)) | Err(ServiceError::NotFound(msg)) => msg,
            other => panic!("expected a client error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_echoes_fields_and_stamps_created_at() {
        let repo = InMemoryUserRepository::new();
        let service = service(&repo).await;

        let response = service.create(&jane()).await.unwrap();
        let user = response.data;

        assert_eq!(response.status_code, "201");
        assert!(user.id > 0);
        assert_eq!(user.full_name, "Jane Doe");
        assert_eq!(user.email, "jane@x.com");
        assert_eq!(user.phone_no, "+1 555 123 4567");
        assert_eq!(user.image, "MDEyMzQ1Njc4OQ==");
        assert!(NaiveDateTime::parse_from_str(&user.created_at, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(user.updated_at, "");
        assert_eq!(repo.rows().len(), 1);
    }

    #[tokio::test]
    async fn create_with_duplicate_email_inserts_nothing() {
        let repo = InMemoryUserRepository::new();
        let service = service(&repo).await;
        service.create(&jane()).await.unwrap();

        let mut second = jane();
        second.phone_no = "+1 555 999 9999".into();

        assert_eq!(rejected_with(service.create(&second).await), EMAIL_DUPLICATE);
        assert_eq!(repo.rows().len(), 1);
    }

    #[tokio::test]
    async fn create_gates_run_in_order() {
        let repo = InMemoryUserRepository::new();
        let service = service(&repo).await;

        let mut req = jane();
        req.full_name = "J4ne".into();
        req.phone_no = "nope".into();
        req.image = ImageUpload::TooLarge;
        assert_eq!(rejected_with(service.create(&req).await), FULL_NAME_INVALID);

        req.full_name = "Jane Doe".into();
        assert_eq!(rejected_with(service.create(&req).await), PHONE_INVALID);

        req.phone_no = "+1 555 123 4567".into();
        assert_eq!(rejected_with(service.create(&req).await), IMAGE_TOO_LARGE);
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn create_without_image_fails() {
        let repo = InMemoryUserRepository::new();
        let service = service(&repo).await;

        let mut req = jane();
        req.image = ImageUpload::Missing;
        assert_eq!(rejected_with(service.create(&req).await), IMAGE_MISSING);
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn create_insert_failure_is_internal() {
        let repo = InMemoryUserRepository::new();
        repo.fail_writes(true);
        let service = service(&repo).await;

        match service.create(&jane()).await {
            Err(ServiceError::Internal(msg)) => assert_eq!(msg, CREATE_FAILED),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unique_violation_from_store_maps_to_duplicate_message() {
        let repo = InMemoryUserRepository::with_unique_constraints();
        repo.seed(sample_user("Ann Lee", "ann@x.com", "+1 555 000 0001"));

        // Simulates a concurrent insert landing between check and write by
        // validating against an empty view of the table.
        let empty = InMemoryUserRepository::new();
        let service = UserCommandService::new(empty.as_query(), repo.as_command()).await;

        let mut req = jane();
        req.phone_no = "+1 555 000 0001".into();
        assert_eq!(rejected_with(service.create(&req).await), PHONE_DUPLICATE);
    }

    #[tokio::test]
    async fn update_rewrites_fields_and_keeps_created_at() {
        let repo = InMemoryUserRepository::new();
        let existing = repo.seed(sample_user("Ann Lee", "ann@x.com", "+1 555 000 0001"));
        let service = service(&repo).await;

        let req = UpdateUserRequest {
            id: existing.id as u64,
            full_name: "Ann Marie Lee".into(),
            email: "ann@x.com".into(),
            phone_no: "+1 555 000 0002".into(),
            image: ImageUpload::Bytes(vec![1, 2, 3]),
        };
        let response = service.update(&req).await.unwrap();

        assert_eq!(response.status_code, "200");
        assert_eq!(response.data.id, existing.id);
        assert_eq!(response.data.full_name, "Ann Marie Lee");
        assert_eq!(response.data.image, "AQID");
        assert_eq!(response.data.created_at, existing.created_at);
        assert!(
            NaiveDateTime::parse_from_str(&response.data.updated_at, TIMESTAMP_FORMAT).is_ok()
        );
        assert_eq!(repo.rows()[0].phone_no, "+1 555 000 0002");
    }

    #[tokio::test]
    async fn update_to_another_users_phone_persists_nothing() {
        let repo = InMemoryUserRepository::new();
        let ann = repo.seed(sample_user("Ann Lee", "ann@x.com", "+1 555 000 0001"));
        repo.seed(sample_user("Bob Ray", "bob@x.com", "+1 555 000 0002"));
        let service = service(&repo).await;

        let req = UpdateUserRequest {
            id: ann.id as u64,
            full_name: "Ann Lee".into(),
            email: "ann@x.com".into(),
            phone_no: "+1 555 000 0002".into(),
            image: ImageUpload::Bytes(vec![1]),
        };
        assert_eq!(rejected_with(service.update(&req).await), PHONE_DUPLICATE);
        assert_eq!(repo.rows()[0], ann);
    }

    #[tokio::test]
    async fn update_to_another_users_email_persists_nothing() {
        let repo = InMemoryUserRepository::new();
        let ann = repo.seed(sample_user("Ann Lee", "ann@x.com", "+1 555 000 0001"));
        let bob = repo.seed(sample_user("Bob Ray", "bob@x.com", "+1 555 000 0002"));
        let service = service(&repo).await;

        let req = UpdateUserRequest {
            id: ann.id as u64,
            full_name: "Ann Lee".into(),
            email: "bob@x.com".into(),
            phone_no: "+1 555 000 0001".into(),
            image: ImageUpload::Bytes(vec![1]),
        };
        assert_eq!(rejected_with(service.update(&req).await), EMAIL_DUPLICATE);
        assert_eq!(repo.rows(), vec![ann, bob]);
    }

    #[tokio::test]
    async fn update_requires_an_image() {
        let repo = InMemoryUserRepository::new();
        let ann = repo.seed(sample_user("Ann Lee", "ann@x.com", "+1 555 000 0001"));
        let service = service(&repo).await;

        let req = UpdateUserRequest {
            id: ann.id as u64,
            full_name: "Ann Lee".into(),
            email: "ann@x.com".into(),
            phone_no: "+1 555 000 0001".into(),
            image: ImageUpload::Missing,
        };
        assert!(matches!(
            service.update(&req).await,
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(repo.rows()[0], ann);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let service = service(&repo).await;

        let mut req = UpdateUserRequest {
            id: 42,
            full_name: "Ann Lee".into(),
            email: "ann@x.com".into(),
            phone_no: "+1 555 000 0001".into(),
            image: ImageUpload::Bytes(vec![1]),
        };
        assert_eq!(rejected_with(service.update(&req).await), USER_NOT_FOUND);

        req.id = u64::MAX;
        assert_eq!(rejected_with(service.update(&req).await), USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_row_and_echoes_id() {
        let repo = InMemoryUserRepository::new();
        let ann = repo.seed(sample_user("Ann Lee", "ann@x.com", "+1 555 000 0001"));
        let service = service(&repo).await;

        let response = service.delete(ann.id as u64).await.unwrap();
        assert_eq!(response.data, ann.id as u64);
        assert!(repo.rows().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_store_unchanged() {
        let repo = InMemoryUserRepository::new();
        repo.seed(sample_user("Ann Lee", "ann@x.com", "+1 555 000 0001"));
        let service = service(&repo).await;

        assert_eq!(rejected_with(service.delete(99).await), USER_NOT_FOUND);
        assert_eq!(rejected_with(service.delete(0).await), USER_NOT_FOUND);
        assert_eq!(repo.rows().len(), 1);
    }
}
