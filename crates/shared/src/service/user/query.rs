use crate::{
    abstract_trait::user::{
        repository::query::DynUserQueryRepository, service::query::UserQueryServiceTrait,
    },
    domain::responses::{ApiResponse, UserResponse},
    errors::ServiceError,
    utils::TracingContext,
};
use anyhow::Result;
use async_trait::async_trait;
use opentelemetry::{
    KeyValue,
    global::{self, BoxedTracer},
};
use tracing::{error, info, warn};

pub const INVALID_POSITION: &str = "Invalid pagination number. please enter the valid pagination.";
const FIND_ALL_FAILED: &str = "Getting an error while getting all users data from the user table";

pub struct UserQueryService {
    query: DynUserQueryRepository,
}

impl UserQueryService {
    pub async fn new(query: DynUserQueryRepository) -> Self {
        Self { query }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("user-query-service")
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

    async fn load_all(&self) -> Result<Vec<UserResponse>, ServiceError> {
        let users = self.query.find_all().await.map_err(|e| {
            error!("❌ Failed to fetch all users: {e:?}");
            ServiceError::Internal(FIND_ALL_FAILED.into())
        })?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn user_at(&self, position: u64) -> Result<UserResponse, ServiceError> {
        let mut users = self.load_all().await?;

        // The result depends on the store's ordering of `find_all`, which is
        // not guaranteed. Callers wanting a specific user should use the id.
        let index = match usize::try_from(position) {
            Ok(p) if p >= 1 && p <= users.len() => p - 1,
            _ => {
                warn!(
                    "📄 Position {position} outside 1..={} users",
                    users.len()
                );
                return Err(ServiceError::OutOfRange(INVALID_POSITION.into()));
            }
        };

        Ok(users.swap_remove(index))
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError> {
        info!("🔍 Fetching all users");

        let tracing_ctx = self.start_tracing(
            "find_all_users",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let result = self.load_all().await;
        self.complete_tracing(&tracing_ctx, &result, "Users retrieved");

        let users = result?;

        info!("✅ Found {} users", users.len());

        Ok(ApiResponse::ok("Successfully get the all users", users))
    }

    async fn find_by_position(
        &self,
        position: u64,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🔍 Fetching user at position {position}");

        let tracing_ctx = self.start_tracing(
            "find_user_by_position",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "find_by_position"),
                KeyValue::new("position", position.to_string()),
            ],
        );

        let result = self.user_at(position).await;
        self.complete_tracing(&tracing_ctx, &result, "User retrieved");

        let user = result?;

        info!("✅ Found user id={} at position {position}", user.id);

        Ok(ApiResponse::ok("Successfully get the user data", user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryUserRepository, sample_user};

    async fn service_with(names: &[&str]) -> (UserQueryService, Vec<i64>) {
        let repo = InMemoryUserRepository::new();
        let mut ids = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let user = repo.seed(sample_user(
                name,
                &format!("user{i}@x.com"),
                &format!("+1 555 000 000{i}"),
            ));
            ids.push(user.id);
        }
        (UserQueryService::new(repo.as_query()).await, ids)
    }

    #[tokio::test]
    async fn find_all_returns_every_user() {
        let (service, ids) = service_with(&["Ann Lee", "Bob Ray", "Cy Fox"]).await;

        let response = service.find_all().await.unwrap();
        assert_eq!(response.status_code, "200");
        let got: Vec<i64> = response.data.iter().map(|u| u.id).collect();
        assert_eq!(got, ids);
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty() {
        let (service, _) = service_with(&[]).await;
        assert!(service.find_all().await.unwrap().data.is_empty());
    }

    #[tokio::test]
    async fn position_is_one_based_ordinal() {
        let (service, ids) = service_with(&["Ann Lee", "Bob Ray", "Cy Fox"]).await;

        for (p, id) in ids.iter().enumerate() {
            let response = service.find_by_position(p as u64 + 1).await.unwrap();
            assert_eq!(response.data.id, *id);
        }
    }

    #[tokio::test]
    async fn position_outside_set_is_rejected() {
        let (service, _) = service_with(&["Ann Lee", "Bob Ray"]).await;

        for p in [0, 3, 100, u64::MAX] {
            match service.find_by_position(p).await {
                Err(ServiceError::OutOfRange(msg)) => assert_eq!(msg, INVALID_POSITION),
                other => panic!("position {p}: unexpected {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let repo = InMemoryUserRepository::new();
        repo.fail_reads(true);
        let service = UserQueryService::new(repo.as_query()).await;

        assert!(matches!(
            service.find_all().await,
            Err(ServiceError::Internal(_))
        ));
        assert!(matches!(
            service.find_by_position(1).await,
            Err(ServiceError::Internal(_))
        ));
    }
}
