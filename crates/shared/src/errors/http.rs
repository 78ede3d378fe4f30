use crate::errors::{errors::ErrorResponse, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

const GENERIC_INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl From<ServiceError> for AppErrorHttp {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl AppErrorHttp {
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            ServiceError::Validation(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::OutOfRange(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),

            ServiceError::Repo(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERIC_INTERNAL_ERROR.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();

        if self.0.is_client_error() {
            warn!("⚠️ Rejected request: {msg}");
        } else {
            error!("🚨 {}", self.0);
        }

        let body = Json(ErrorResponse {
            status_code: status.as_u16().to_string(),
            error: msg,
        });

        (status, body).into_response()
    }
}
