use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[serde(rename = "status code")]
    pub status_code: String,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: "200".into(),
            message: message.into(),
            data,
        }
    }

    /// Carries `"201"`, the same code the create endpoint answers with.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: "201".into(),
            message: message.into(),
            data,
        }
    }
}
