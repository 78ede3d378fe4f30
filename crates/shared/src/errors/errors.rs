use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Failure envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "status code")]
    pub status_code: String,
    pub error: String,
}
