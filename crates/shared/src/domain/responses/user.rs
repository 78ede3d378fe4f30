use crate::model::user::UserModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "phoneNo")]
    pub phone_no: String,
    /// Base64 encoded image bytes.
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(value: UserModel) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
            phone_no: value.phone_no,
            image: value.image,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
